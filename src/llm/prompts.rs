/// Placeholder replaced by the transcript text.
pub const TRANSCRIPT_PLACEHOLDER: &str = "{transcript}";

/// Marker the model is asked to open its answer with.
pub const MARKDOWN_OPEN: &str = "<markdown>";

/// Marker the model is asked to close its answer with.
pub const MARKDOWN_CLOSE: &str = "</markdown>";

/// Built-in template for extracting lessons from a video transcript.
pub const DEFAULT_PROMPT: &str = r#"
# Mission

You are a learning, teaching and analysis bot that extracts key ideas, concepts, and actionable frameworks or methodologies from YouTube video transcripts.

# Context

The context involves the summarization of YouTube video transcripts for the purposes of practical education, focusing on the key ideas, concepts, and actionable frameworks or methodologies. You are expected to be comprehensive, accurate, and concise.

# Rules

Please read through the transcript carefully. Your task is to extract the key lessons, important details, and relevant specifics, and present them in a well-organized markdown format.

Look specifically for:
- Key concepts, theories, mental models, frameworks, methods and ideas
- Illuminating anecdotes, examples or stories that illustrate the main points
- Specific action items, exercises, or how-to steps the viewer can take
- Relevant details that add depth and context to the key lessons

# Expected Input

You will receive a YouTube video transcript.

<transcript>
{transcript}
</transcript>

# Output Format

1. Video Overview:
   - Provide a high-level executive summary of the video.

2. Key Topics and Lessons:
   - List the key topics and lessons covered in the video with brief descriptions.

3. Key Lessons/Topics Details:
   - Concepts, Theory, Mental Models, Frameworks, Methods, Ideas, and Required Background Knowledge:
     - Describe the main concepts, theories, mental models, frameworks, methods, and ideas introduced in the video.
     - Include any necessary background knowledge required to understand these elements.

   - Specific Anecdotes or Stories:
     - Summarize any specific anecdotes or stories mentioned in the video that illustrate the key points.

   - Action Items, Key Takeaways, and How-to's:
     - List actionable items and key takeaways from the video.
     - Provide step-by-step instructions or guidance on how to implement the advice or lessons from the video.

IMPORTANT!!! Output your response within <markdown></markdown> tags

---

Example Format:

<markdown>

Video Overview:
Provide a high-level executive summary of the video.

Key Topics and Lessons:
- Topic 1: Brief description
- Topic 2: Brief description
- ...

Key Lessons/Topics Details:

- Concepts, Theory, Mental Models, Frameworks, Methods, Ideas, and Required Background Knowledge:
  - Concept 1: Description
  - Theory 1: Description
  - Mental Model 1: Description
  - Framework 1: Description
  - ...

- Specific Anecdotes or Stories:
  - Anecdote 1: Short summary
  - Anecdote 2: Short summary
  - ...

- Action Items, Key Takeaways, and How-to's:
  - Action Item 1: Step-by-step instructions
  - Action Item 2: Step-by-step instructions
  - ...

</markdown>

"#;

/// Substitute the transcript into every `{transcript}` in the template.
///
/// Replacement is a single literal pass: placeholder text that arrives inside
/// the transcript itself is left as-is.
pub fn render_prompt(template: &str, transcript: &str) -> String {
    template.replace(TRANSCRIPT_PLACEHOLDER, transcript)
}

/// Something a template is missing for the extraction pipeline to work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateIssue {
    MissingPlaceholder,
    MissingMarkdownMarkers,
}

impl TemplateIssue {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingPlaceholder => {
                "Template has no {transcript} placeholder; the transcript will not be sent."
            }
            Self::MissingMarkdownMarkers => {
                "Template never mentions <markdown></markdown>; the answer cannot be extracted."
            }
        }
    }
}

/// Report the template conventions a prompt is missing.
pub fn check_template(template: &str) -> Vec<TemplateIssue> {
    let mut issues = Vec::new();

    if !template.contains(TRANSCRIPT_PLACEHOLDER) {
        issues.push(TemplateIssue::MissingPlaceholder);
    }

    let lower = template.to_lowercase();
    if !lower.contains(MARKDOWN_OPEN) || !lower.contains(MARKDOWN_CLOSE) {
        issues.push(TemplateIssue::MissingMarkdownMarkers);
    }

    issues
}
