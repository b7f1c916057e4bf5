//! Extraction pipeline orchestration

use anyhow::Result;

use crate::config::Settings;
use crate::llm::{build_provider, extract_payload, render_prompt, LlmProvider};
use crate::pipeline::Session;
use crate::youtube::{
    extract_video_id, join_fragments, TranscriptFragment, TranscriptSource, YoutubeTranscripts,
};
use crate::LessonsError;

/// How a single extraction run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Lessons markdown pulled from the model's answer
    Success(String),

    /// The URL could not be parsed or the transcript was unavailable or empty
    FailedAtTranscript(LessonsError),

    /// The model call failed or its answer had no usable `<markdown>` block
    FailedAtExtraction(LessonsError),
}

/// URL in, lessons out.
pub struct LessonsPipeline {
    transcripts: Box<dyn TranscriptSource>,
    llm: Box<dyn LlmProvider>,
}

impl LessonsPipeline {
    pub fn new(transcripts: Box<dyn TranscriptSource>, llm: Box<dyn LlmProvider>) -> Self {
        Self { transcripts, llm }
    }

    /// Create the pipeline against the real YouTube and Gemini services.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let transcripts = YoutubeTranscripts::from_settings(&settings.transcript)?;
        let llm = build_provider(settings)?;
        Ok(Self::new(Box::new(transcripts), llm))
    }

    /// Resolve the URL and fetch the raw caption fragments.
    pub async fn fetch_fragments(&self, url: &str) -> crate::Result<Vec<TranscriptFragment>> {
        let video_id = extract_video_id(url)?;

        self.transcripts.fetch(&video_id).await.map_err(|e| {
            let reason = format!("{:#}", e);
            tracing::warn!(video_id = %video_id, error = %reason, "Transcript fetch failed");
            LessonsError::TranscriptUnavailable { reason }
        })
    }

    /// First stage: URL to joined transcript text.
    ///
    /// The result, or its absence on failure, is remembered on the session.
    pub async fn fetch_transcript(
        &self,
        session: &mut Session,
        url: &str,
    ) -> crate::Result<String> {
        let result = self.fetch_fragments(url).await.and_then(|fragments| {
            let transcript = join_fragments(&fragments);
            if transcript.is_empty() {
                tracing::warn!(url = %url, "Transcript has no text");
                return Err(LessonsError::TranscriptUnavailable {
                    reason: "transcript is empty".to_string(),
                });
            }
            Ok(transcript)
        });
        session.last_transcript = result.as_ref().ok().cloned();
        result
    }

    /// Second stage: render the session template, ask the model, pull out the
    /// `<markdown>` block. A blank block counts as missing.
    pub async fn extract_lessons(
        &self,
        session: &Session,
        transcript: &str,
    ) -> crate::Result<String> {
        let prompt = render_prompt(&session.custom_prompt, transcript);

        let raw = self
            .llm
            .generate(&session.api_key, &prompt)
            .await
            .map_err(|e| {
                let reason = format!("{:#}", e);
                tracing::warn!(error = %reason, "Summary request failed");
                LessonsError::GenerationFailed { reason }
            })?;

        match extract_payload(&raw) {
            Some(lessons) if !lessons.is_empty() => Ok(lessons),
            Some(_) => {
                tracing::warn!("Response had an empty <markdown> block");
                Err(LessonsError::PayloadMissing)
            }
            None => {
                tracing::warn!(response_chars = raw.len(), "Response had no <markdown> block");
                Err(LessonsError::PayloadMissing)
            }
        }
    }

    /// Run both stages for one URL.
    pub async fn run(&self, session: &mut Session, url: &str) -> RunOutcome {
        let transcript = match self.fetch_transcript(session, url).await {
            Ok(transcript) => transcript,
            Err(e) => return RunOutcome::FailedAtTranscript(e),
        };

        match self.extract_lessons(session, &transcript).await {
            Ok(lessons) => RunOutcome::Success(lessons),
            Err(e) => RunOutcome::FailedAtExtraction(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    use crate::youtube::VideoId;

    struct FixedTranscript(Option<Vec<&'static str>>);

    #[async_trait]
    impl TranscriptSource for FixedTranscript {
        async fn fetch(&self, _video_id: &VideoId) -> Result<Vec<TranscriptFragment>> {
            match &self.0 {
                Some(texts) => Ok(texts
                    .iter()
                    .enumerate()
                    .map(|(i, t)| TranscriptFragment::new(*t, i as f64, 1.0))
                    .collect()),
                None => anyhow::bail!("Transcripts are disabled"),
            }
        }
    }

    /// Records the prompts it receives and answers with a fixed reply.
    struct ScriptedLlm {
        reply: Option<&'static str>,
        prompts: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl ScriptedLlm {
        fn replying(reply: Option<&'static str>) -> Self {
            Self {
                reply,
                prompts: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedLlm {
        async fn generate(&self, api_key: &str, prompt: &str) -> Result<String> {
            self.prompts
                .lock()
                .unwrap()
                .push((api_key.to_string(), prompt.to_string()));
            match self.reply {
                Some(reply) => Ok(reply.to_string()),
                None => anyhow::bail!("quota exceeded"),
            }
        }
    }

    fn pipeline(texts: Option<Vec<&'static str>>, reply: Option<&'static str>) -> LessonsPipeline {
        LessonsPipeline::new(
            Box::new(FixedTranscript(texts)),
            Box::new(ScriptedLlm::replying(reply)),
        )
    }

    fn session() -> Session {
        Session::new("key-1".to_string(), "Lessons for: {transcript}".to_string())
    }

    #[tokio::test]
    async fn successful_run_returns_payload() {
        let pipeline = pipeline(
            Some(vec!["Hello", "world"]),
            Some("Sure <markdown>\n- lesson\n</markdown>"),
        );
        let mut session = session();

        let outcome = pipeline.run(&mut session, "https://youtube.com/watch?v=abc").await;

        assert!(matches!(outcome, RunOutcome::Success(ref s) if s == "- lesson"));
        assert_eq!(session.last_transcript.as_deref(), Some("Hello world"));
    }

    #[tokio::test]
    async fn renders_session_prompt_with_session_key() {
        let llm = ScriptedLlm::replying(Some("<markdown>ok</markdown>"));
        let prompts = Arc::clone(&llm.prompts);
        let pipeline = LessonsPipeline::new(
            Box::new(FixedTranscript(Some(vec!["hi"]))),
            Box::new(llm),
        );
        let session = Session::new("key-2".to_string(), "Say {transcript}".to_string());

        let lessons = pipeline.extract_lessons(&session, "hi").await.unwrap();

        assert_eq!(lessons, "ok");
        assert_eq!(
            prompts.lock().unwrap().as_slice(),
            &[("key-2".to_string(), "Say hi".to_string())]
        );
    }

    #[tokio::test]
    async fn bad_url_fails_at_transcript_stage() {
        let pipeline = pipeline(Some(vec!["unused"]), Some("<markdown>x</markdown>"));
        let mut session = session();

        let outcome = pipeline.run(&mut session, "https://youtu.be/abc").await;

        assert!(matches!(
            outcome,
            RunOutcome::FailedAtTranscript(LessonsError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn fetch_failure_keeps_key_and_prompt() {
        let pipeline = pipeline(None, Some("<markdown>x</markdown>"));
        let mut session = session();
        session.last_transcript = Some("previous".to_string());
        let before = session.clone();

        let outcome = pipeline.run(&mut session, "https://youtube.com/watch?v=abc").await;

        assert!(matches!(
            outcome,
            RunOutcome::FailedAtTranscript(LessonsError::TranscriptUnavailable { .. })
        ));
        assert_eq!(session.api_key, before.api_key);
        assert_eq!(session.custom_prompt, before.custom_prompt);
        assert!(session.last_transcript.is_none());
    }

    #[tokio::test]
    async fn api_failure_fails_at_extraction_stage() {
        let pipeline = pipeline(Some(vec!["text"]), None);
        let mut session = session();

        let outcome = pipeline.run(&mut session, "watch?v=abc").await;

        match outcome {
            RunOutcome::FailedAtExtraction(e @ LessonsError::GenerationFailed { .. }) => {
                assert_eq!(e.reason(), Some("quota exceeded"));
                assert_eq!(e.to_string(), "API call failed.");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_markers_fail_at_extraction_stage() {
        let pipeline = pipeline(Some(vec!["text"]), Some("no tags at all"));
        let mut session = session();

        let outcome = pipeline.run(&mut session, "watch?v=abc").await;

        assert!(matches!(
            outcome,
            RunOutcome::FailedAtExtraction(LessonsError::PayloadMissing)
        ));
        assert_eq!(session.last_transcript.as_deref(), Some("text"));
    }

    #[tokio::test]
    async fn empty_transcript_fails_before_calling_the_model() {
        let llm = ScriptedLlm::replying(Some("<markdown>x</markdown>"));
        let prompts = Arc::clone(&llm.prompts);
        let pipeline = LessonsPipeline::new(Box::new(FixedTranscript(Some(vec![]))), Box::new(llm));
        let mut session = session();

        let outcome = pipeline.run(&mut session, "watch?v=abc").await;

        match outcome {
            RunOutcome::FailedAtTranscript(e @ LessonsError::TranscriptUnavailable { .. }) => {
                assert_eq!(e.reason(), Some("transcript is empty"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(session.last_transcript.is_none());
        assert!(prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_payload_fails_at_extraction_stage() {
        let pipeline = pipeline(Some(vec!["text"]), Some("<markdown>   \n  </markdown>"));
        let mut session = session();

        let outcome = pipeline.run(&mut session, "watch?v=abc").await;

        assert!(matches!(
            outcome,
            RunOutcome::FailedAtExtraction(LessonsError::PayloadMissing)
        ));
    }
}
