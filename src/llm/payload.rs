use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<markdown>(.*?)</markdown>").expect("markdown block pattern is valid")
});

/// Pull the answer out of the first `<markdown>...</markdown>` block.
///
/// Tags match case-insensitively and the content may span lines. Returns
/// `None` when no complete block exists; later blocks are ignored.
pub fn extract_payload(raw: &str) -> Option<String> {
    MARKDOWN_BLOCK
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_trimmed_content() {
        assert_eq!(
            extract_payload("noise<markdown>  content  </markdown>more").as_deref(),
            Some("content")
        );
    }

    #[test]
    fn tags_are_case_insensitive() {
        assert_eq!(
            extract_payload("<MARKDOWN>x</MARKDOWN>").as_deref(),
            Some("x")
        );
        assert_eq!(
            extract_payload("<Markdown>y</markDOWN>").as_deref(),
            Some("y")
        );
    }

    #[test]
    fn content_may_span_lines() {
        let raw = "Sure!\n<markdown>\n# Overview\n\n- point one\n- point two\n</markdown>\n";
        assert_eq!(
            extract_payload(raw).as_deref(),
            Some("# Overview\n\n- point one\n- point two")
        );
    }

    #[test]
    fn missing_markers_is_absent() {
        assert_eq!(extract_payload("just some text"), None);
        assert_eq!(extract_payload("<markdown>never closed"), None);
    }

    #[test]
    fn empty_block_is_present_but_empty() {
        assert_eq!(extract_payload("<markdown>   </markdown>").as_deref(), Some(""));
    }

    #[test]
    fn first_block_wins() {
        assert_eq!(
            extract_payload("<markdown>a</markdown><markdown>b</markdown>").as_deref(),
            Some("a")
        );
    }
}
