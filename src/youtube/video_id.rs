//! Video id extraction from pasted URLs

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::LessonsError;

static VIDEO_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"v=([A-Za-z0-9_-]+)").expect("video id pattern is valid"));

/// Identifier YouTube uses to look up a video's captions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Find the first `v=<id>` in the input.
///
/// Only the `v=` query form is recognised; short links such as `youtu.be/<id>`
/// are rejected.
pub fn extract_video_id(url: &str) -> Result<VideoId, LessonsError> {
    VIDEO_PARAM
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
        .ok_or_else(|| LessonsError::InvalidUrl(url.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_watch_url_id() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn stops_at_first_character_outside_the_id_set() {
        let id = extract_video_id("https://youtube.com/watch?v=abc_DEF-123&t=42s").unwrap();
        assert_eq!(id.to_string(), "abc_DEF-123");
    }

    #[test]
    fn v_param_need_not_be_first() {
        let id = extract_video_id("https://m.youtube.com/watch?feature=share&v=XYZ").unwrap();
        assert_eq!(id.as_str(), "XYZ");
    }

    #[test]
    fn first_match_wins() {
        let id = extract_video_id("watch?v=first&v=second").unwrap();
        assert_eq!(id.as_str(), "first");
    }

    #[test]
    fn url_without_v_param_fails() {
        let err = extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap_err();
        assert!(matches!(err, LessonsError::InvalidUrl(_)));

        assert!(extract_video_id("").is_err());
        assert!(extract_video_id("https://youtube.com/watch?v=").is_err());
    }
}
