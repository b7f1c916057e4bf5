//! Caption track metadata and timed-text parsing
//!
//! The player endpoint lists the caption tracks of a video; each track's
//! `baseUrl` serves a timed-text XML document of `<text>` elements.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::youtube::transcript::TranscriptFragment;

static TEXT_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<text\b([^>]*)>(.*?)</text>").expect("text element pattern is valid")
});
static ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\w+)="([^"]*)""#).expect("attribute pattern is valid"));
static INLINE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("inline tag pattern is valid"));

/// Subset of the innertube player response we read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerResponse {
    #[serde(default)]
    pub playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    pub captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayabilityStatus {
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Captions {
    pub player_captions_tracklist_renderer: Option<TrackList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackList {
    #[serde(default)]
    pub caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    /// Speech-recognition tracks are marked `kind: "asr"`.
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    /// Timed-text URL without the srv3 format override.
    pub fn xml_url(&self) -> String {
        self.base_url.replace("&fmt=srv3", "")
    }
}

impl PlayerResponse {
    pub fn caption_tracks(&self) -> Option<&[CaptionTrack]> {
        self.captions
            .as_ref()?
            .player_captions_tracklist_renderer
            .as_ref()
            .map(|list| list.caption_tracks.as_slice())
            .filter(|tracks| !tracks.is_empty())
    }
}

/// Pick a track for the first language that has one, preferring tracks
/// uploaded by the creator over generated ones.
pub(crate) fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[String],
) -> Option<&'a CaptionTrack> {
    languages.iter().find_map(|lang| {
        let matching = || tracks.iter().filter(move |t| &t.language_code == lang);
        matching()
            .find(|t| !t.is_generated())
            .or_else(|| matching().find(|t| t.is_generated()))
    })
}

/// Parse a timed-text document into fragments, in document order.
pub(crate) fn parse_timed_text(xml: &str) -> Vec<TranscriptFragment> {
    TEXT_ELEMENT
        .captures_iter(xml)
        .filter_map(|caps| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());

            // The XML layer and the caption text are escaped separately.
            let text = decode_entities(&decode_entities(body));
            let text = INLINE_TAG.replace_all(&text, "").trim().to_string();
            if text.is_empty() {
                return None;
            }

            Some(TranscriptFragment {
                text,
                start: attribute(attrs, "start").unwrap_or(0.0),
                duration: attribute(attrs, "dur").unwrap_or(0.0),
            })
        })
        .collect()
}

fn attribute(attrs: &str, name: &str) -> Option<f64> {
    ATTRIBUTE
        .captures_iter(attrs)
        .find(|caps| &caps[1] == name)
        .and_then(|caps| caps[2].parse().ok())
}

/// Decode one level of XML/HTML character references.
fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&rest[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}
