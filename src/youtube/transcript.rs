//! Transcript retrieval from YouTube captions

use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, COOKIE};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::TranscriptSettings;
use crate::youtube::captions::{parse_timed_text, select_track, PlayerResponse};
use crate::youtube::VideoId;

const DEFAULT_YOUTUBE_ENDPOINT: &str = "https://www.youtube.com";
const CONSENT_FORM_ACTION: &str = r#"action="https://consent.youtube.com/s""#;
const RECAPTCHA_MARKER: &str = r#"class="g-recaptcha""#;

static INNERTUBE_API_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("api key pattern is valid")
});
static CONSENT_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"name="v" value="(.*?)""#).expect("consent pattern is valid"));

/// One timed caption unit.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptFragment {
    pub text: String,
    /// Offset from the start of the video, in seconds
    pub start: f64,
    /// Seconds the caption stays on screen
    pub duration: f64,
}

impl TranscriptFragment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Join fragment texts with single spaces, keeping service order.
pub fn join_fragments(fragments: &[TranscriptFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Anything that can produce the caption fragments of a video.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<TranscriptFragment>>;
}

/// Reasons a transcript could not be retrieved.
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("YouTube is rate limiting this IP (captcha page returned)")]
    TooManyRequests,

    #[error("YouTube kept answering with its cookie consent page")]
    ConsentRequired,

    #[error("Video {0} is unavailable")]
    VideoUnavailable(String),

    #[error("Video {video_id} is not playable ({status}): {reason}")]
    Unplayable {
        video_id: String,
        status: String,
        reason: String,
    },

    #[error("Transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("No transcript for video {video_id} in languages [{}]", .languages.join(", "))]
    NoTranscriptFound {
        video_id: String,
        languages: Vec<String>,
    },

    #[error("Request to YouTube failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Caption client speaking to the YouTube web and innertube endpoints.
pub struct YoutubeTranscripts {
    http: Client,
    endpoint: String,
    languages: Vec<String>,
}

impl YoutubeTranscripts {
    pub fn from_settings(settings: &TranscriptSettings) -> Result<Self> {
        let endpoint = if settings.endpoint.trim().is_empty() {
            DEFAULT_YOUTUBE_ENDPOINT.to_string()
        } else {
            settings.endpoint.trim().trim_end_matches('/').to_string()
        };

        let languages = if settings.languages.is_empty() {
            vec!["en".to_string()]
        } else {
            settings.languages.clone()
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            languages,
        })
    }

    /// Fetch the fragments of the best matching caption track.
    pub async fn fetch_fragments(
        &self,
        video_id: &VideoId,
    ) -> std::result::Result<Vec<TranscriptFragment>, TranscriptError> {
        let html = self.fetch_watch_page(video_id).await?;

        let api_key = INNERTUBE_API_KEY
            .captures(&html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| TranscriptError::VideoUnavailable(video_id.to_string()))?;

        let player = self.fetch_player(video_id, &api_key).await?;

        if let Some(status) = &player.playability_status {
            if status.status != "OK" {
                return Err(TranscriptError::Unplayable {
                    video_id: video_id.to_string(),
                    status: status.status.clone(),
                    reason: status.reason.clone().unwrap_or_default(),
                });
            }
        }

        let tracks = player
            .caption_tracks()
            .ok_or_else(|| TranscriptError::TranscriptsDisabled(video_id.to_string()))?;

        let track = select_track(tracks, &self.languages).ok_or_else(|| {
            TranscriptError::NoTranscriptFound {
                video_id: video_id.to_string(),
                languages: self.languages.clone(),
            }
        })?;

        tracing::debug!(
            video_id = %video_id,
            language = %track.language_code,
            generated = track.is_generated(),
            "Selected caption track"
        );

        let xml = self
            .http
            .get(track.xml_url())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(parse_timed_text(&xml))
    }

    async fn fetch_watch_page(
        &self,
        video_id: &VideoId,
    ) -> std::result::Result<String, TranscriptError> {
        let mut html = self.get_watch_html(video_id, None).await?;

        if html.contains(CONSENT_FORM_ACTION) {
            let value = CONSENT_VALUE
                .captures(&html)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .ok_or(TranscriptError::ConsentRequired)?;

            tracing::debug!("Accepting YouTube cookie consent");
            let cookie = format!("CONSENT=YES+{}", value);
            html = self.get_watch_html(video_id, Some(&cookie)).await?;

            if html.contains(CONSENT_FORM_ACTION) {
                return Err(TranscriptError::ConsentRequired);
            }
        }

        if html.contains(RECAPTCHA_MARKER) {
            return Err(TranscriptError::TooManyRequests);
        }

        Ok(html)
    }

    async fn get_watch_html(
        &self,
        video_id: &VideoId,
        cookie: Option<&str>,
    ) -> std::result::Result<String, TranscriptError> {
        let mut request = self
            .http
            .get(format!("{}/watch", self.endpoint))
            .query(&[("v", video_id.as_str())]);

        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        Ok(request.send().await?.error_for_status()?.text().await?)
    }

    async fn fetch_player(
        &self,
        video_id: &VideoId,
        api_key: &str,
    ) -> std::result::Result<PlayerResponse, TranscriptError> {
        let body = PlayerRequest {
            context: InnertubeContext {
                client: InnertubeClient {
                    client_name: "ANDROID",
                    client_version: "20.10.38",
                },
            },
            video_id: video_id.as_str(),
        };

        let response = self
            .http
            .post(format!("{}/youtubei/v1/player", self.endpoint))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscripts {
    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<TranscriptFragment>> {
        tracing::info!(video_id = %video_id, "Fetching transcript");
        let fragments = self.fetch_fragments(video_id).await?;
        tracing::info!(video_id = %video_id, fragments = fragments.len(), "Transcript fetched");
        Ok(fragments)
    }
}

#[derive(Serialize)]
struct PlayerRequest<'a> {
    context: InnertubeContext,
    #[serde(rename = "videoId")]
    video_id: &'a str,
}

#[derive(Serialize)]
struct InnertubeContext {
    client: InnertubeClient,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InnertubeClient {
    client_name: &'static str,
    client_version: &'static str,
}
