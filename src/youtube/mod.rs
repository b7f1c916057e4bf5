//! YouTube module for yt-lessons
//!
//! Turns a pasted URL into a video id and the video id into caption text.

mod captions;
mod transcript;
mod video_id;

pub use transcript::{
    join_fragments, TranscriptError, TranscriptFragment, TranscriptSource, YoutubeTranscripts,
};
pub use video_id::{extract_video_id, VideoId};
