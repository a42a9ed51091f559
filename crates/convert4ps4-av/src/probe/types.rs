//! Container and stream description types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// What kind of payload a stream carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    Video,
    Audio,
    /// Subtitles, attachments, data tracks and anything else.
    Other,
}

/// One track inside a container, as reported by the prober.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// Container stream index. Unique, not necessarily contiguous.
    pub index: u32,
    pub kind: StreamKind,
    /// Codec name as reported by ffprobe (e.g. "h264", "aac"). Empty if unknown.
    pub codec_name: String,
    /// Channel layout (e.g. "stereo", "5.1(side)"). Audio streams only.
    pub channel_layout: Option<String>,
    /// Language tag from the stream metadata (e.g. "eng").
    pub language: Option<String>,
}

/// Everything the prober learned about a media file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerInfo {
    /// Path that was probed.
    pub file_path: PathBuf,
    /// Short container format name (e.g. "matroska,webm").
    pub format_name: String,
    /// Descriptive format name (e.g. "Matroska / WebM").
    pub format_long_name: Option<String>,
    pub duration: Option<Duration>,
    /// File size in bytes, as reported by the prober.
    pub size: Option<u64>,
    /// Streams in container order.
    pub streams: Vec<StreamDescriptor>,
}

impl StreamDescriptor {
    pub fn is_video(&self) -> bool {
        self.kind == StreamKind::Video
    }

    pub fn is_audio(&self) -> bool {
        self.kind == StreamKind::Audio
    }
}

impl ContainerInfo {
    /// Video streams in container order.
    pub fn video_streams(&self) -> impl Iterator<Item = &StreamDescriptor> {
        self.streams.iter().filter(|s| s.is_video())
    }

    /// Audio streams in container order.
    pub fn audio_streams(&self) -> impl Iterator<Item = &StreamDescriptor> {
        self.streams.iter().filter(|s| s.is_audio())
    }

    /// Look up a stream by its container index.
    pub fn stream(&self, index: u32) -> Option<&StreamDescriptor> {
        self.streams.iter().find(|s| s.index == index)
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Video => write!(f, "video"),
            StreamKind::Audio => write!(f, "audio"),
            StreamKind::Other => write!(f, "other"),
        }
    }
}
