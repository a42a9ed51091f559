use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use crate::strategy::TargetProfile;
pub use convert4ps4_av::ToolsConfig;

/// Marker inserted between the input's base name and its extension.
pub const DEFAULT_MARKER: &str = "_converted_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetProfile,

    #[serde(default)]
    pub encoder: EncoderConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

/// How incompatible streams are re-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EncoderConfig {
    /// ffmpeg encoder used when the video stream must be transcoded.
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// ffmpeg encoder used when the audio stream must be transcoded.
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Channel count for transcoded audio (`-ac`).
    #[serde(default = "default_audio_channels")]
    pub audio_channels: u8,

    /// Bitrate for transcoded audio (`-ab`).
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_audio_channels() -> u8 {
    2
}

fn default_audio_bitrate() -> String {
    "192k".to_string()
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            audio_channels: default_audio_channels(),
            audio_bitrate: default_audio_bitrate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Output directory. The `C4PS4_TARGET` environment variable takes
    /// precedence; the current directory is used when neither is set.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            marker: default_marker(),
        }
    }
}
