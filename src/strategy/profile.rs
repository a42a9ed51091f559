//! Playback target description.

use serde::{Deserialize, Serialize};

/// Video codecs the PS4 media player plays without re-encoding.
pub const ALLOWED_VIDEO_CODECS: &[&str] = &["h264"];

/// Audio codecs the PS4 media player plays without re-encoding.
pub const ALLOWED_AUDIO_CODECS: &[&str] = &["aac"];

/// Language tags treated as English. Compared case-sensitively.
pub const PREFERRED_LANGUAGES: &[&str] = &["eng", "english"];

/// Channel layout preferred for audio.
pub const PREFERRED_CHANNEL_LAYOUT: &str = "stereo";

/// What the playback target accepts, and which audio it prefers.
///
/// The default is the PS4 media player. All comparisons are exact string
/// matches against the names ffprobe reports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetProfile {
    #[serde(default = "default_video_codecs")]
    pub video_codecs: Vec<String>,

    #[serde(default = "default_audio_codecs")]
    pub audio_codecs: Vec<String>,

    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    #[serde(default = "default_channel_layout")]
    pub channel_layout: String,
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_video_codecs() -> Vec<String> {
    to_strings(ALLOWED_VIDEO_CODECS)
}

fn default_audio_codecs() -> Vec<String> {
    to_strings(ALLOWED_AUDIO_CODECS)
}

fn default_languages() -> Vec<String> {
    to_strings(PREFERRED_LANGUAGES)
}

fn default_channel_layout() -> String {
    PREFERRED_CHANNEL_LAYOUT.to_string()
}

impl Default for TargetProfile {
    fn default() -> Self {
        Self {
            video_codecs: default_video_codecs(),
            audio_codecs: default_audio_codecs(),
            languages: default_languages(),
            channel_layout: default_channel_layout(),
        }
    }
}

impl TargetProfile {
    pub fn allows_video(&self, codec_name: &str) -> bool {
        self.video_codecs.iter().any(|c| c == codec_name)
    }

    pub fn allows_audio(&self, codec_name: &str) -> bool {
        self.audio_codecs.iter().any(|c| c == codec_name)
    }

    pub fn prefers_language(&self, language: Option<&str>) -> bool {
        language.is_some_and(|lang| self.languages.iter().any(|l| l == lang))
    }

    pub fn prefers_layout(&self, channel_layout: Option<&str>) -> bool {
        channel_layout == Some(self.channel_layout.as_str())
    }
}
