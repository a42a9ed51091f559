//! Stream selection.
//!
//! Picks one video and one audio stream from a probed container and decides,
//! for each, whether it can be copied as-is or has to be re-encoded for the
//! [`TargetProfile`].

mod profile;

pub use profile::{
    TargetProfile, ALLOWED_AUDIO_CODECS, ALLOWED_VIDEO_CODECS, PREFERRED_CHANNEL_LAYOUT,
    PREFERRED_LANGUAGES,
};

use crate::{Error, Result};
use convert4ps4_av::{ContainerInfo, StreamDescriptor};
use serde::Serialize;

/// One selected stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreamChoice {
    /// Container stream index.
    pub index: u32,
    pub needs_transcode: bool,
}

impl StreamChoice {
    pub fn passthrough(index: u32) -> Self {
        Self {
            index,
            needs_transcode: false,
        }
    }

    pub fn transcode(index: u32) -> Self {
        Self {
            index,
            needs_transcode: true,
        }
    }
}

/// The streams to keep and what to do with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionResult {
    pub video: StreamChoice,
    pub audio: StreamChoice,
}

/// Choose the video and audio streams for `info`.
///
/// # Errors
///
/// [`Error::NoVideoStream`] or [`Error::NoSuitableAudio`] when the container
/// lacks a stream of that kind.
pub fn select_streams(info: &ContainerInfo, profile: &TargetProfile) -> Result<SelectionResult> {
    let video = select_video(info, profile)?;
    let audio = select_audio(info, profile)?;

    tracing::info!(
        "selected video #{} {} ({}), audio #{} {} ({})",
        video.index,
        codec_of(info, video),
        action(video),
        audio.index,
        codec_of(info, audio),
        action(audio)
    );

    Ok(SelectionResult { video, audio })
}

fn codec_of(info: &ContainerInfo, choice: StreamChoice) -> &str {
    info.stream(choice.index)
        .map(|s| s.codec_name.as_str())
        .unwrap_or("?")
}

fn action(choice: StreamChoice) -> &'static str {
    if choice.needs_transcode {
        "transcode"
    } else {
        "copy"
    }
}

/// First allow-listed video stream, else the last video stream marked for
/// transcoding.
pub fn select_video(info: &ContainerInfo, profile: &TargetProfile) -> Result<StreamChoice> {
    let mut last_seen = None;

    for stream in info.video_streams() {
        tracing::debug!(
            "found video stream #{}, codec: {}",
            stream.index,
            stream.codec_name
        );
        if profile.allows_video(&stream.codec_name) {
            return Ok(StreamChoice::passthrough(stream.index));
        }
        last_seen = Some(stream.index);
    }

    last_seen
        .map(StreamChoice::transcode)
        .ok_or_else(|| Error::NoVideoStream {
            path: info.file_path.clone(),
        })
}

/// Narrow the audio streams by language, then channel layout, then codec.
///
/// A stage that would leave no candidates is skipped. Ties go to the stream
/// that comes first in the container.
pub fn select_audio(info: &ContainerInfo, profile: &TargetProfile) -> Result<StreamChoice> {
    let candidates: Vec<&StreamDescriptor> = info.audio_streams().collect();
    tracing::debug!("{} audio candidates", candidates.len());

    let candidates = narrow(candidates, |s| {
        profile.prefers_language(s.language.as_deref())
    });
    let candidates = narrow(candidates, |s| {
        profile.prefers_layout(s.channel_layout.as_deref())
    });

    let Some(first) = candidates.first() else {
        return Err(Error::NoSuitableAudio {
            path: info.file_path.clone(),
        });
    };

    match candidates
        .iter()
        .find(|s| profile.allows_audio(&s.codec_name))
    {
        Some(good) => Ok(StreamChoice::passthrough(good.index)),
        None => Ok(StreamChoice::transcode(first.index)),
    }
}

/// Keep the candidates matching `pred`, unless none do.
fn narrow<'a>(
    candidates: Vec<&'a StreamDescriptor>,
    pred: impl Fn(&StreamDescriptor) -> bool,
) -> Vec<&'a StreamDescriptor> {
    let narrowed: Vec<&StreamDescriptor> =
        candidates.iter().copied().filter(|s| pred(s)).collect();

    if narrowed.is_empty() {
        candidates
    } else {
        tracing::debug!(
            "narrowed audio candidates from {} to {}",
            candidates.len(),
            narrowed.len()
        );
        narrowed
    }
}
