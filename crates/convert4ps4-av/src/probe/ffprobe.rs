//! FFprobe-based [`Prober`] implementation.
//!
//! Shells out to `ffprobe -v quiet -print_format json -show_format -show_streams`
//! and maps the JSON output into [`ContainerInfo`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::types::{ContainerInfo, StreamDescriptor, StreamKind};
use super::Prober;
use crate::command::ToolCommand;
use crate::tools::FFPROBE;
use crate::{Error, Result};

/// A prober backed by the `ffprobe` CLI.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    ffprobe_path: PathBuf,
}

impl FfprobeProber {
    /// Create a new prober using the given ffprobe path.
    pub fn new(ffprobe_path: PathBuf) -> Self {
        Self { ffprobe_path }
    }

    /// The command this prober runs for `path`.
    pub fn command(&self, path: &Path) -> ToolCommand {
        let mut cmd = ToolCommand::new(self.ffprobe_path.clone());
        cmd.args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ]);
        cmd.arg(path);
        cmd
    }
}

impl Prober for FfprobeProber {
    fn name(&self) -> &'static str {
        FFPROBE
    }

    fn probe(&self, path: &Path) -> Result<ContainerInfo> {
        let output = self.command(path).output()?;
        parse_ffprobe_json(path, &output.stdout)
    }
}

// ---------------------------------------------------------------------------
// JSON structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    format_name: Option<String>,
    format_long_name: Option<String>,
    duration: Option<String>,
    size: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: u32,
    codec_type: Option<String>,
    codec_name: Option<String>,
    channel_layout: Option<String>,
    #[serde(default)]
    tags: FfprobeTags,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    language: Option<String>,
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse the JSON document printed by ffprobe for `path`.
///
/// # Errors
///
/// Returns [`Error::ParseError`] if the document is empty, is not JSON, or
/// lacks the `format` section or a stream `index`.
pub fn parse_ffprobe_json(path: &Path, json: &str) -> Result<ContainerInfo> {
    if json.trim().is_empty() {
        return Err(Error::parse_error(FFPROBE, "empty output"));
    }

    let ff: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| Error::parse_error(FFPROBE, format!("JSON parse error: {e}")))?;

    Ok(parse_ffprobe_output(path, ff))
}

fn parse_ffprobe_output(path: &Path, output: FfprobeOutput) -> ContainerInfo {
    let duration = output
        .format
        .duration
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64);

    let size = output.format.size.and_then(|s| s.parse::<u64>().ok());

    let streams = output
        .streams
        .into_iter()
        .map(|stream| {
            let kind = map_stream_kind(stream.codec_type.as_deref().unwrap_or(""));
            StreamDescriptor {
                index: stream.index,
                kind,
                codec_name: stream.codec_name.unwrap_or_default(),
                channel_layout: if kind == StreamKind::Audio {
                    stream.channel_layout
                } else {
                    None
                },
                language: stream.tags.language,
            }
        })
        .collect();

    ContainerInfo {
        file_path: path.to_path_buf(),
        format_name: output.format.format_name.unwrap_or_default(),
        format_long_name: output.format.format_long_name,
        duration,
        size,
        streams,
    }
}

fn map_stream_kind(codec_type: &str) -> StreamKind {
    match codec_type {
        "video" => StreamKind::Video,
        "audio" => StreamKind::Audio,
        _ => StreamKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MKV_OUTPUT: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "hevc",
                "codec_type": "video",
                "width": 1920,
                "height": 1080,
                "tags": { "language": "eng" }
            },
            {
                "index": 1,
                "codec_name": "ac3",
                "codec_type": "audio",
                "channels": 6,
                "channel_layout": "5.1(side)",
                "tags": { "language": "eng", "title": "Surround" }
            },
            {
                "index": 2,
                "codec_name": "aac",
                "codec_type": "audio",
                "channels": 2,
                "channel_layout": "stereo"
            },
            {
                "index": 3,
                "codec_name": "subrip",
                "codec_type": "subtitle",
                "tags": { "language": "spa" }
            },
            {
                "index": 4,
                "codec_type": "attachment"
            }
        ],
        "format": {
            "filename": "/media/movie.mkv",
            "nb_streams": 5,
            "format_name": "matroska,webm",
            "format_long_name": "Matroska / WebM",
            "duration": "5423.104000",
            "size": "2147483648"
        }
    }"#;

    #[test]
    fn parses_streams_in_container_order() {
        let info = parse_ffprobe_json(Path::new("/media/movie.mkv"), MKV_OUTPUT).unwrap();

        assert_eq!(info.file_path, PathBuf::from("/media/movie.mkv"));
        assert_eq!(info.format_name, "matroska,webm");
        assert_eq!(info.format_long_name.as_deref(), Some("Matroska / WebM"));
        assert_eq!(info.size, Some(2_147_483_648));
        assert_eq!(info.duration.map(|d| d.as_secs()), Some(5423));

        let kinds: Vec<StreamKind> = info.streams.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StreamKind::Video,
                StreamKind::Audio,
                StreamKind::Audio,
                StreamKind::Other,
                StreamKind::Other,
            ]
        );
    }

    #[test]
    fn audio_fields_are_mapped() {
        let info = parse_ffprobe_json(Path::new("movie.mkv"), MKV_OUTPUT).unwrap();

        let surround = &info.streams[1];
        assert_eq!(surround.codec_name, "ac3");
        assert_eq!(surround.channel_layout.as_deref(), Some("5.1(side)"));
        assert_eq!(surround.language.as_deref(), Some("eng"));

        let stereo = &info.streams[2];
        assert_eq!(stereo.channel_layout.as_deref(), Some("stereo"));
        assert!(stereo.language.is_none());
    }

    #[test]
    fn missing_codec_name_is_empty() {
        let info = parse_ffprobe_json(Path::new("movie.mkv"), MKV_OUTPUT).unwrap();
        assert_eq!(info.streams[4].codec_name, "");
    }

    #[test]
    fn channel_layout_only_kept_for_audio() {
        let json = r#"{
            "format": { "format_name": "mov,mp4,m4a,3gp,3g2,mj2" },
            "streams": [
                { "index": 0, "codec_type": "video", "codec_name": "h264", "channel_layout": "stereo" }
            ]
        }"#;
        let info = parse_ffprobe_json(Path::new("clip.mp4"), json).unwrap();
        assert!(info.streams[0].channel_layout.is_none());
    }

    #[test]
    fn language_tag_is_not_case_folded() {
        let json = r#"{
            "format": {},
            "streams": [
                { "index": 0, "codec_type": "audio", "codec_name": "aac", "tags": { "language": "ENG" } }
            ]
        }"#;
        let info = parse_ffprobe_json(Path::new("clip.mp4"), json).unwrap();
        assert_eq!(info.streams[0].language.as_deref(), Some("ENG"));
    }

    #[test]
    fn unparsable_format_numbers_become_none() {
        let json = r#"{
            "format": { "format_name": "avi", "duration": "N/A", "size": "big" }
        }"#;
        let info = parse_ffprobe_json(Path::new("clip.avi"), json).unwrap();
        assert!(info.duration.is_none());
        assert!(info.size.is_none());
        assert!(info.streams.is_empty());
    }

    #[test]
    fn empty_output_is_a_parse_error() {
        let err = parse_ffprobe_json(Path::new("x.mkv"), "  \n").unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_ffprobe_json(Path::new("x.mkv"), "{\"format\": ").unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
    }

    #[test]
    fn missing_format_section_is_a_parse_error() {
        let err = parse_ffprobe_json(Path::new("x.mkv"), r#"{"streams": []}"#).unwrap_err();
        assert!(err.to_string().contains("ffprobe"));
    }

    #[test]
    fn stream_without_index_is_a_parse_error() {
        let json = r#"{ "format": {}, "streams": [ { "codec_type": "audio" } ] }"#;
        assert!(parse_ffprobe_json(Path::new("x.mkv"), json).is_err());
    }

    #[test]
    fn command_requests_quiet_json_with_format_and_streams() {
        let prober = FfprobeProber::new(PathBuf::from("ffprobe"));
        let cmd = prober.command(Path::new("/media/movie.mkv"));
        assert_eq!(
            cmd.to_string(),
            "ffprobe -v quiet -print_format json -show_format -show_streams /media/movie.mkv"
        );
    }

    #[test]
    fn probing_with_missing_binary_fails() {
        let prober = FfprobeProber::new(PathBuf::from("/nonexistent/ffprobe_xyz"));
        let err = prober.probe(Path::new("movie.mkv")).unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_name_is_probed() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("ffprobe");
        std::fs::write(
            &fake,
            "#!/bin/sh\nfor last; do :; done\n[ -f \"$last\" ] || exit 1\n\
             echo '{\"format\": {\"format_name\": \"matroska,webm\"}, \"streams\": []}'\n",
        )
        .unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let input = dir.path().join(OsStr::from_bytes(b"caf\xe9.mkv"));
        std::fs::write(&input, b"fake media").unwrap();

        let info = FfprobeProber::new(fake).probe(&input).unwrap();
        assert_eq!(info.format_name, "matroska,webm");
        assert_eq!(info.file_path, input);
    }
}
