//! ffmpeg invocation for a stream selection.

use crate::config::EncoderConfig;
use crate::strategy::{SelectionResult, StreamChoice};
use convert4ps4_av::ToolCommand;
use std::ffi::OsString;
use std::path::Path;

/// What ffmpeg does with one selected stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecDirective {
    /// Pass the stream through untouched.
    Copy,
    /// Re-encode with `codec`, followed by extra encoder `options`.
    Transcode { codec: String, options: Vec<String> },
}

impl CodecDirective {
    /// The value given to `-vcodec` / `-acodec`.
    pub fn codec(&self) -> &str {
        match self {
            CodecDirective::Copy => "copy",
            CodecDirective::Transcode { codec, .. } => codec,
        }
    }

    fn options(&self) -> &[String] {
        match self {
            CodecDirective::Copy => &[],
            CodecDirective::Transcode { options, .. } => options,
        }
    }
}

/// Stream mapping plus per-stream codec directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodePlan {
    pub video_index: u32,
    pub audio_index: u32,
    pub video: CodecDirective,
    pub audio: CodecDirective,
}

impl EncodePlan {
    /// Build the plan for `selection` using the transcode settings in `encoder`.
    pub fn new(selection: &SelectionResult, encoder: &EncoderConfig) -> Self {
        let video = directive(selection.video, || CodecDirective::Transcode {
            codec: encoder.video_codec.clone(),
            options: Vec::new(),
        });
        let audio = directive(selection.audio, || CodecDirective::Transcode {
            codec: encoder.audio_codec.clone(),
            options: vec![
                "-ac".to_string(),
                encoder.audio_channels.to_string(),
                "-ab".to_string(),
                encoder.audio_bitrate.clone(),
            ],
        });

        Self {
            video_index: selection.video.index,
            audio_index: selection.audio.index,
            video,
            audio,
        }
    }

    /// True when both streams are copied and ffmpeg only remuxes.
    pub fn is_remux_only(&self) -> bool {
        self.video == CodecDirective::Copy && self.audio == CodecDirective::Copy
    }

    /// ffmpeg arguments reading `input` and writing `output`.
    pub fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-i".into(),
            input.into(),
            "-map".into(),
            format!("0:{}", self.video_index).into(),
            "-map".into(),
            format!("0:{}", self.audio_index).into(),
            "-vcodec".into(),
            self.video.codec().into(),
        ];
        args.extend(self.video.options().iter().map(OsString::from));
        args.push("-acodec".into());
        args.push(self.audio.codec().into());
        args.extend(self.audio.options().iter().map(OsString::from));
        args.push(output.into());
        args
    }

    /// The complete ffmpeg command.
    pub fn command(&self, ffmpeg: &Path, input: &Path, output: &Path) -> ToolCommand {
        let mut cmd = ToolCommand::new(ffmpeg.to_path_buf());
        cmd.args(self.args(input, output));
        cmd
    }
}

fn directive(choice: StreamChoice, transcode: impl FnOnce() -> CodecDirective) -> CodecDirective {
    if choice.needs_transcode {
        transcode()
    } else {
        CodecDirective::Copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(v: (u32, bool), a: (u32, bool)) -> SelectionResult {
        SelectionResult {
            video: StreamChoice {
                index: v.0,
                needs_transcode: v.1,
            },
            audio: StreamChoice {
                index: a.0,
                needs_transcode: a.1,
            },
        }
    }

    #[test]
    fn copy_both_streams() {
        let plan = EncodePlan::new(&selection((0, false), (2, false)), &EncoderConfig::default());
        assert!(plan.is_remux_only());

        let cmd = plan.command(Path::new("ffmpeg"), Path::new("in.mkv"), Path::new("out.mkv"));
        assert_eq!(
            cmd.to_string(),
            "ffmpeg -i in.mkv -map 0:0 -map 0:2 -vcodec copy -acodec copy out.mkv"
        );
    }

    #[test]
    fn transcode_audio_adds_channel_and_bitrate_options() {
        let plan = EncodePlan::new(&selection((0, false), (1, true)), &EncoderConfig::default());
        assert!(!plan.is_remux_only());

        let cmd = plan.command(Path::new("ffmpeg"), Path::new("in.mkv"), Path::new("out.mkv"));
        assert_eq!(
            cmd.to_string(),
            "ffmpeg -i in.mkv -map 0:0 -map 0:1 -vcodec copy -acodec aac -ac 2 -ab 192k out.mkv"
        );
    }

    #[test]
    fn transcode_video_uses_libx264_without_options() {
        let plan = EncodePlan::new(&selection((3, true), (1, false)), &EncoderConfig::default());
        assert_eq!(
            plan.video,
            CodecDirective::Transcode {
                codec: "libx264".to_string(),
                options: vec![],
            }
        );
        let args = plan.args(Path::new("in.avi"), Path::new("out.avi"));
        assert_eq!(
            args,
            vec![
                "-i", "in.avi", "-map", "0:3", "-map", "0:1", "-vcodec", "libx264", "-acodec",
                "copy", "out.avi"
            ]
        );
    }

    #[test]
    fn encoder_settings_are_honoured() {
        let encoder = EncoderConfig {
            video_codec: "h264_nvenc".to_string(),
            audio_codec: "libfdk_aac".to_string(),
            audio_channels: 6,
            audio_bitrate: "384k".to_string(),
        };
        let plan = EncodePlan::new(&selection((0, true), (1, true)), &encoder);
        assert_eq!(plan.video.codec(), "h264_nvenc");
        let args = plan.args(Path::new("a.mkv"), Path::new("b.mkv"));
        assert!(args.windows(2).any(|w| w == ["-ac", "6"]));
        assert!(args.windows(2).any(|w| w == ["-ab", "384k"]));
        assert!(args.windows(2).any(|w| w == ["-acodec", "libfdk_aac"]));
    }

    #[cfg(unix)]
    #[test]
    fn paths_are_passed_byte_for_byte() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new(OsStr::from_bytes(b"/in/caf\xe9.mkv"));
        let output = Path::new(OsStr::from_bytes(b"/out/caf\xe9_converted_.mkv"));
        let plan = EncodePlan::new(&selection((0, false), (1, false)), &EncoderConfig::default());

        let args = plan.args(input, output);
        assert_eq!(args[1].as_os_str(), input.as_os_str());
        assert_eq!(args.last().map(OsString::as_os_str), Some(output.as_os_str()));
    }
}
