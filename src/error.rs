//! Error type for the convert4ps4 run.
//!
//! Every variant is fatal: the run stops at the point of detection and the
//! binary exits non-zero with the rendered message.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort a conversion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `ffmpeg` or `ffprobe` could not be located.
    #[error("{tool} not found in the system")]
    ToolMissing { tool: String },

    /// The input path is not a regular file.
    #[error("{} doesn't look like a valid input file", path.display())]
    InvalidInput { path: PathBuf },

    /// The output directory does not exist or is not a directory.
    #[error("{} doesn't look like a good target directory", path.display())]
    InvalidOutputDirectory { path: PathBuf },

    /// Running ffprobe failed or its output could not be parsed.
    #[error("probe failed: {0}")]
    ProbeFailure(convert4ps4_av::Error),

    /// The container has no video stream at all.
    #[error("no video stream found in {}", path.display())]
    NoVideoStream { path: PathBuf },

    /// The container has no audio stream at all.
    #[error("no suitable audio stream found in {}", path.display())]
    NoSuitableAudio { path: PathBuf },

    /// The output file is already there and overwriting was not requested.
    #[error("{} already exists (use --overwrite to replace it)", path.display())]
    OutputExists { path: PathBuf },

    /// ffmpeg failed, or its output could not be moved into place.
    #[error("encoding failed: {0}")]
    EncodeFailure(convert4ps4_av::Error),

    /// The configuration file is unreadable or inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<convert4ps4_av::Error> for Error {
    fn from(err: convert4ps4_av::Error) -> Self {
        match err {
            convert4ps4_av::Error::ToolNotFound { tool } => Error::ToolMissing { tool },
            other => Error::ProbeFailure(other),
        }
    }
}
