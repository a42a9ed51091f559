//! # convert4ps4-av
//!
//! External media tool plumbing for convert4ps4.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find `ffmpeg` and `ffprobe`,
//!   honouring configured path overrides.
//! - **Command execution** ([`ToolCommand`]) -- blocking builder for running
//!   external processes and rendering their command lines.
//! - **Probing** ([`probe::FfprobeProber`]) -- parse `ffprobe` JSON output into
//!   a [`ContainerInfo`].
//! - **Workspace management** ([`Workspace`]) -- stage encoder output next to
//!   its destination and move it into place on success.
//!
//! ## Example
//!
//! ```no_run
//! use convert4ps4_av::{FfprobeProber, Prober, ToolRegistry, ToolsConfig, FFPROBE};
//!
//! let tools = ToolRegistry::discover(&ToolsConfig::default());
//! let prober = FfprobeProber::new(tools.require(FFPROBE)?.path.clone());
//! let info = prober.probe("/path/to/video.mkv".as_ref())?;
//! for stream in &info.streams {
//!     println!("#{} {} {}", stream.index, stream.kind, stream.codec_name);
//! }
//! # Ok::<(), convert4ps4_av::Error>(())
//! ```

pub mod command;
mod error;
pub mod probe;
pub mod tools;
pub mod workspace;

// Re-exports
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use probe::{ContainerInfo, FfprobeProber, Prober, StreamDescriptor, StreamKind};
pub use tools::{ToolConfig, ToolRegistry, ToolsConfig, FFMPEG, FFPROBE};
pub use workspace::Workspace;
