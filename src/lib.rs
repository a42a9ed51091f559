//! convert4ps4 - make video files playable by the PS4 media player
//!
//! Probes a media file with ffprobe, picks one video and one audio stream,
//! and re-encodes only the streams the player cannot handle. This library
//! crate exposes the pieces for integration testing.

pub mod config;
pub mod encode;
mod error;
pub mod job;
pub mod output;
pub mod strategy;

pub use error::{Error, Result};
pub use job::ConversionJob;
pub use strategy::{select_streams, SelectionResult, StreamChoice, TargetProfile};
