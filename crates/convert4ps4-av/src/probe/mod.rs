//! Media file probing.
//!
//! A [`Prober`] turns a path into a [`ContainerInfo`]. The only backend is
//! [`FfprobeProber`], which shells out to the `ffprobe` CLI; the trait exists
//! so callers can substitute canned stream lists.

mod ffprobe;
mod types;

pub use self::ffprobe::{parse_ffprobe_json, FfprobeProber};
pub use self::types::*;

use crate::Result;
use std::path::Path;

/// Something that can describe the streams of a media file.
pub trait Prober {
    /// Short backend name used in log messages.
    fn name(&self) -> &'static str;

    /// Probe `path` and return its container description.
    ///
    /// Each call is independent; failures are not retried.
    fn probe(&self, path: &Path) -> Result<ContainerInfo>;
}
