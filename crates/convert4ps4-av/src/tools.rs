//! External tool detection.
//!
//! The [`ToolRegistry`] resolves the locations of `ffmpeg` and `ffprobe` once
//! at startup and hands them out to the probe and encode steps.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Name of the media prober executable.
pub const FFPROBE: &str = "ffprobe";

/// Name of the media encoder executable.
pub const FFMPEG: &str = "ffmpeg";

/// Tools the registry manages. Both are required for a run.
const KNOWN_TOOLS: &[&str] = &[FFMPEG, FFPROBE];

/// Optional per-tool path overrides, usually read from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,
}

impl ToolsConfig {
    fn override_for(&self, name: &str) -> Option<&Path> {
        match name {
            FFMPEG => self.ffmpeg_path.as_deref(),
            FFPROBE => self.ffprobe_path.as_deref(),
            _ => None,
        }
    }
}

/// A resolved external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Tool name (e.g. "ffmpeg").
    pub name: String,
    /// Resolved path to the executable.
    pub path: PathBuf,
}

/// Registry holding discovered tool locations.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolConfig>,
}

impl ToolRegistry {
    /// Discover tools, preferring configured paths over a `PATH` lookup.
    ///
    /// A configured path is only used if it exists; otherwise [`which::which`]
    /// is consulted. Tools that cannot be found are left out of the registry
    /// and reported later by [`ToolRegistry::require`].
    pub fn discover(tools_config: &ToolsConfig) -> Self {
        let mut tools = HashMap::new();

        for &name in KNOWN_TOOLS {
            let resolved = match tools_config.override_for(name) {
                Some(p) if p.exists() => Some(p.to_path_buf()),
                Some(p) => {
                    tracing::warn!(
                        "configured {name} path {} does not exist, searching PATH",
                        p.display()
                    );
                    which::which(name).ok()
                }
                None => which::which(name).ok(),
            };

            match resolved {
                Some(path) => {
                    tracing::debug!("found {name} at {}", path.display());
                    tools.insert(
                        name.to_string(),
                        ToolConfig {
                            name: name.to_string(),
                            path,
                        },
                    );
                }
                None => tracing::debug!("{name} not found"),
            }
        }

        Self { tools }
    }

    /// Return the [`ToolConfig`] for `name`, or [`Error::ToolNotFound`].
    pub fn require(&self, name: &str) -> Result<&ToolConfig> {
        self.tools
            .get(name)
            .ok_or_else(|| Error::tool_not_found(name))
    }

    /// Fail on the first known tool that was not discovered.
    pub fn require_all(&self) -> Result<()> {
        for &name in KNOWN_TOOLS {
            self.require(name)?;
        }
        Ok(())
    }
}
