mod types;

pub use types::*;

use crate::{Error, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    validate_config(&config)?;

    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./convert4ps4.toml", "~/.config/convert4ps4/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.target.video_codecs.is_empty() {
        return Err(Error::Config("target.video_codecs cannot be empty".into()));
    }

    if config.target.audio_codecs.is_empty() {
        return Err(Error::Config("target.audio_codecs cannot be empty".into()));
    }

    if config.encoder.video_codec.trim().is_empty() || config.encoder.audio_codec.trim().is_empty()
    {
        return Err(Error::Config("encoder codecs cannot be empty".into()));
    }

    let marker = &config.output.marker;
    if marker.is_empty() {
        return Err(Error::Config("output.marker cannot be empty".into()));
    }
    if marker.contains('/') || marker.contains(std::path::MAIN_SEPARATOR) {
        return Err(Error::Config(format!(
            "output.marker must not contain a path separator: {marker:?}"
        )));
    }

    if config.target.languages.is_empty() {
        tracing::warn!("target.languages is empty; audio language preference is disabled");
    }

    Ok(())
}
