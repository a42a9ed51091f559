//! Output location and naming.

use crate::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the output directory.
pub const OUTPUT_DIR_ENV: &str = "C4PS4_TARGET";

/// Pick the output directory and check that it exists.
///
/// `env_override` is the value of [`OUTPUT_DIR_ENV`], if set. It wins over
/// `configured`; the current directory is used when neither is present.
/// A set-but-empty override is not a directory and is rejected.
pub fn resolve_output_dir(
    env_override: Option<OsString>,
    configured: Option<&Path>,
) -> Result<PathBuf> {
    let dir = match (env_override, configured) {
        (Some(env), _) => PathBuf::from(env),
        (None, Some(cfg)) => cfg.to_path_buf(),
        (None, None) => PathBuf::from("."),
    };

    if !dir.is_dir() {
        return Err(Error::InvalidOutputDirectory { path: dir });
    }

    Ok(dir)
}

/// `<stem><marker>.<ext>` for `input`; no extension if the input has none.
///
/// `movie.mkv` with marker `_converted_` becomes `movie_converted_.mkv`.
pub fn output_file_name(input: &Path, marker: &str) -> Result<OsString> {
    let stem = input.file_stem().ok_or_else(|| Error::InvalidInput {
        path: input.to_path_buf(),
    })?;

    let mut name = stem.to_os_string();
    name.push(marker);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(name)
}

/// Full output path for `input` inside `output_dir`.
pub fn output_path(input: &Path, output_dir: &Path, marker: &str) -> Result<PathBuf> {
    Ok(output_dir.join(output_file_name(input, marker)?))
}

/// Check that `path` names an existing regular file.
pub fn validate_input(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::InvalidInput {
            path: path.to_path_buf(),
        })
    }
}

/// Base name of `path` as a displayable string, for log messages.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_else(|| OsStr::new(""))
        .to_string_lossy()
        .to_string()
}
