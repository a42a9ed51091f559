//! Staged output for encoder runs.
//!
//! A [`Workspace`] owns a temporary directory created next to the final
//! output file. The encoder writes into [`Workspace::staged`]; only a
//! successful run is moved to the destination path. Dropping the
//! workspace without finalizing discards the partial output.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::{Error, Result};

/// Temporary staging area for one output file.
///
/// # Example
///
/// ```no_run
/// use convert4ps4_av::Workspace;
///
/// let workspace = Workspace::new("/videos/movie_converted_.mkv".as_ref())?;
/// // ... run the encoder, writing to workspace.staged() ...
/// let path = workspace.finalize()?;
/// # Ok::<(), convert4ps4_av::Error>(())
/// ```
#[derive(Debug)]
pub struct Workspace {
    temp_dir: TempDir,
    destination: PathBuf,
}

impl Workspace {
    /// Create a workspace for `destination`.
    ///
    /// The temp directory lives in the destination's parent directory so the
    /// final move is a same-filesystem rename.
    pub fn new(destination: &Path) -> Result<Self> {
        if destination.file_name().is_none() {
            return Err(Error::Workspace(format!(
                "output path has no file name: {}",
                destination.display()
            )));
        }

        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let temp_dir = tempfile::Builder::new()
            .prefix(".convert4ps4-")
            .tempdir_in(parent)
            .map_err(|e| Error::Workspace(format!("failed to create temp dir: {e}")))?;

        tracing::debug!("staging output in {}", temp_dir.path().display());

        Ok(Self {
            temp_dir,
            destination: destination.to_path_buf(),
        })
    }

    /// Where the encoder should write (same file name as the destination).
    pub fn staged(&self) -> PathBuf {
        // `new` rejected destinations without a file name.
        let file_name = self
            .destination
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("output"));
        self.temp_dir.path().join(file_name)
    }

    /// Move the staged file to the destination, replacing any existing file.
    ///
    /// Tries a rename first and falls back to copy+remove.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Workspace`] if nothing was staged or the move fails.
    pub fn finalize(self) -> Result<PathBuf> {
        let staged = self.staged();

        if !staged.exists() {
            return Err(Error::Workspace(format!(
                "staged output does not exist: {}",
                staged.display()
            )));
        }

        if let Err(rename_err) = std::fs::rename(&staged, &self.destination) {
            tracing::debug!("rename failed ({rename_err}), copying instead");
            std::fs::copy(&staged, &self.destination).map_err(|e| {
                Error::Workspace(format!("failed to copy output to destination: {e}"))
            })?;
            let _ = std::fs::remove_file(&staged);
        }

        tracing::debug!("output finalized at {}", self.destination.display());
        Ok(self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn staged_path_is_inside_destination_dir() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("movie_converted_.mkv");
        let ws = Workspace::new(&dest).unwrap();

        assert!(ws.staged().starts_with(ws.temp_dir.path()));
        assert!(ws.temp_dir.path().starts_with(dir.path()));
        assert_eq!(ws.staged().file_name(), dest.file_name());
        assert_eq!(ws.destination, dest);
    }

    #[test]
    fn finalize_moves_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("movie_converted_.mkv");
        let ws = Workspace::new(&dest).unwrap();
        let temp_dir = ws.temp_dir.path().to_path_buf();
        fs::write(ws.staged(), b"encoded").unwrap();

        let final_path = ws.finalize().unwrap();
        assert_eq!(final_path, dest);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "encoded");
        assert!(!temp_dir.exists());
    }

    #[test]
    fn finalize_replaces_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("movie_converted_.mkv");
        fs::write(&dest, b"old").unwrap();

        let ws = Workspace::new(&dest).unwrap();
        fs::write(ws.staged(), b"new").unwrap();
        ws.finalize().unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn finalize_fails_when_nothing_staged() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("movie_converted_.mkv");
        let ws = Workspace::new(&dest).unwrap();

        assert!(ws.finalize().is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn dropping_discards_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("movie_converted_.mkv");
        let ws = Workspace::new(&dest).unwrap();
        let temp_dir = ws.temp_dir.path().to_path_buf();
        fs::write(ws.staged(), b"partial").unwrap();

        drop(ws);
        assert!(!temp_dir.exists());
        assert!(!dest.exists());
    }

    #[test]
    fn missing_parent_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing").join("movie.mkv");
        assert!(matches!(Workspace::new(&dest), Err(Error::Workspace(_))));
    }
}
