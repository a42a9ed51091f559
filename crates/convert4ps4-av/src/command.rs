//! Builder for executing external tool commands.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use crate::{Error, Result};

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// The process runs to completion on the calling thread. There is no timeout:
/// a hung tool blocks the caller.
///
/// # Example
///
/// ```no_run
/// use convert4ps4_av::ToolCommand;
/// use std::path::PathBuf;
///
/// let output = ToolCommand::new(PathBuf::from("ffprobe"))
///     .args(["-v", "quiet", "-print_format", "json"])
///     .arg("-show_streams")
///     .arg("/path/to/video.mkv")
///     .output()?;
/// println!("{}", output.stdout);
/// # Ok::<(), convert4ps4_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
        }
    }

    /// Append a single argument. Paths are passed through byte-for-byte.
    pub fn arg(&mut self, s: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(s.as_ref().to_os_string());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl AsRef<OsStr>>) -> &mut Self {
        self.args
            .extend(iter.into_iter().map(|s| s.as_ref().to_os_string()));
        self
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Run the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolFailed`] if spawning fails or the process exits
    /// with a non-zero status (message includes stderr).
    pub fn output(&self) -> Result<ToolOutput> {
        let program_name = self.program_name();
        tracing::debug!("running {self}");

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::tool_failed(&program_name, format!("failed to spawn: {e}")))?;

        let tool_output = ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !output.status.success() {
            let mut message = describe_exit(output.status);
            let stderr = tool_output.stderr.trim();
            if !stderr.is_empty() {
                message.push_str(": ");
                message.push_str(stderr);
            }
            return Err(Error::tool_failed(program_name, message));
        }

        Ok(tool_output)
    }

    /// Run the command with inherited stdio so the tool can report progress
    /// directly to the terminal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolFailed`] if spawning fails or the process exits
    /// with a non-zero status.
    pub fn status(&self) -> Result<()> {
        let program_name = self.program_name();
        tracing::debug!("running {self}");

        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|e| Error::tool_failed(&program_name, format!("failed to spawn: {e}")))?;

        if !status.success() {
            return Err(Error::tool_failed(program_name, describe_exit(status)));
        }

        Ok(())
    }
}

fn describe_exit(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Renders the command line as the program followed by its arguments,
/// separated by single spaces.
impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
