//! Error types for convert4ps4-av.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while talking to the external media tools.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required external tool is not available.
    #[error("{tool} not found; is it installed and in PATH?")]
    ToolNotFound { tool: String },

    /// An external tool could not be run or exited unsuccessfully.
    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    /// Tool output did not have the expected shape.
    #[error("failed to parse {tool} output: {message}")]
    ParseError { tool: String, message: String },

    /// Staging or finalizing the output file failed.
    #[error("workspace error: {0}")]
    Workspace(String),
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error.
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse_error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            tool: tool.into(),
            message: message.into(),
        }
    }
}
