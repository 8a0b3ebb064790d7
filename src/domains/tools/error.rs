//! Tool-specific error types.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the dispatch core when executing a tool.
///
/// Every variant that concerns a specific tool carries its id so the caller
/// can tell which execution failed.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The security gate denied the execution.
    #[error("Unauthorized to execute tool {tool}: {reason}")]
    Unauthorized { tool: String, reason: String },

    /// The requested tool was not found.
    #[error("Tool {0} not found")]
    NotFound(String),

    /// The input does not conform to the tool's schema.
    #[error("Invalid input for tool {tool}: {}", .violations.join("; "))]
    InvalidArguments {
        tool: String,
        violations: Vec<String>,
    },

    /// The tool handler itself failed.
    #[error("Execution of tool {tool} failed: {message}")]
    ExecutionFailed { tool: String, message: String },

    /// The execution deadline elapsed before the handler finished.
    #[error("Tool {tool} timed out after {}ms", .after.as_millis())]
    Timeout { tool: String, after: Duration },

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "unauthorized" error.
    pub fn unauthorized(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "not found" error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(tool: impl Into<String>, violations: Vec<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            violations,
        }
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::NotFound(_) => "tool_not_found",
            Self::InvalidArguments { .. } => "validation_error",
            Self::ExecutionFailed { .. } => "execution_error",
            Self::Timeout { .. } => "timeout",
            Self::Internal(_) => "internal_error",
        }
    }

    /// The id of the tool this error concerns, if any.
    pub fn tool_id(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { tool, .. }
            | Self::InvalidArguments { tool, .. }
            | Self::ExecutionFailed { tool, .. }
            | Self::Timeout { tool, .. } => Some(tool),
            Self::NotFound(id) => Some(id),
            Self::Internal(_) => None,
        }
    }
}

/// Errors raised by tool handlers.
///
/// Handlers do not know under which id they were registered; the dispatch
/// core attaches it when converting into a [`ToolError`].
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler rejected its input.
    #[error("{0}")]
    InvalidArguments(String),

    /// The handler's business logic failed.
    #[error("{0}")]
    Failed(String),
}

impl HandlerError {
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    /// Attach the tool id, producing the dispatch-level error.
    pub fn into_tool_error(self, tool: &str) -> ToolError {
        match self {
            Self::InvalidArguments(msg) => ToolError::invalid_arguments(tool, vec![msg]),
            Self::Failed(msg) => ToolError::execution_failed(tool, msg),
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidArguments(err.to_string())
    }
}
