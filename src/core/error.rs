//! Error types and handling for the MCP server.
//!
//! This module defines the crate-wide error type plus the lifecycle errors
//! raised by the dispatch core's `start`/`stop` methods.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from tool dispatch.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Invalid lifecycle transition.
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// Error originating from a transport.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Errors returned by the server lifecycle methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// `start` was called on a server that is already running.
    #[error("server is already running")]
    AlreadyRunning,

    /// `stop` was called on a server that is not running.
    #[error("server is not running")]
    NotRunning,
}
