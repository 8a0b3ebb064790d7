//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server:
//! configuration, error handling, the dispatch core and its lifecycle, the
//! security gate, the session context store, and transport layer
//! abstractions.

pub mod config;
pub mod context;
pub mod error;
pub mod security;
pub mod server;
pub mod transport;

pub use config::Config;
pub use context::{ContextStore, SessionContext};
pub use error::{Error, LifecycleError, Result};
pub use security::{AllowAll, PolicyGate, RequestCredentials, SecurityGate};
pub use server::{McpServer, McpServerBuilder, ServerMetadata, ServerState};
pub use transport::{TransportConfig, TransportService};
