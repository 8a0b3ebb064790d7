//! ARC MCP Server Library
//!
//! A capability-dispatch server for the ARC framework: it advertises a set of
//! named, schema-described tools and executes them for remote callers over
//! MCP (stdio/TCP) or a REST-style HTTP adapter.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the dispatch core
//!   ([`McpServer`]), the security gate, the session context store and the
//!   transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool descriptors, input schemas, the registry and the
//!     built-in ARC catalog
//!   - **integrations**: the (simulated) ARC services the tools call into
//!
//! # Example
//!
//! ```rust,no_run
//! use arc_mcp_server::{Config, McpServer};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = McpServer::new(Config::from_env());
//!     server.start().await?;
//!
//!     let input = json!({"query": "authentication"});
//!     let output = server
//!         .execute_tool("arc.docs.search", input.as_object().cloned().unwrap_or_default())
//!         .await?;
//!     println!("{}", serde_json::Value::Object(output));
//!
//!     server.stop().await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
