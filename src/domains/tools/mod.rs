//! Tools domain module.
//!
//! A tool is a named, schema-described operation a client can invoke. This
//! module holds the descriptor type, the registry the dispatch core looks
//! tools up in, input schema validation, and the built-in ARC catalog.
//!
//! ## Architecture
//!
//! - `descriptor.rs` - `ToolDescriptor`, the `ToolHandler` trait and helpers
//! - `schema.rs` - input schemas derived from params types, and validation
//! - `registry.rs` - ordered, id-keyed tool registry
//! - `error.rs` - dispatch and handler error types
//! - `definitions/` - the built-in tools, one file per tool
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in the matching `definitions/` group
//! 2. Define the params struct (`Deserialize` + `JsonSchema`), `execute()`
//!    and `descriptor()`
//! 3. Add the descriptor to the group's `tools()` factory

pub mod definitions;
mod descriptor;
mod error;
mod registry;
mod schema;

pub use descriptor::{
    HandlerResult, ToolDescriptor, ToolDescriptorBuilder, ToolHandler, ToolInput, ToolOutput,
    parse_params, to_output,
};
pub use error::{HandlerError, ToolError};
pub use registry::ToolRegistry;
pub use schema::InputSchema;
