//! Tool definitions module.
//!
//! Each tool is defined in its own file and grouped by catalog. Every group
//! exposes a `tools()` factory producing its descriptors; the dispatch core
//! registers the groups in a fixed order at construction.

pub mod api;
pub mod deployment;
pub mod docs;
pub mod generator;

pub use api::{AuthenticationTool, NotificationTool};
pub use deployment::{CiCdTool, DeployTool, InfrastructureTool};
pub use docs::DocsSearchTool;
pub use generator::{ControllerGeneratorTool, MicroserviceGeneratorTool, ModelGeneratorTool};

use crate::core::config::IntegrationsConfig;

use super::ToolDescriptor;

/// The full built-in catalog, in listing order: API, generator, deployment,
/// then documentation tools.
pub fn catalog(integrations: &IntegrationsConfig) -> Vec<ToolDescriptor> {
    let mut tools = api::tools();
    tools.extend(generator::tools());
    tools.extend(deployment::tools());
    tools.extend(docs::tools(integrations));
    tools
}
