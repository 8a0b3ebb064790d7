//! Documentation search tools.

mod search;

use std::sync::Arc;

pub use search::{DocCategory, DocsSearchParams, DocsSearchTool};

use crate::core::config::IntegrationsConfig;
use crate::domains::integrations::DocumentationService;
use crate::domains::tools::ToolDescriptor;

pub fn tools(config: &IntegrationsConfig) -> Vec<ToolDescriptor> {
    let service = Arc::new(DocumentationService::new(&config.docs_base_url));
    vec![DocsSearchTool::descriptor(service)]
}
