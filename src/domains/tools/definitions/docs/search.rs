//! Documentation search tool definition.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domains::integrations::{DocSearchResult, DocumentationService};
use crate::domains::tools::{HandlerResult, ToolDescriptor, parse_params, to_output};

/// Documentation category to search within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocCategory {
    Api,
    Infrastructure,
    Ui,
    Saas,
    All,
}

impl DocCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Infrastructure => "infrastructure",
            Self::Ui => "ui",
            Self::Saas => "saas",
            Self::All => "all",
        }
    }
}

fn default_category() -> DocCategory {
    DocCategory::All
}

fn default_max_results() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocsSearchParams {
    /// Search query.
    pub query: String,
    /// Documentation category to search within.
    #[serde(default = "default_category")]
    pub category: DocCategory,
    /// Maximum number of results to return.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocsSearchOutput {
    results: Vec<DocSearchResult>,
    total_count: usize,
    query: String,
}

/// Docs search tool - keyword search over the ARC documentation index.
pub struct DocsSearchTool;

impl DocsSearchTool {
    pub const ID: &'static str = "arc.docs.search";

    pub const NAME: &'static str = "ARC Documentation Search";

    pub const DESCRIPTION: &'static str = "Search the ARC framework documentation";

    #[instrument(skip_all, fields(query = %params.query))]
    pub async fn execute(service: &DocumentationService, params: DocsSearchParams) -> HandlerResult {
        let results = service
            .search(&params.query, params.category.as_str(), params.max_results)
            .await;
        debug!("Documentation search returned {} results", results.len());

        to_output(&DocsSearchOutput {
            total_count: results.len(),
            results,
            query: params.query,
        })
    }

    pub fn descriptor(service: Arc<DocumentationService>) -> ToolDescriptor {
        ToolDescriptor::builder(Self::ID)
            .name(Self::NAME)
            .description(Self::DESCRIPTION)
            .params::<DocsSearchParams>()
            .handler_fn(move |input| {
                let service = service.clone();
                async move { Self::execute(&service, parse_params(input)?).await }
            })
    }
}
