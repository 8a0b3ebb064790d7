//! Model generator tool definition.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::domains::integrations::{ProjectGeneratorService, RelationSpec};
use crate::domains::tools::{HandlerResult, ToolDescriptor, parse_params, to_output};

/// Parameters for the model generator.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelGeneratorParams {
    /// Path to the existing ARC project.
    pub project_path: String,
    /// Name of the model.
    pub name: String,
    /// Model properties as key-value pairs (name: type).
    pub properties: Map<String, Value>,
    /// Relationships to other models.
    #[serde(default)]
    pub relations: Vec<RelationSpec>,
}

/// Model generator - adds a data model to an existing project.
pub struct ModelGeneratorTool;

impl ModelGeneratorTool {
    pub const ID: &'static str = "arc.generator.model";

    pub const NAME: &'static str = "ARC Model Generator";

    pub const DESCRIPTION: &'static str = "Generate a new data model for an existing ARC project";

    #[instrument(skip_all, fields(name = %params.name))]
    pub async fn execute(service: &ProjectGeneratorService, params: ModelGeneratorParams) -> HandlerResult {
        let result = service
            .generate_model(
                &params.project_path,
                &params.name,
                &params.properties,
                &params.relations,
            )
            .await;
        to_output(&result)
    }

    pub fn descriptor(service: Arc<ProjectGeneratorService>) -> ToolDescriptor {
        ToolDescriptor::builder(Self::ID)
            .name(Self::NAME)
            .description(Self::DESCRIPTION)
            .params::<ModelGeneratorParams>()
            .handler_fn(move |input| {
                let service = service.clone();
                async move { Self::execute(&service, parse_params(input)?).await }
            })
    }
}
