//! Controller generator tool definition.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domains::integrations::ProjectGeneratorService;
use crate::domains::tools::{HandlerResult, ToolDescriptor, parse_params, to_output};

/// An operation the generated controller exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum CrudOperation {
    Create,
    Read,
    Update,
    Delete,
    Count,
    FindById,
}

impl CrudOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Count => "count",
            Self::FindById => "findById",
        }
    }
}

fn default_operations() -> Vec<CrudOperation> {
    vec![
        CrudOperation::Create,
        CrudOperation::Read,
        CrudOperation::Update,
        CrudOperation::Delete,
    ]
}

/// Parameters for the controller generator.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ControllerGeneratorParams {
    /// Path to the existing ARC project.
    pub project_path: String,
    /// Name of the controller.
    pub name: String,
    /// Name of the model this controller will manage.
    pub model_name: String,
    /// CRUD operations to include in the controller.
    #[serde(default = "default_operations")]
    pub operations: Vec<CrudOperation>,
}

/// Controller generator - adds a CRUD controller to an existing project.
pub struct ControllerGeneratorTool;

impl ControllerGeneratorTool {
    pub const ID: &'static str = "arc.generator.controller";

    pub const NAME: &'static str = "ARC Controller Generator";

    pub const DESCRIPTION: &'static str = "Generate a new controller for an existing ARC project";

    #[instrument(skip_all, fields(name = %params.name))]
    pub async fn execute(
        service: &ProjectGeneratorService,
        params: ControllerGeneratorParams,
    ) -> HandlerResult {
        let operations: Vec<String> = params
            .operations
            .iter()
            .map(|op| op.as_str().to_string())
            .collect();
        let result = service
            .generate_controller(&params.project_path, &params.name, &params.model_name, &operations)
            .await;
        to_output(&result)
    }

    pub fn descriptor(service: Arc<ProjectGeneratorService>) -> ToolDescriptor {
        ToolDescriptor::builder(Self::ID)
            .name(Self::NAME)
            .description(Self::DESCRIPTION)
            .params::<ControllerGeneratorParams>()
            .handler_fn(move |input| {
                let service = service.clone();
                async move { Self::execute(&service, parse_params(input)?).await }
            })
    }
}
