//! Microservice generator tool definition.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domains::integrations::{ModelSpec, ProjectGeneratorService};
use crate::domains::tools::{HandlerResult, ToolDescriptor, parse_params, to_output};

/// A feature the generated microservice can include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServiceFeature {
    Authentication,
    Authorization,
    Database,
    Caching,
    Messaging,
    Notification,
    Api,
    Healthcheck,
}

impl ServiceFeature {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::Database => "database",
            Self::Caching => "caching",
            Self::Messaging => "messaging",
            Self::Notification => "notification",
            Self::Api => "api",
            Self::Healthcheck => "healthcheck",
        }
    }
}

fn default_output_dir() -> String {
    "./generated".to_string()
}

/// Parameters for the microservice generator.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MicroserviceGeneratorParams {
    /// Name of the microservice.
    pub name: String,
    /// Description of the microservice functionality.
    #[serde(default)]
    pub description: Option<String>,
    /// List of features to include in the microservice.
    pub features: Vec<ServiceFeature>,
    /// Data models to generate.
    #[serde(default)]
    pub models: Vec<ModelSpec>,
    /// Directory where the project should be generated.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

/// Microservice generator - scaffolds a new ARC microservice.
pub struct MicroserviceGeneratorTool;

impl MicroserviceGeneratorTool {
    pub const ID: &'static str = "arc.generator.microservice";

    pub const NAME: &'static str = "ARC Microservice Generator";

    pub const DESCRIPTION: &'static str = "Generate scaffolding for a new ARC microservice including models, controllers, and repositories";

    #[instrument(skip_all, fields(name = %params.name))]
    pub async fn execute(
        service: &ProjectGeneratorService,
        params: MicroserviceGeneratorParams,
    ) -> HandlerResult {
        let features: Vec<String> = params
            .features
            .iter()
            .map(|f| f.as_str().to_string())
            .collect();
        let result = service
            .generate_microservice(&params.name, &features, &params.models, &params.output_dir)
            .await;
        to_output(&result)
    }

    pub fn descriptor(service: Arc<ProjectGeneratorService>) -> ToolDescriptor {
        ToolDescriptor::builder(Self::ID)
            .name(Self::NAME)
            .description(Self::DESCRIPTION)
            .params::<MicroserviceGeneratorParams>()
            .handler_fn(move |input| {
                let service = service.clone();
                async move { Self::execute(&service, parse_params(input)?).await }
            })
    }
}
