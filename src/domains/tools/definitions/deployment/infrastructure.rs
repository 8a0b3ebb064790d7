//! Infrastructure-as-code generator tool definition.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use crate::domains::integrations::{DeploymentService, InfrastructureOptions};
use crate::domains::tools::{HandlerResult, ToolDescriptor, parse_params, to_output};

/// Target platform of generated infrastructure code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InfrastructurePlatform {
    Aws,
    Azure,
    Gcp,
    Kubernetes,
    Docker,
}

impl InfrastructurePlatform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::Gcp => "gcp",
            Self::Kubernetes => "kubernetes",
            Self::Docker => "docker",
        }
    }
}

/// Parameters for infrastructure generation.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureParams {
    /// Path to the ARC project.
    pub project_path: String,
    /// Target deployment platform.
    pub platform: InfrastructurePlatform,
    /// Platform-specific configuration options.
    #[serde(default)]
    pub options: InfrastructureOptions,
}

/// Infrastructure tool - generates IaC files for a target platform.
pub struct InfrastructureTool;

impl InfrastructureTool {
    pub const ID: &'static str = "arc.deployment.infrastructure";

    pub const NAME: &'static str = "ARC Infrastructure Generator";

    pub const DESCRIPTION: &'static str =
        "Generate infrastructure as code for deploying ARC applications";

    #[instrument(skip_all, fields(platform = params.platform.as_str()))]
    pub async fn execute(service: &DeploymentService, params: InfrastructureParams) -> HandlerResult {
        let result = service
            .generate_infrastructure(&params.project_path, params.platform.as_str(), &params.options)
            .await;
        to_output(&result)
    }

    pub fn descriptor(service: Arc<DeploymentService>) -> ToolDescriptor {
        ToolDescriptor::builder(Self::ID)
            .name(Self::NAME)
            .description(Self::DESCRIPTION)
            .params::<InfrastructureParams>()
            .handler_fn(move |input| {
                let service = service.clone();
                async move { Self::execute(&service, parse_params(input)?).await }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_lists_platform_files() {
        let descriptor = InfrastructureTool::descriptor(Arc::new(DeploymentService::new()));
        let input = json!({"projectPath": "./svc", "platform": "docker"})
            .as_object()
            .cloned()
            .unwrap();

        let output = descriptor.handler().call(input).await.unwrap();
        assert_eq!(output["platform"], json!("docker"));
        let files = output["files"].as_array().unwrap();
        assert!(!files.is_empty());
        assert!(files.iter().all(|f| f.as_str().unwrap().starts_with("./svc/")));
    }

    #[test]
    fn test_options_are_optional() {
        let descriptor = InfrastructureTool::descriptor(Arc::new(DeploymentService::new()));
        assert_eq!(descriptor.input_schema.required(), vec!["projectPath", "platform"]);
        assert_eq!(
            descriptor.input_schema.property("options").unwrap()["properties"]["region"]["type"],
            json!(["string", "null"])
        );
    }
}
