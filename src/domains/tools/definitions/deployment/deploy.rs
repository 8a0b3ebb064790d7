//! Deployment tool definition.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use crate::domains::integrations::{DeploymentOptions, DeploymentService};
use crate::domains::tools::{HandlerResult, ToolDescriptor, parse_params, to_output};

/// Environment an application is deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentEnvironment {
    Development,
    Staging,
    Production,
    Custom,
}

impl DeploymentEnvironment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
            Self::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeployParams {
    /// Path to the ARC project.
    pub project_path: String,
    /// Deployment environment.
    pub environment: DeploymentEnvironment,
    /// Deployment options.
    pub options: DeploymentOptions,
}

/// Deploy tool - deploys an ARC application to an environment.
pub struct DeployTool;

impl DeployTool {
    pub const ID: &'static str = "arc.deployment.deploy";

    pub const NAME: &'static str = "ARC Application Deployer";

    pub const DESCRIPTION: &'static str = "Deploy ARC applications to various environments";

    #[instrument(skip_all, fields(environment = params.environment.as_str()))]
    pub async fn execute(service: &DeploymentService, params: DeployParams) -> HandlerResult {
        let result = service
            .deploy_application(&params.project_path, params.environment.as_str(), &params.options)
            .await;
        to_output(&result)
    }

    pub fn descriptor(service: Arc<DeploymentService>) -> ToolDescriptor {
        ToolDescriptor::builder(Self::ID)
            .name(Self::NAME)
            .description(Self::DESCRIPTION)
            .params::<DeployParams>()
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

    fn descriptor() -> ToolDescriptor {
        DeployTool::descriptor(Arc::new(DeploymentService::new()))
    }

    #[tokio::test]
    async fn test_missing_platform_is_rejected_by_schema_and_handler() {
        let descriptor = descriptor();
        let input = json!({"projectPath": "p", "environment": "staging", "options": {}})
            .as_object()
            .cloned()
            .unwrap();

        let violations = descriptor.input_schema.validate(&input).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].starts_with("/options: "));
        assert!(violations[0].contains("platform"));
        assert!(descriptor.handler().call(input).await.is_err());
    }

    #[tokio::test]
    async fn test_deploy_reports_url() {
        let input = json!({
            "projectPath": "p",
            "environment": "staging",
            "options": {"platform": "aws", "appName": "shop"}
        })
        .as_object()
        .cloned()
        .unwrap();

        let output = descriptor().handler().call(input).await.unwrap();
        assert_eq!(output["environment"], json!("staging"));
        assert!(output["deploymentUrl"].as_str().unwrap().contains("shop"));
    }
}
