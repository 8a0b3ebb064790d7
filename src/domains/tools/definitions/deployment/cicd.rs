//! CI/CD pipeline configuration tool definition.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use crate::domains::integrations::{CiCdOptions, DeploymentService};
use crate::domains::tools::{HandlerResult, ToolDescriptor, parse_params, to_output};

/// Supported CI/CD platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CiCdPlatform {
    Github,
    Gitlab,
    AzureDevops,
    Jenkins,
    Other,
}

impl CiCdPlatform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::AzureDevops => "azure-devops",
            Self::Jenkins => "jenkins",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CiCdParams {
    /// Path to the ARC project.
    pub project_path: String,
    /// CI/CD platform.
    pub platform: CiCdPlatform,
    /// CI/CD configuration options.
    pub options: CiCdOptions,
}

/// CI/CD tool - configures build and release pipelines.
pub struct CiCdTool;

impl CiCdTool {
    pub const ID: &'static str = "arc.deployment.cicd";

    pub const NAME: &'static str = "ARC CI/CD Configurator";

    pub const DESCRIPTION: &'static str = "Configure CI/CD pipelines for ARC applications";

    #[instrument(skip_all, fields(platform = params.platform.as_str()))]
    pub async fn execute(service: &DeploymentService, params: CiCdParams) -> HandlerResult {
        let result = service
            .configure_ci_cd(&params.project_path, params.platform.as_str(), &params.options)
            .await;
        to_output(&result)
    }

    pub fn descriptor(service: Arc<DeploymentService>) -> ToolDescriptor {
        ToolDescriptor::builder(Self::ID)
            .name(Self::NAME)
            .description(Self::DESCRIPTION)
            .params::<CiCdParams>()
            .handler_fn(move |input| {
                let service = service.clone();
                async move { Self::execute(&service, parse_params(input)?).await }
            })
    }
}
