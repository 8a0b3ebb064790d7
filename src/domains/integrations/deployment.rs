//! Deployment assistance for ARC applications (simulated).
//!
//! Produces the list of infrastructure and CI/CD files a real generator
//! would write, and a predictable deployment URL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

/// Platform-specific options for infrastructure generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureOptions {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub resources: Option<Map<String, Value>>,
    #[serde(default)]
    pub database: Option<Map<String, Value>>,
    #[serde(default)]
    pub scaling: Option<Map<String, Value>>,
}

/// Options for deploying an application.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentOptions {
    /// Hosting platform, e.g. `aws`, `azure` or `gcp`.
    pub platform: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub env_vars: Option<Map<String, Value>>,
}

/// Options for CI/CD pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CiCdOptions {
    pub environments: Vec<String>,
    #[serde(default)]
    pub test_stages: Vec<String>,
    #[serde(default)]
    pub deploy_on_merge: Option<bool>,
    #[serde(default)]
    pub auto_rollback: Option<bool>,
    #[serde(default)]
    pub notifications: Option<Map<String, Value>>,
}

/// Result of a deployment operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResult {
    pub success: bool,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_url: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct DeploymentService;

impl DeploymentService {
    pub fn new() -> Self {
        Self
    }

    /// Generate infrastructure-as-code for the given platform.
    pub async fn generate_infrastructure(
        &self,
        project_path: &str,
        platform: &str,
        options: &InfrastructureOptions,
    ) -> DeploymentResult {
        info!("Generating infrastructure for {} on {}", project_path, platform);
        tracing::debug!(?options, "Infrastructure options");

        DeploymentResult {
            success: true,
            platform: platform.to_string(),
            environment: None,
            files: Some(infrastructure_files(platform, project_path)),
            deployment_url: None,
            message: format!(
                "Successfully generated infrastructure code for {}",
                platform
            ),
        }
    }

    /// Deploy the application to an environment.
    pub async fn deploy_application(
        &self,
        project_path: &str,
        environment: &str,
        options: &DeploymentOptions,
    ) -> DeploymentResult {
        info!("Deploying {} to {}", project_path, environment);

        let platform = options.platform.clone();
        let app_name = options.app_name.as_deref().unwrap_or("arc-app");

        DeploymentResult {
            success: true,
            deployment_url: Some(deployment_url(&platform, app_name, environment)),
            platform,
            environment: Some(environment.to_string()),
            files: None,
            message: format!("Successfully deployed to {}", environment),
        }
    }

    /// Configure a CI/CD pipeline.
    pub async fn configure_ci_cd(
        &self,
        project_path: &str,
        platform: &str,
        options: &CiCdOptions,
    ) -> DeploymentResult {
        info!("Configuring CI/CD for {} on {}", project_path, platform);
        tracing::debug!(environments = ?options.environments, "CI/CD options");

        DeploymentResult {
            success: true,
            platform: platform.to_string(),
            environment: None,
            files: Some(ci_cd_files(platform, project_path)),
            deployment_url: None,
            message: format!("Successfully configured CI/CD pipeline for {}", platform),
        }
    }
}

fn infrastructure_files(platform: &str, project_path: &str) -> Vec<String> {
    let relative: &[&str] = match platform.to_lowercase().as_str() {
        "aws" => &[
            "infrastructure/aws/cloudformation.yaml",
            "infrastructure/aws/s3.tf",
            "infrastructure/aws/ec2.tf",
            "infrastructure/aws/rds.tf",
        ],
        "azure" => &[
            "infrastructure/azure/arm-template.json",
            "infrastructure/azure/app-service.tf",
            "infrastructure/azure/sql.tf",
        ],
        "gcp" => &[
            "infrastructure/gcp/deployment-manager.yaml",
            "infrastructure/gcp/app-engine.yaml",
            "infrastructure/gcp/cloud-sql.tf",
        ],
        "kubernetes" => &[
            "infrastructure/k8s/deployment.yaml",
            "infrastructure/k8s/service.yaml",
            "infrastructure/k8s/ingress.yaml",
            "infrastructure/k8s/configmap.yaml",
            "infrastructure/k8s/secret.yaml",
        ],
        _ => &["infrastructure/docker-compose.yaml"],
    };
    prefixed(project_path, relative)
}

fn ci_cd_files(platform: &str, project_path: &str) -> Vec<String> {
    let relative: &[&str] = match platform.to_lowercase().as_str() {
        "github" => &[".github/workflows/ci.yaml", ".github/workflows/cd.yaml"],
        "gitlab" => &[".gitlab-ci.yml"],
        "azure-devops" => &["azure-pipelines.yml"],
        "jenkins" => &["Jenkinsfile"],
        _ => &["ci-cd-config.yaml"],
    };
    prefixed(project_path, relative)
}

fn deployment_url(platform: &str, app_name: &str, environment: &str) -> String {
    let domain = match platform.to_lowercase().as_str() {
        "aws" => "amazonaws.com",
        "azure" => "azurewebsites.net",
        "gcp" => "appspot.com",
        _ => "example.com",
    };
    format!("https://{}-{}.{}", app_name, environment, domain)
}

fn prefixed(project_path: &str, relative: &[&str]) -> Vec<String> {
    relative
        .iter()
        .map(|file| format!("{}/{}", project_path, file))
        .collect()
}
