//! Tools assisting with infrastructure, deployment and CI/CD.

mod cicd;
mod deploy;
mod infrastructure;

use std::sync::Arc;

pub use cicd::{CiCdParams, CiCdPlatform, CiCdTool};
pub use deploy::{DeployParams, DeployTool, DeploymentEnvironment};
pub use infrastructure::{InfrastructureParams, InfrastructurePlatform, InfrastructureTool};

use crate::domains::integrations::DeploymentService;
use crate::domains::tools::ToolDescriptor;

/// Descriptors for the deployment tool group.
pub fn tools() -> Vec<ToolDescriptor> {
    let service = Arc::new(DeploymentService::new());
    vec![
        InfrastructureTool::descriptor(service.clone()),
        DeployTool::descriptor(service.clone()),
        CiCdTool::descriptor(service),
    ]
}
