//! Tools scaffolding ARC projects and components.

mod controller;
mod microservice;
mod model;

use std::sync::Arc;

pub use controller::{ControllerGeneratorParams, ControllerGeneratorTool, CrudOperation};
pub use microservice::{MicroserviceGeneratorParams, MicroserviceGeneratorTool, ServiceFeature};
pub use model::{ModelGeneratorParams, ModelGeneratorTool};

use crate::domains::integrations::ProjectGeneratorService;
use crate::domains::tools::ToolDescriptor;

/// Descriptors for the generator tool group. All tools share one service.
pub fn tools() -> Vec<ToolDescriptor> {
    let service = Arc::new(ProjectGeneratorService::new());
    vec![
        MicroserviceGeneratorTool::descriptor(service.clone()),
        ModelGeneratorTool::descriptor(service.clone()),
        ControllerGeneratorTool::descriptor(service),
    ]
}
