//! Integrations behind the tool catalog.
//!
//! These stand in for the ARC microservices and tooling the catalog talks
//! to. They return simulated results: nothing here touches the network or
//! the filesystem. Tool definitions reach them only through their async
//! methods, so a real client can replace any of them without the dispatch
//! core noticing.

pub mod authentication;
pub mod deployment;
pub mod documentation;
pub mod notification;
pub mod project_generator;

pub use authentication::{AuthResult, AuthenticationService, Credentials};
pub use deployment::{
    CiCdOptions, DeploymentOptions, DeploymentResult, DeploymentService, InfrastructureOptions,
};
pub use documentation::{DocSearchResult, DocumentationService};
pub use notification::{NotificationReceipt, NotificationService};
pub use project_generator::{
    GeneratorResult, ModelSpec, ProjectGeneratorService, RelationKind, RelationSpec,
};
