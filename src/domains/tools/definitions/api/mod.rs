//! Tools wrapping the ARC API microservices.

mod authentication;
mod notification;

use std::sync::Arc;

pub use authentication::{AuthenticationParams, AuthenticationTool};
pub use notification::{NotificationParams, NotificationTool};

use crate::domains::integrations::{AuthenticationService, NotificationService};
use crate::domains::tools::ToolDescriptor;

/// Descriptors for the API tool group.
pub fn tools() -> Vec<ToolDescriptor> {
    vec![
        AuthenticationTool::descriptor(Arc::new(AuthenticationService::new())),
        NotificationTool::descriptor(Arc::new(NotificationService::new())),
    ]
}
