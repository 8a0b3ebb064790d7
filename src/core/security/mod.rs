// Security module for access control
//
// This module provides the security gate consulted before every tool
// execution and on every inbound transport request.

pub mod gate;

pub use gate::{AllowAll, AuthorizationDecision, PolicyGate, RequestCredentials, SecurityGate};
