//! Authentication tool definition.
//!
//! Relays login, logout, token refresh and token verification to the ARC
//! Authentication Service.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::integrations::{AuthenticationService, Credentials};
use crate::domains::tools::{HandlerError, HandlerResult, ToolDescriptor, parse_params, to_output};

/// The authentication action to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum AuthAction {
    Login,
    Logout,
    RefreshToken,
    VerifyToken,
}

/// Parameters for the authentication tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AuthenticationParams {
    /// The authentication action to perform.
    pub action: AuthAction,
    /// Required for `login`.
    #[serde(default)]
    pub credentials: Option<Credentials>,
    /// Required for every action except `login`.
    #[serde(default)]
    pub token: Option<String>,
}

/// Authentication tool - manages authentication for ARC applications.
pub struct AuthenticationTool;

impl AuthenticationTool {
    /// Tool id as registered in the catalog.
    pub const ID: &'static str = "arc.api.authentication";

    pub const NAME: &'static str = "Authentication Service";

    pub const DESCRIPTION: &'static str =
        "Manage authentication and authorization for ARC applications";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(action = ?params.action))]
    pub async fn execute(
        service: &AuthenticationService,
        params: AuthenticationParams,
    ) -> HandlerResult {
        info!("Authentication tool called");

        let result = match params.action {
            AuthAction::Login => {
                let credentials = params.credentials.ok_or_else(|| {
                    HandlerError::invalid_arguments("'credentials' are required for login")
                })?;
                service.login(&credentials).await
            }
            AuthAction::Logout => service.logout(&require_token(params.token)?).await,
            AuthAction::RefreshToken => service.refresh_token(&require_token(params.token)?).await,
            AuthAction::VerifyToken => service.verify_token(&require_token(params.token)?).await,
        };

        to_output(&result)
    }

    /// Create the descriptor for this tool.
    pub fn descriptor(service: Arc<AuthenticationService>) -> ToolDescriptor {
        ToolDescriptor::builder(Self::ID)
            .name(Self::NAME)
            .description(Self::DESCRIPTION)
            .params::<AuthenticationParams>()
            .handler_fn(move |input| {
                let service = service.clone();
                async move { Self::execute(&service, parse_params(input)?).await }
            })
    }
}

fn require_token(token: Option<String>) -> Result<String, HandlerError> {
    token.ok_or_else(|| HandlerError::invalid_arguments("'token' is required for this action"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn call(input: serde_json::Value) -> HandlerResult {
        let descriptor = AuthenticationTool::descriptor(Arc::new(AuthenticationService::new()));
        let input = input.as_object().cloned().unwrap();
        descriptor.handler().call(input).await
    }

    #[tokio::test]
    async fn test_login() {
        let output = call(json!({
            "action": "login",
            "credentials": { "username": "alice", "password": "pw" }
        }))
        .await
        .unwrap();
        assert_eq!(output["success"], json!(true));
        assert_eq!(output["user"]["username"], json!("alice"));
    }

    #[tokio::test]
    async fn test_refresh_token() {
        let output = call(json!({"action": "refreshToken", "token": "t"}))
            .await
            .unwrap();
        assert_eq!(output["token"], json!("new-refreshed-token"));
    }

    #[tokio::test]
    async fn test_login_without_credentials_is_invalid() {
        let err = call(json!({"action": "login"})).await.unwrap_err();
        assert!(matches!(err, HandlerError::InvalidArguments(_)));
    }

    #[test]
    fn test_schema_lists_actions() {
        let descriptor = AuthenticationTool::descriptor(Arc::new(AuthenticationService::new()));
        let schema = &descriptor.input_schema;

        assert_eq!(schema.required(), vec!["action"]);
        assert_eq!(
            schema.property("action").unwrap()["enum"],
            json!(["login", "logout", "refreshToken", "verifyToken"])
        );
    }

    #[tokio::test]
    async fn test_unknown_action_is_invalid() {
        let err = call(json!({"action": "impersonate"})).await.unwrap_err();
        assert!(matches!(err, HandlerError::InvalidArguments(_)));
    }
}
