//! ARC Authentication Service client (simulated).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Username/password pair used to log in.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct Credentials {
    pub username: String,
    #[allow(dead_code)]
    pub password: String,
}

/// A user as reported by the authentication service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
}

/// Result of an authentication action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
}

impl AuthResult {
    fn ok() -> Self {
        Self {
            success: true,
            token: None,
            valid: None,
            user: None,
        }
    }
}

/// Client for the ARC Authentication Service.
#[derive(Debug, Clone, Default)]
pub struct AuthenticationService;

impl AuthenticationService {
    pub fn new() -> Self {
        Self
    }

    pub async fn login(&self, credentials: &Credentials) -> AuthResult {
        info!("Login requested for {}", credentials.username);
        AuthResult {
            token: Some("example-token".to_string()),
            user: Some(AuthUser {
                id: "123".to_string(),
                username: credentials.username.clone(),
            }),
            ..AuthResult::ok()
        }
    }

    pub async fn logout(&self, _token: &str) -> AuthResult {
        info!("Logout requested");
        AuthResult::ok()
    }

    pub async fn refresh_token(&self, _token: &str) -> AuthResult {
        info!("Token refresh requested");
        AuthResult {
            token: Some("new-refreshed-token".to_string()),
            ..AuthResult::ok()
        }
    }

    pub async fn verify_token(&self, _token: &str) -> AuthResult {
        info!("Token verification requested");
        AuthResult {
            valid: Some(true),
            user: Some(AuthUser {
                id: "123".to_string(),
                username: "example-user".to_string(),
            }),
            ..AuthResult::ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_echoes_username() {
        let service = AuthenticationService::new();
        let result = service
            .login(&Credentials {
                username: "alice".into(),
                password: "secret".into(),
            })
            .await;
        assert!(result.success);
        assert_eq!(result.token.as_deref(), Some("example-token"));
        assert_eq!(result.user.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_verify_token_reports_validity() {
        let result = AuthenticationService::new().verify_token("t").await;
        assert_eq!(result.valid, Some(true));
        assert!(result.token.is_none());
    }
}
