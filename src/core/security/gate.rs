//! The security gate: the single chokepoint for access-control decisions.
//!
//! Two checks are kept apart on purpose. `authenticate_request` gates access
//! to the transport itself; `authorize_tool_execution` gates each individual
//! tool execution. Both are computed fresh on every call and never cached.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::core::config::SecurityConfig;
use crate::domains::tools::ToolInput;

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AuthorizationDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Transport-neutral view of the credentials carried by an inbound request.
#[derive(Clone, Default)]
pub struct RequestCredentials {
    /// Raw value of the `Authorization` header, if present.
    pub authorization: Option<String>,
}

impl RequestCredentials {
    /// Credentials carrying no authorization at all.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Credentials carrying the given raw authorization value.
    pub fn with_authorization(value: impl Into<String>) -> Self {
        Self {
            authorization: Some(value.into()),
        }
    }

    /// Credentials carrying a bearer token.
    pub fn bearer(token: &str) -> Self {
        Self::with_authorization(format!("Bearer {}", token))
    }

    /// The bearer token, if the authorization value is a well-formed bearer.
    pub fn bearer_token(&self) -> Option<&str> {
        let value = self.authorization.as_deref()?.trim();
        let (scheme, token) = value.split_once(' ')?;
        let token = token.trim();
        (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for RequestCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestCredentials")
            .field(
                "authorization",
                &self.authorization.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Access-control policy consulted by the dispatch core and transports.
///
/// Implementations must be pure with respect to shared state: the same
/// inputs may be presented many times and nothing is memoized.
#[async_trait]
pub trait SecurityGate: Send + Sync {
    /// Decide whether `tool_id` may execute with `input`.
    async fn authorize_tool_execution(
        &self,
        tool_id: &str,
        input: &ToolInput,
    ) -> AuthorizationDecision;

    /// Decide whether an inbound transport request carries acceptable credentials.
    async fn authenticate_request(&self, request: &RequestCredentials) -> bool;
}

/// A gate that lets everything through.
///
/// This is the permissive placeholder policy made explicit; use it only
/// where every caller is trusted, e.g. in tests or behind another gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl SecurityGate for AllowAll {
    async fn authorize_tool_execution(&self, _: &str, _: &ToolInput) -> AuthorizationDecision {
        AuthorizationDecision::allow()
    }

    async fn authenticate_request(&self, _: &RequestCredentials) -> bool {
        true
    }
}

/// Configurable gate driven by [`SecurityConfig`].
///
/// Tool authorization applies deny patterns first, then the allow list (an
/// empty allow list allows every tool). Request authentication is either
/// disabled, or requires a bearer token that, when tokens are configured,
/// must be one of them.
#[derive(Debug, Clone)]
pub struct PolicyGate {
    config: SecurityConfig,
}

impl PolicyGate {
    pub fn new(config: SecurityConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SecurityGate for PolicyGate {
    async fn authorize_tool_execution(
        &self,
        tool_id: &str,
        _input: &ToolInput,
    ) -> AuthorizationDecision {
        if let Some(pattern) = self
            .config
            .denied_tools
            .iter()
            .find(|p| pattern_matches(p, tool_id))
        {
            debug!("Tool {} denied by pattern {}", tool_id, pattern);
            return AuthorizationDecision::deny(format!("tool is denied by policy '{}'", pattern));
        }

        let allowed = self.config.allowed_tools.is_empty()
            || self
                .config
                .allowed_tools
                .iter()
                .any(|p| pattern_matches(p, tool_id));

        if allowed {
            AuthorizationDecision::allow()
        } else {
            AuthorizationDecision::deny("tool is not in the allowed list")
        }
    }

    async fn authenticate_request(&self, request: &RequestCredentials) -> bool {
        if !self.config.require_auth {
            return true;
        }

        let Some(token) = request.bearer_token() else {
            debug!("Rejecting request without bearer token");
            return false;
        };

        // Every configured token is compared so timing does not reveal which one matched.
        self.config.api_tokens.is_empty()
            || self
                .config
                .api_tokens
                .iter()
                .fold(false, |matched, t| constant_time_eq(t, token) | matched)
    }
}

/// Compare two tokens in time independent of where they first differ.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff: u8 = 0;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Match a tool id against a pattern. A trailing `*` matches any suffix.
fn pattern_matches(pattern: &str, tool_id: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => tool_id.starts_with(prefix),
        None => pattern == tool_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(config: SecurityConfig) -> PolicyGate {
        PolicyGate::new(config)
    }

    #[test]
    fn test_pattern_matches() {
        assert!(pattern_matches("*", "anything"));
        assert!(pattern_matches("arc.docs.*", "arc.docs.search"));
        assert!(!pattern_matches("arc.docs.*", "arc.api.notification"));
        assert!(pattern_matches("echo.test", "echo.test"));
        assert!(!pattern_matches("echo.test", "echo.test2"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("secret-token", "secret-token"));
        assert!(!constant_time_eq("secret-token", "secret-tokeN"));
        assert!(!constant_time_eq("secret-token", "Secret-token"));
        assert!(!constant_time_eq("secret", "secret-token"));
        assert!(constant_time_eq("", ""));
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(RequestCredentials::bearer("abc").bearer_token(), Some("abc"));
        assert_eq!(
            RequestCredentials::with_authorization("bearer  xyz ").bearer_token(),
            Some("xyz")
        );
        assert_eq!(
            RequestCredentials::with_authorization("Basic Zm9v").bearer_token(),
            None
        );
        assert_eq!(
            RequestCredentials::with_authorization("Bearer").bearer_token(),
            None
        );
        assert_eq!(RequestCredentials::anonymous().bearer_token(), None);
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let debug_str = format!("{:?}", RequestCredentials::bearer("super_secret"));
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret"));
    }

    #[tokio::test]
    async fn test_allow_all() {
        let gate = AllowAll;
        assert!(gate.authorize_tool_execution("x", &ToolInput::new()).await.allowed);
        assert!(gate.authenticate_request(&RequestCredentials::anonymous()).await);
    }

    #[tokio::test]
    async fn test_default_policy_allows_everything() {
        let gate = gate(SecurityConfig::default());
        assert!(gate.authorize_tool_execution("arc.docs.search", &ToolInput::new()).await.allowed);
        assert!(gate.authenticate_request(&RequestCredentials::anonymous()).await);
    }

    #[tokio::test]
    async fn test_deny_wins_over_allow() {
        let gate = gate(SecurityConfig {
            allowed_tools: vec!["arc.*".into()],
            denied_tools: vec!["arc.deployment.*".into()],
            ..Default::default()
        });
        let input = ToolInput::new();

        assert!(gate.authorize_tool_execution("arc.docs.search", &input).await.allowed);

        let decision = gate
            .authorize_tool_execution("arc.deployment.deploy", &input)
            .await;
        assert!(!decision.allowed);
        assert!(decision.reason.unwrap().contains("arc.deployment.*"));

        let decision = gate.authorize_tool_execution("echo.test", &input).await;
        assert_eq!(
            decision,
            AuthorizationDecision::deny("tool is not in the allowed list")
        );
    }

    #[tokio::test]
    async fn test_require_auth_without_token_list() {
        let gate = gate(SecurityConfig {
            require_auth: true,
            ..Default::default()
        });
        assert!(!gate.authenticate_request(&RequestCredentials::anonymous()).await);
        assert!(
            !gate
                .authenticate_request(&RequestCredentials::with_authorization("Token abc"))
                .await
        );
        assert!(gate.authenticate_request(&RequestCredentials::bearer("any")).await);
    }

    #[tokio::test]
    async fn test_require_auth_with_token_list() {
        let gate = gate(SecurityConfig {
            require_auth: true,
            api_tokens: vec!["good".into()],
            ..Default::default()
        });
        assert!(gate.authenticate_request(&RequestCredentials::bearer("good")).await);
        assert!(!gate.authenticate_request(&RequestCredentials::bearer("bad")).await);
    }
}
