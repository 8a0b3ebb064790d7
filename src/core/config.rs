//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Authentication and authorization policy.
    pub security: SecurityConfig,

    /// Tool execution settings.
    pub dispatch: DispatchConfig,

    /// Session context bounds.
    pub context: ContextConfig,

    /// Settings for the integrations behind the tool catalog.
    pub integrations: IntegrationsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,

    /// Human readable description, reported by `/mcp/info`.
    pub description: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Security policy configuration.
///
/// The defaults reproduce the permissive baseline on purpose, but as an
/// explicit policy: transport authentication is off and every tool is
/// allowed. Turning `require_auth` on demands a bearer token.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Require an `Authorization: Bearer <token>` header on transport requests.
    pub require_auth: bool,

    /// Accepted bearer tokens. Empty means any well-formed bearer token.
    pub api_tokens: Vec<String>,

    /// Tool id patterns allowed to execute. Empty means all.
    /// A trailing `*` matches any suffix, e.g. `arc.docs.*`.
    pub allowed_tools: Vec<String>,

    /// Tool id patterns that may never execute. Deny wins over allow.
    pub denied_tools: Vec<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("require_auth", &self.require_auth)
            .field(
                "api_tokens",
                &format!("[REDACTED; {}]", self.api_tokens.len()),
            )
            .field("allowed_tools", &self.allowed_tools)
            .field("denied_tools", &self.denied_tools)
            .finish()
    }
}

/// Tool execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Default per-execution deadline.
    pub tool_timeout: Duration,

    /// Validate inputs against the tool schema before invoking the handler.
    pub validate_input: bool,
}

/// Session context store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Maximum number of sessions kept; the least recently used is evicted.
    /// `None` means unbounded.
    pub max_sessions: Option<usize>,

    /// Sessions idle for longer than this are discarded. `None` disables expiry.
    pub idle_ttl: Option<Duration>,
}

/// Configuration for the simulated integrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationsConfig {
    /// Base URL of the ARC documentation site.
    pub docs_base_url: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Load only the logging settings (`MCP_LOG_LEVEL`, `MCP_LOG_TIMESTAMPS`).
    ///
    /// The binary installs its subscriber from these before loading the rest
    /// of the configuration, so warnings about other keys are not lost.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        if let Some(timestamps) = env_bool("MCP_LOG_TIMESTAMPS") {
            logging.with_timestamps = timestamps;
        }
        logging
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            tool_timeout: Duration::from_secs(30),
            validate_input: true,
        }
    }
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            docs_base_url: "https://sourcefuse.github.io/arc-docs/".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "ARC Model Context Server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: "Model Context Server for ARC framework".to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            security: SecurityConfig::default(),
            dispatch: DispatchConfig::default(),
            context: ContextConfig::default(),
            integrations: IntegrationsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        // Security policy
        if let Some(require_auth) = env_bool("MCP_REQUIRE_AUTH") {
            config.security.require_auth = require_auth;
        }
        config.security.api_tokens = env_list("MCP_API_TOKENS");
        config.security.allowed_tools = env_list("MCP_ALLOWED_TOOLS");
        config.security.denied_tools = env_list("MCP_DENIED_TOOLS");

        // Dispatch settings
        if let Some(ms) = env_parse::<u64>("MCP_TOOL_TIMEOUT_MS") {
            config.dispatch.tool_timeout = Duration::from_millis(ms);
        }
        if let Some(validate) = env_bool("MCP_VALIDATE_INPUT") {
            config.dispatch.validate_input = validate;
        }

        // Context bounds
        config.context.max_sessions = env_parse("MCP_CONTEXT_MAX_SESSIONS");
        config.context.idle_ttl =
            env_parse::<u64>("MCP_CONTEXT_IDLE_TTL_SECS").map(Duration::from_secs);

        if let Ok(url) = std::env::var("MCP_DOCS_BASE_URL") {
            config.integrations.docs_base_url = url;
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_list(key: &str) -> Vec<String> {
    std::env::var(key)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
