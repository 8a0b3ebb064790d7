//! The dispatch core: MCP server implementation and lifecycle management.
//!
//! `McpServer` owns the tool registry, the security gate and the context
//! store, and is the only protocol surface transports depend on. It is an
//! explicitly constructed value: several independent servers can live in one
//! process, which is what the tests below rely on.
//!
//! ## Execution pipeline
//!
//! `execute_tool` runs, in order:
//! 1. authorization through the [`SecurityGate`] (denied = `Unauthorized`,
//!    nothing else happens)
//! 2. registry lookup (absent = `NotFound`)
//! 3. schema validation when enabled (`InvalidArguments`, handler untouched)
//! 4. the handler, on its own task, under a deadline (`Timeout` /
//!    `ExecutionFailed`)

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use serde::Serialize;
use tokio_util::task::AbortOnDropHandle;
use tracing::{debug, error, info, instrument, warn};

use super::config::Config;
use super::context::ContextStore;
use super::error::LifecycleError;
use super::security::{PolicyGate, RequestCredentials, SecurityGate};
use crate::domains::tools::{
    ToolDescriptor, ToolError, ToolInput, ToolOutput, ToolRegistry, definitions,
};

/// Lower bound on the idle-session sweep period.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(10);

/// Protocol identifier reported by `/mcp/info`.
pub const PROTOCOL_VERSION: &str = "1.0.0";
pub const PROTOCOL_FORMAT: &str = "json";

/// Lifecycle state of a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerState {
    Created,
    Running,
    Stopped,
}

/// Static server metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ServerMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
    pub protocol: ProtocolInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProtocolInfo {
    pub version: &'static str,
    pub format: &'static str,
}

/// The main MCP server handler.
///
/// Cloning is cheap; clones share the registry, gate, context store and
/// lifecycle state.
#[derive(Clone)]
pub struct McpServer {
    config: Arc<Config>,
    registry: Arc<ToolRegistry>,
    gate: Arc<dyn SecurityGate>,
    contexts: Arc<ContextStore>,
    state: Arc<Mutex<ServerState>>,
    sweeper: Arc<Mutex<Option<AbortOnDropHandle<()>>>>,
}

/// Builder for [`McpServer`] with a custom gate or an empty catalog.
pub struct McpServerBuilder {
    config: Config,
    gate: Option<Arc<dyn SecurityGate>>,
    with_catalog: bool,
}

impl McpServerBuilder {
    /// Use `gate` instead of the configured [`PolicyGate`].
    pub fn gate(mut self, gate: impl SecurityGate + 'static) -> Self {
        self.gate = Some(Arc::new(gate));
        self
    }

    /// Start with an empty registry instead of the built-in ARC catalog.
    pub fn without_catalog(mut self) -> Self {
        self.with_catalog = false;
        self
    }

    pub fn build(self) -> McpServer {
        let config = Arc::new(self.config);
        let gate = self
            .gate
            .unwrap_or_else(|| Arc::new(PolicyGate::new(config.security.clone())));

        let registry = Arc::new(ToolRegistry::new());
        if self.with_catalog {
            registry.register_all(definitions::catalog(&config.integrations));
            info!("Registered {} catalog tools", registry.len());
        }

        McpServer {
            contexts: Arc::new(ContextStore::new(&config.context)),
            config,
            registry,
            gate,
            state: Arc::new(Mutex::new(ServerState::Created)),
            sweeper: Arc::new(Mutex::new(None)),
        }
    }
}

impl McpServer {
    /// Create a new MCP server with the given configuration and the full
    /// built-in catalog.
    pub fn new(config: Config) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: Config) -> McpServerBuilder {
        McpServerBuilder {
            config,
            gate: None,
            with_catalog: true,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// The per-session context store.
    pub fn contexts(&self) -> &ContextStore {
        &self.contexts
    }

    pub fn info(&self) -> ServerMetadata {
        ServerMetadata {
            name: self.config.server.name.clone(),
            version: self.config.server.version.clone(),
            description: self.config.server.description.clone(),
            protocol: ProtocolInfo {
                version: PROTOCOL_VERSION,
                format: PROTOCOL_FORMAT,
            },
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub fn state(&self) -> ServerState {
        *self.state.lock()
    }

    /// Mark the server as running. Fails if it already is.
    ///
    /// With an idle TTL configured, this also starts the periodic sweep of
    /// expired sessions; it runs until `stop`.
    pub async fn start(&self) -> Result<(), LifecycleError> {
        let mut state = self.state.lock();
        if *state == ServerState::Running {
            return Err(LifecycleError::AlreadyRunning);
        }
        *state = ServerState::Running;
        if let Some(ttl) = self.config.context.idle_ttl {
            *self.sweeper.lock() = Some(self.spawn_sweeper(ttl.max(MIN_SWEEP_INTERVAL)));
        }
        info!(
            "{} v{} started with {} tools",
            self.config.server.name,
            self.config.server.version,
            self.registry.len()
        );
        Ok(())
    }

    /// Mark the server as stopped. Fails if it is not running.
    pub async fn stop(&self) -> Result<(), LifecycleError> {
        let mut state = self.state.lock();
        if *state != ServerState::Running {
            return Err(LifecycleError::NotRunning);
        }
        *state = ServerState::Stopped;
        drop(self.sweeper.lock().take());
        let swept = self.contexts.sweep_expired();
        info!("{} stopped ({} expired sessions swept)", self.config.server.name, swept);
        Ok(())
    }

    fn spawn_sweeper(&self, period: Duration) -> AbortOnDropHandle<()> {
        let contexts = Arc::clone(&self.contexts);
        AbortOnDropHandle::new(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let swept = contexts.sweep_expired();
                if swept > 0 {
                    debug!("Idle sweep dropped {} sessions", swept);
                }
            }
        }))
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// All registered tools in listing order.
    pub fn list_tools(&self) -> Vec<Arc<ToolDescriptor>> {
        self.registry.list()
    }

    /// Register (or replace) a tool after construction.
    pub fn register_tool(&self, descriptor: ToolDescriptor) {
        let id = descriptor.id.clone();
        if self.registry.register(descriptor).is_none() {
            info!("Registered tool {}", id);
        }
    }

    /// Decide whether an inbound transport request may proceed.
    pub async fn authenticate_request(&self, credentials: &RequestCredentials) -> bool {
        self.gate.authenticate_request(credentials).await
    }

    /// Execute a tool under the configured default deadline.
    pub async fn execute_tool(&self, id: &str, input: ToolInput) -> Result<ToolOutput, ToolError> {
        self.execute_tool_with_timeout(id, input, self.config.dispatch.tool_timeout)
            .await
    }

    /// Execute a tool, failing with [`ToolError::Timeout`] once `deadline`
    /// elapses.
    ///
    /// The handler task is aborted on timeout, and also when the returned
    /// future is dropped before completion.
    #[instrument(skip(self, input), fields(tool = %id))]
    pub async fn execute_tool_with_timeout(
        &self,
        id: &str,
        input: ToolInput,
        deadline: Duration,
    ) -> Result<ToolOutput, ToolError> {
        let decision = self.gate.authorize_tool_execution(id, &input).await;
        if !decision.allowed {
            let reason = decision
                .reason
                .unwrap_or_else(|| "access denied".to_string());
            warn!("Execution of {} denied: {}", id, reason);
            return Err(ToolError::unauthorized(id, reason));
        }

        let Some(tool) = self.registry.get(id) else {
            warn!("Tool {} not found", id);
            return Err(ToolError::not_found(id));
        };

        if self.config.dispatch.validate_input {
            if let Err(violations) = tool.input_schema.validate(&input) {
                debug!("Rejected input for {}: {:?}", id, violations);
                return Err(ToolError::invalid_arguments(id, violations));
            }
        }

        debug!("Invoking handler for {}", id);
        let handler = tool.handler();
        let mut task =
            AbortOnDropHandle::new(tokio::spawn(async move { handler.call(input).await }));

        match tokio::time::timeout(deadline, &mut task).await {
            Ok(Ok(result)) => result.map_err(|e| e.into_tool_error(id)),
            Ok(Err(join_error)) if join_error.is_panic() => {
                let message = panic_message(join_error.into_panic());
                error!("Handler for {} panicked: {}", id, message);
                Err(ToolError::execution_failed(id, format!("handler panicked: {}", message)))
            }
            Ok(Err(join_error)) => Err(ToolError::execution_failed(id, join_error.to_string())),
            Err(_) => {
                task.abort();
                warn!("Tool {} exceeded deadline of {:?}", id, deadline);
                Err(ToolError::Timeout {
                    tool: id.to_string(),
                    after: deadline,
                })
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Map a descriptor to its MCP tool listing.
fn to_mcp_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool::new(
        descriptor.id.clone(),
        descriptor.description.clone(),
        descriptor.input_schema.as_json_object(),
    )
}

/// Map a dispatch outcome to an MCP `tools/call` response.
///
/// Failures of the tool itself are reported as tool error results so the
/// model can see them; protocol-level failures become MCP errors.
fn to_call_result(outcome: Result<ToolOutput, ToolError>) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(output) => {
            let text = serde_json::to_string(&output)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        Err(e @ (ToolError::ExecutionFailed { .. } | ToolError::Timeout { .. })) => {
            Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
        }
        Err(e @ (ToolError::NotFound(_) | ToolError::InvalidArguments { .. })) => {
            Err(McpError::invalid_params(e.to_string(), None))
        }
        Err(e @ ToolError::Unauthorized { .. }) => {
            Err(McpError::invalid_request(e.to_string(), None))
        }
        Err(e @ ToolError::Internal(_)) => Err(McpError::internal_error(e.to_string(), None)),
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo {
            instructions: Some(self.config.server.description.clone()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        };
        info.server_info.name = self.config.server.name.clone();
        info.server_info.version = self.config.server.version.clone();
        info
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        let tools = self
            .registry
            .list()
            .iter()
            .map(|d| to_mcp_tool(d))
            .collect();
        Ok(ListToolsResult {
            tools,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let input = request.arguments.unwrap_or_default();
        to_call_result(self.execute_tool(&request.name, input).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::security::{AllowAll, AuthorizationDecision};
    use crate::domains::tools::{HandlerError, HandlerResult};
    use async_trait::async_trait;
    use rmcp::model::ErrorCode;
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_test::{assert_err, assert_ok};

    struct DenyAll;

    #[async_trait]
    impl SecurityGate for DenyAll {
        async fn authorize_tool_execution(&self, _: &str, _: &ToolInput) -> AuthorizationDecision {
            AuthorizationDecision::deny("denied for test")
        }

        async fn authenticate_request(&self, _: &RequestCredentials) -> bool {
            false
        }
    }

    fn empty_server() -> McpServer {
        McpServer::builder(Config::default())
            .gate(AllowAll)
            .without_catalog()
            .build()
    }

    fn object(value: serde_json::Value) -> ToolInput {
        value.as_object().cloned().unwrap()
    }

    fn echo_tool() -> ToolDescriptor {
        ToolDescriptor::builder("echo.test").handler_fn(|input| async move { Ok(input) })
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct NameParams {
        name: String,
    }

    /// Sleeps for `delay`, then records that it ran to completion.
    fn sleepy_tool(id: &str, delay: Duration, completed: Arc<AtomicUsize>) -> ToolDescriptor {
        ToolDescriptor::builder(id).handler_fn(move |input| {
            let completed = completed.clone();
            async move {
                tokio::time::sleep(delay).await;
                completed.fetch_add(1, Ordering::SeqCst);
                Ok(input)
            }
        })
    }

    fn counting_tool(id: &str, calls: Arc<AtomicUsize>) -> ToolDescriptor {
        ToolDescriptor::builder(id).handler_fn(move |input| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(input)
            }
        })
    }

    #[tokio::test]
    async fn test_echo_returns_input() {
        let server = empty_server();
        server.register_tool(echo_tool());

        let output = server.execute_tool("echo.test", object(json!({"a": 1}))).await;
        assert_eq!(assert_ok!(output), object(json!({"a": 1})));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_not_found() {
        let server = empty_server();
        let err = assert_err!(server.execute_tool("nope.tool", ToolInput::new()).await);

        assert!(matches!(err, ToolError::NotFound(ref id) if id == "nope.tool"));
        assert!(err.to_string().contains("nope.tool"));
    }

    #[tokio::test]
    async fn test_denied_execution_never_invokes_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let server = McpServer::builder(Config::default())
            .gate(DenyAll)
            .without_catalog()
            .build();
        server.register_tool(counting_tool("count.me", calls.clone()));

        let err = assert_err!(server.execute_tool("count.me", ToolInput::new()).await);
        assert!(matches!(err, ToolError::Unauthorized { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // Denial comes before lookup.
        let err = assert_err!(server.execute_tool("nope.tool", ToolInput::new()).await);
        assert_eq!(err.kind(), "unauthorized");
    }

    #[tokio::test]
    async fn test_validation_rejects_before_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let server = empty_server();
        let tool = ToolDescriptor::builder("strict.tool")
            .params::<NameParams>()
            .handler_fn({
                let calls = calls.clone();
                move |input| {
                    let calls = calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(input)
                    }
                }
            });
        server.register_tool(tool);

        let err = assert_err!(server.execute_tool("strict.tool", object(json!({"name": 3}))).await);
        match err {
            ToolError::InvalidArguments { violations, .. } => {
                assert_eq!(violations.len(), 1);
                assert!(violations[0].starts_with("/name: "), "{violations:?}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_validation_can_be_disabled() {
        let mut config = Config::default();
        config.dispatch.validate_input = false;
        let server = McpServer::builder(config).without_catalog().build();
        server.register_tool(
            ToolDescriptor::builder("loose.tool")
                .params::<NameParams>()
                .handler_fn(|input| async move { Ok(input) }),
        );

        assert_ok!(server.execute_tool("loose.tool", ToolInput::new()).await);
    }

    #[tokio::test]
    async fn test_handler_errors_are_mapped() {
        let server = empty_server();
        server.register_tool(
            ToolDescriptor::builder("fail.tool")
                .handler_fn(|_| async move { Err(HandlerError::failed("downstream unavailable")) }),
        );
        server.register_tool(
            ToolDescriptor::builder("picky.tool")
                .handler_fn(|_| async move { Err(HandlerError::invalid_arguments("bad token")) }),
        );

        let err = assert_err!(server.execute_tool("fail.tool", ToolInput::new()).await);
        assert!(matches!(
            err,
            ToolError::ExecutionFailed { ref message, .. } if message == "downstream unavailable"
        ));

        let err = assert_err!(server.execute_tool("picky.tool", ToolInput::new()).await);
        assert_eq!(err.kind(), "validation_error");
    }

    #[tokio::test]
    async fn test_timeout_is_distinct_from_execution_error() {
        let server = empty_server();
        server.register_tool(ToolDescriptor::builder("slow.tool").handler_fn(|input| async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(input)
        }));

        let err = assert_err!(
            server
                .execute_tool_with_timeout("slow.tool", ToolInput::new(), Duration::from_millis(20))
                .await
        );
        assert!(matches!(err, ToolError::Timeout { .. }));
        assert_eq!(err.kind(), "timeout");
    }

    #[tokio::test]
    async fn test_timeout_cancels_the_handler() {
        let completed = Arc::new(AtomicUsize::new(0));
        let server = empty_server();
        server.register_tool(sleepy_tool(
            "sleepy.tool",
            Duration::from_millis(100),
            completed.clone(),
        ));

        let err = assert_err!(
            server
                .execute_tool_with_timeout("sleepy.tool", ToolInput::new(), Duration::from_millis(20))
                .await
        );
        assert_eq!(err.kind(), "timeout");

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dropped_call_cancels_the_handler() {
        let completed = Arc::new(AtomicUsize::new(0));
        let server = empty_server();
        server.register_tool(sleepy_tool(
            "sleepy.tool",
            Duration::from_millis(100),
            completed.clone(),
        ));

        let outer = tokio::time::timeout(
            Duration::from_millis(10),
            server.execute_tool("sleepy.tool", ToolInput::new()),
        )
        .await;
        assert!(outer.is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_panicking_handler_surfaces_as_execution_error() {
        async fn explode(_: ToolInput) -> HandlerResult {
            panic!("boom")
        }

        let server = empty_server();
        server.register_tool(ToolDescriptor::builder("panic.tool").handler_fn(explode));

        let err = assert_err!(server.execute_tool("panic.tool", ToolInput::new()).await);
        match err {
            ToolError::ExecutionFailed { message, .. } => assert!(message.contains("boom")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_executions_complete_independently() {
        let server = empty_server();
        server.register_tool(ToolDescriptor::builder("slow.tool").handler_fn(|_| async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(object(json!({"who": "slow"})))
        }));
        server.register_tool(
            ToolDescriptor::builder("fast.tool")
                .handler_fn(|_| async move { Ok(object(json!({"who": "fast"}))) }),
        );

        let slow = tokio::spawn({
            let server = server.clone();
            async move { server.execute_tool("slow.tool", ToolInput::new()).await }
        });
        let fast = server.execute_tool("fast.tool", ToolInput::new()).await;

        assert_eq!(assert_ok!(fast)["who"], json!("fast"));
        assert!(!slow.is_finished());
        assert_eq!(assert_ok!(slow.await.unwrap())["who"], json!("slow"));
    }

    #[tokio::test]
    async fn test_late_registration_replaces_in_place() {
        let server = empty_server();
        server.register_tool(echo_tool());
        server.register_tool(ToolDescriptor::builder("other.tool").handler_fn(|i| async move { Ok(i) }));
        server.register_tool(
            ToolDescriptor::builder("echo.test")
                .version("2.0.0")
                .handler_fn(|_| async move { Ok(ToolOutput::new()) }),
        );

        let tools = server.list_tools();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].id, "echo.test");
        assert_eq!(tools[0].version, "2.0.0");
        let output = server.execute_tool("echo.test", object(json!({"a": 1}))).await;
        assert!(assert_ok!(output).is_empty());
    }

    #[tokio::test]
    async fn test_lifecycle_transitions() {
        let server = empty_server();
        assert_eq!(server.state(), ServerState::Created);
        assert_eq!(server.stop().await, Err(LifecycleError::NotRunning));

        assert_ok!(server.start().await);
        assert_eq!(server.state(), ServerState::Running);
        assert_eq!(server.start().await, Err(LifecycleError::AlreadyRunning));

        assert_ok!(server.stop().await);
        assert_eq!(server.state(), ServerState::Stopped);
        assert_eq!(server.stop().await, Err(LifecycleError::NotRunning));
    }

    #[tokio::test]
    async fn test_running_server_sweeps_idle_sessions() {
        let mut config = Config::default();
        config.context.idle_ttl = Some(Duration::from_millis(20));
        let server = McpServer::builder(config)
            .gate(AllowAll)
            .without_catalog()
            .build();

        assert_ok!(server.start().await);
        for _ in 0..100 {
            server.contexts().create_session();
        }
        assert_eq!(server.contexts().len(), 100);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(server.contexts().is_empty());
        assert_ok!(server.stop().await);
    }

    #[tokio::test]
    async fn test_default_catalog() {
        let server = McpServer::new(Config::default());
        let ids: Vec<String> = server.list_tools().iter().map(|t| t.id.clone()).collect();

        assert_eq!(ids.len(), 9);
        assert_eq!(ids.first().map(String::as_str), Some("arc.api.authentication"));
        assert_eq!(ids.last().map(String::as_str), Some("arc.docs.search"));
        assert!(
            server
                .authenticate_request(&RequestCredentials::anonymous())
                .await
        );
    }

    #[tokio::test]
    async fn test_catalog_tool_executes_through_dispatch() {
        let server = McpServer::new(Config::default());
        let output = server
            .execute_tool(
                "arc.api.authentication",
                object(json!({"action": "verifyToken", "token": "t"})),
            )
            .await;
        assert_eq!(assert_ok!(output)["valid"], json!(true));
    }

    #[test]
    fn test_info_metadata() {
        let info = serde_json::to_value(empty_server().info()).unwrap();
        assert_eq!(info["name"], json!("ARC Model Context Server"));
        assert_eq!(info["protocol"], json!({"version": "1.0.0", "format": "json"}));
    }

    #[test]
    fn test_mcp_tool_mapping() {
        let tool = to_mcp_tool(&echo_tool());
        assert_eq!(tool.name, "echo.test");
        assert_eq!(tool.input_schema["type"], json!("object"));
    }

    #[test]
    fn test_call_result_mapping() {
        let ok = to_call_result(Ok(object(json!({"a": 1})))).unwrap();
        assert_eq!(ok.is_error, Some(false));

        let failed = to_call_result(Err(ToolError::execution_failed("t", "boom"))).unwrap();
        assert_eq!(failed.is_error, Some(true));

        let err = to_call_result(Err(ToolError::not_found("t"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let err = to_call_result(Err(ToolError::unauthorized("t", "no"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_REQUEST);
    }
}
