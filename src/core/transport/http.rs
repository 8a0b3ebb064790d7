//! HTTP transport implementation.
//!
//! A REST adapter over the dispatch core, so standard HTTP clients (curl,
//! browsers, etc.) can list and execute tools without speaking MCP.
//!
//! Routes:
//! - `GET  /health` - liveness, unauthenticated
//! - `GET  /mcp/info` - server metadata
//! - `GET  /mcp/tools` - `{ "tools": [...] }`
//! - `POST /mcp/execute/{toolId}` - body is the tool input object
//! - `POST /mcp/sessions` - issue a session id
//! - `GET|DELETE /mcp/sessions/{id}` - inspect or drop a session context
//!
//! Every `/mcp/*` route passes through the security gate's request
//! authentication first.

use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::security::RequestCredentials;
use crate::domains::tools::{ToolDescriptor, ToolError, ToolInput};

/// Header naming the session whose context records the execution.
pub const SESSION_HEADER: &str = "x-mcp-session";

/// Header overriding the execution deadline, in milliseconds.
pub const TIMEOUT_HEADER: &str = "x-mcp-timeout-ms";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
struct AppState {
    server: McpServer,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the router for `server`.
    pub fn router(server: McpServer, enable_cors: bool) -> Router {
        let state = AppState { server };

        let mcp = Router::new()
            .route("/info", get(server_info))
            .route("/tools", get(list_tools))
            .route("/execute/{tool_id}", post(execute_tool))
            .route("/sessions", post(create_session))
            .route("/sessions/{session_id}", get(get_session).delete(delete_session))
            .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

        let mut app = Router::new()
            .nest("/mcp", mcp)
            .route("/health", get(health_check))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        if enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Serve until Ctrl-C, then drain in-flight requests.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = Self::router(server, self.config.enable_cors);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (REST over HTTP, CORS {})", addr, cors_status);
        info!("  → Tools:   GET /mcp/tools");
        info!("  → Execute: POST /mcp/execute/{{toolId}}");
        info!("  → Health:  GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        info!("HTTP transport finished");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
    #[serde(rename = "toolId", skip_serializing_if = "Option::is_none")]
    tool_id: Option<String>,
}

/// An error response: status plus `{error, kind, toolId}` body.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, kind: &'static str, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                kind,
                tool_id: None,
            },
        }
    }

    fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", error)
    }

    fn unauthenticated() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "Missing or invalid credentials",
        )
    }

    fn session_not_found(id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "session_not_found",
            format!("Session {} not found", id),
        )
    }

    fn with_tool(mut self, tool_id: &str) -> Self {
        self.body.tool_id = Some(tool_id.to_string());
        self
    }
}

impl From<ToolError> for ApiError {
    fn from(err: ToolError) -> Self {
        let status = match &err {
            ToolError::InvalidArguments { .. } | ToolError::ExecutionFailed { .. } => {
                StatusCode::BAD_REQUEST
            }
            ToolError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ToolError::NotFound(_) => StatusCode::NOT_FOUND,
            ToolError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            ToolError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            body: ErrorBody {
                error: err.to_string(),
                kind: err.kind(),
                tool_id: err.tool_id().map(String::from),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// ============================================================================
// Middleware
// ============================================================================

async fn require_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let credentials = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(RequestCredentials::with_authorization)
        .unwrap_or_default();

    if !state.server.authenticate_request(&credentials).await {
        warn!("Rejected unauthenticated request to {}", request.uri().path());
        return ApiError::unauthenticated().into_response();
    }

    next.run(request).await
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn server_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.server.info())
}

async fn list_tools(State(state): State<AppState>) -> impl IntoResponse {
    let tools = state.server.list_tools();
    let tools: Vec<&ToolDescriptor> = tools.iter().map(|t| t.as_ref()).collect();
    Json(json!({ "tools": tools }))
}

#[instrument(skip_all, fields(tool = %tool_id))]
async fn execute_tool(
    State(state): State<AppState>,
    Path(tool_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let input = parse_input(&body).map_err(|e| e.with_tool(&tool_id))?;
    let deadline = parse_deadline(&headers)?
        .unwrap_or(state.server.config().dispatch.tool_timeout);

    let output = state
        .server
        .execute_tool_with_timeout(&tool_id, input, deadline)
        .await?;

    if let Some(session_id) = header_str(&headers, SESSION_HEADER) {
        let context = state.server.contexts().get_context(session_id);
        context.set("lastTool", json!(tool_id));
        context.set("lastExecutedAt", json!(chrono::Utc::now().to_rfc3339()));
        debug!("Recorded {} in session {}", tool_id, session_id);
    }

    Ok(Json(Value::Object(output)))
}

async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let context = state.server.contexts().create_session();
    info!("Created session {}", context.id());
    (StatusCode::CREATED, Json(json!({ "sessionId": context.id() })))
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let contexts = state.server.contexts();
    if !contexts.contains(&session_id) {
        return Err(ApiError::session_not_found(&session_id));
    }
    let snapshot = contexts.get_context(&session_id).get_all();
    Ok(Json(json!({ "sessionId": session_id, "state": snapshot })))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.server.contexts().remove_context(&session_id) {
        info!("Removed session {}", session_id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::session_not_found(&session_id))
    }
}

/// Decode the request body as a tool input. An empty body is an empty input.
fn parse_input(body: &[u8]) -> Result<ToolInput, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ToolInput::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(input)) => Ok(input),
        Ok(_) => Err(ApiError::bad_request("Request body must be a JSON object")),
        Err(e) => Err(ApiError::bad_request(format!("Invalid JSON body: {}", e))),
    }
}

fn parse_deadline(headers: &HeaderMap) -> Result<Option<Duration>, ApiError> {
    let Some(raw) = header_str(headers, TIMEOUT_HEADER) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Some(Duration::from_millis(ms))),
        _ => Err(ApiError::bad_request(format!(
            "Header {} must be a positive integer",
            TIMEOUT_HEADER
        ))),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
