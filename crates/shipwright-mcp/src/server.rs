// shipwright-mcp/src/server.rs
// ============================================================================
// Module: MCP Server
// Description: JSON-RPC 2.0 server over stdio and HTTP transports.
// Purpose: Expose the Shipwright tool router to MCP clients.
// Dependencies: axum, shipwright-config, shipwright-core, tokio
// ============================================================================

//! ## Overview
//! The MCP server exposes the Shipwright tools using JSON-RPC 2.0 over stdio
//! (Content-Length framing) or HTTP POST. All calls route through
//! [`crate::tools::ToolRouter`]; the server owns only the wire concerns:
//! framing, body limits, and error-code mapping.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::ConnectInfo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use shipwright_config::ServerTransport;
use shipwright_config::ShipwrightConfig;
use shipwright_core::WizardEngine;

use crate::audit::StderrAuditSink;
use crate::tools::RequestContext;
use crate::tools::ToolDefinition;
use crate::tools::ToolError;
use crate::tools::ToolRouter;

// ============================================================================
// SECTION: MCP Server
// ============================================================================

/// MCP server instance.
pub struct McpServer {
    /// Server configuration.
    config: ShipwrightConfig,
    /// Tool router for request dispatch.
    router: ToolRouter,
}

impl McpServer {
    /// Builds a new MCP server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when initialization fails.
    pub fn from_config(config: ShipwrightConfig) -> Result<Self, McpServerError> {
        config.validate().map_err(|err| McpServerError::Config(err.to_string()))?;
        let plan = config.step_plan().map_err(|err| McpServerError::Init(err.to_string()))?;
        let catalog = config.validation_catalog();
        let engine = WizardEngine::new(plan, catalog);
        let router = ToolRouter::new(engine, Arc::new(StderrAuditSink));
        Ok(Self {
            config,
            router,
        })
    }

    /// Returns the tool router, for embedding or tests.
    #[must_use]
    pub const fn router(&self) -> &ToolRouter {
        &self.router
    }

    /// Serves requests using the configured transport.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when the server fails.
    pub async fn serve(self) -> Result<(), McpServerError> {
        let max_body_bytes = self.config.server.max_body_bytes;
        match self.config.server.transport {
            ServerTransport::Stdio => serve_stdio(&self.router, max_body_bytes),
            ServerTransport::Http => serve_http(self.config, self.router).await,
        }
    }
}

// ============================================================================
// SECTION: Stdio Transport
// ============================================================================

/// Serves JSON-RPC requests over stdin/stdout until stdin closes.
fn serve_stdio(router: &ToolRouter, max_body_bytes: usize) -> Result<(), McpServerError> {
    let mut reader = BufReader::new(std::io::stdin());
    let mut writer = std::io::stdout();
    loop {
        let Some(bytes) = read_framed(&mut reader, max_body_bytes)? else {
            return Ok(());
        };
        let request: JsonRpcRequest = serde_json::from_slice(&bytes)
            .map_err(|_| McpServerError::Transport("invalid json-rpc request".to_string()))?;
        let context = RequestContext::stdio();
        let (_, response) = handle_request(router, &context, request);
        let payload = serde_json::to_vec(&response)
            .map_err(|_| McpServerError::Transport("json-rpc serialization failed".to_string()))?;
        write_framed(&mut writer, &payload)?;
    }
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Shared server state for HTTP handlers.
#[derive(Clone)]
struct ServerState {
    /// Tool router for request dispatch.
    router: ToolRouter,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
}

/// Serves JSON-RPC requests over HTTP.
async fn serve_http(config: ShipwrightConfig, router: ToolRouter) -> Result<(), McpServerError> {
    let bind = config
        .server
        .bind
        .as_ref()
        .ok_or_else(|| McpServerError::Config("bind address required".to_string()))?;
    let addr: SocketAddr =
        bind.parse().map_err(|_| McpServerError::Config("invalid bind address".to_string()))?;
    let state = Arc::new(ServerState {
        router,
        max_body_bytes: config.server.max_body_bytes,
    });
    let app = Router::new().route("/rpc", post(handle_http)).with_state(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|_| McpServerError::Transport("http bind failed".to_string()))?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|_| McpServerError::Transport("http server failed".to_string()))
}

/// Handles HTTP JSON-RPC requests.
async fn handle_http(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    bytes: Bytes,
) -> impl IntoResponse {
    let context = RequestContext::http(Some(peer.ip()));
    let (status, response) = parse_request(&state, &context, &bytes);
    (status, axum::Json(response))
}

/// Parses and validates a JSON-RPC request payload.
fn parse_request(
    state: &ServerState,
    context: &RequestContext,
    bytes: &Bytes,
) -> (StatusCode, JsonRpcResponse) {
    if bytes.len() > state.max_body_bytes {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            error_response(Value::Null, -32070, "request body too large".to_string(), None),
        );
    }
    match serde_json::from_slice::<JsonRpcRequest>(bytes.as_ref()) {
        Ok(request) => handle_request(&state.router, context, request),
        Err(_) => (
            StatusCode::BAD_REQUEST,
            error_response(Value::Null, -32600, "invalid json-rpc request".to_string(), None),
        ),
    }
}

// ============================================================================
// SECTION: JSON-RPC Handling
// ============================================================================

/// Incoming JSON-RPC request payload.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC protocol version.
    jsonrpc: String,
    /// Request identifier.
    id: Value,
    /// Method name.
    method: String,
    /// Optional parameters payload.
    params: Option<Value>,
}

/// JSON-RPC response envelope.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    /// JSON-RPC protocol version.
    jsonrpc: &'static str,
    /// Request identifier.
    id: Value,
    /// Successful result payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    /// Error payload when the request fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error payload.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    /// Error code.
    code: i64,
    /// Human-readable error message.
    message: String,
    /// Structured error data when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

/// Tool call parameters for JSON-RPC requests.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    /// Tool name.
    name: String,
    /// Raw JSON arguments.
    #[serde(default)]
    arguments: Value,
}

/// Tool list response payload.
#[derive(Debug, Serialize)]
struct ToolListResult {
    /// Registered tool definitions.
    tools: Vec<ToolDefinition>,
}

/// Tool call response payload.
#[derive(Debug, Serialize)]
struct ToolCallResult {
    /// Tool output content.
    content: Vec<ToolContent>,
}

/// Tool output payloads for JSON-RPC responses.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ToolContent {
    /// JSON tool output.
    Json {
        /// JSON payload.
        json: Value,
    },
}

/// Dispatches a JSON-RPC request to the tool router.
fn handle_request(
    router: &ToolRouter,
    base_context: &RequestContext,
    request: JsonRpcRequest,
) -> (StatusCode, JsonRpcResponse) {
    let context = base_context.clone().with_request_id(request.id.to_string());
    if request.jsonrpc != "2.0" {
        return (
            StatusCode::BAD_REQUEST,
            error_response(request.id, -32600, "invalid json-rpc version".to_string(), None),
        );
    }
    match request.method.as_str() {
        "tools/list" => {
            let tools = router.list_tools();
            match serde_json::to_value(ToolListResult {
                tools,
            }) {
                Ok(value) => (StatusCode::OK, success_response(request.id, value)),
                Err(_) => jsonrpc_error(request.id, &ToolError::Serialization),
            }
        }
        "tools/call" => {
            let id = request.id;
            let params = request.params.unwrap_or(Value::Null);
            match serde_json::from_value::<ToolCallParams>(params) {
                Ok(call) => {
                    match router.handle_tool_call(&context, &call.name, call.arguments) {
                        Ok(result) => match serde_json::to_value(ToolCallResult {
                            content: vec![ToolContent::Json {
                                json: result,
                            }],
                        }) {
                            Ok(value) => (StatusCode::OK, success_response(id, value)),
                            Err(_) => jsonrpc_error(id, &ToolError::Serialization),
                        },
                        Err(err) => jsonrpc_error(id, &err),
                    }
                }
                Err(_) => (
                    StatusCode::BAD_REQUEST,
                    error_response(id, -32602, "invalid tool params".to_string(), None),
                ),
            }
        }
        _ => (
            StatusCode::BAD_REQUEST,
            error_response(request.id, -32601, "method not found".to_string(), None),
        ),
    }
}

/// Builds a successful JSON-RPC response.
const fn success_response(id: Value, result: Value) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0",
        id,
        result: Some(result),
        error: None,
    }
}

/// Builds a failed JSON-RPC response.
const fn error_response(
    id: Value,
    code: i64,
    message: String,
    data: Option<Value>,
) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0",
        id,
        result: None,
        error: Some(JsonRpcError {
            code,
            message,
            data,
        }),
    }
}

/// Builds a JSON-RPC error response for a tool failure.
fn jsonrpc_error(id: Value, error: &ToolError) -> (StatusCode, JsonRpcResponse) {
    let (status, code) = match error {
        ToolError::UnknownTool => (StatusCode::BAD_REQUEST, -32601),
        ToolError::InvalidParams(_) => (StatusCode::BAD_REQUEST, -32602),
        ToolError::UnknownStep(_) => (StatusCode::BAD_REQUEST, -32012),
        ToolError::Validation(_) => (StatusCode::OK, -32010),
        ToolError::PrerequisiteBlocked {
            ..
        } => (StatusCode::OK, -32011),
        ToolError::IncompleteConfiguration {
            ..
        } => (StatusCode::OK, -32020),
        ToolError::NoPendingConfirmation => (StatusCode::OK, -32021),
        ToolError::Internal(_) => (StatusCode::OK, -32050),
        ToolError::Serialization => (StatusCode::OK, -32060),
    };
    (status, error_response(id, code, error.to_string(), error.data()))
}

// ============================================================================
// SECTION: Framing Helpers
// ============================================================================

/// Reads a framed stdio payload using MCP Content-Length headers.
///
/// Returns `None` when stdin closes cleanly before a new frame starts.
fn read_framed(
    reader: &mut BufReader<impl Read>,
    max_body_bytes: usize,
) -> Result<Option<Vec<u8>>, McpServerError> {
    let mut content_length: Option<usize> = None;
    let mut line = String::new();
    loop {
        line.clear();
        let bytes = reader
            .read_line(&mut line)
            .map_err(|_| McpServerError::Transport("stdio read failed".to_string()))?;
        if bytes == 0 {
            if content_length.is_some() {
                return Err(McpServerError::Transport("stdio closed mid-frame".to_string()));
            }
            return Ok(None);
        }
        if line.trim().is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("Content-Length:") {
            let parsed = value
                .trim()
                .parse::<usize>()
                .map_err(|_| McpServerError::Transport("invalid content length".to_string()))?;
            content_length = Some(parsed);
        }
    }
    let len = content_length
        .ok_or_else(|| McpServerError::Transport("missing content length".to_string()))?;
    if len > max_body_bytes {
        return Err(McpServerError::Transport("payload too large".to_string()));
    }
    let mut buf = vec![0u8; len];
    reader
        .read_exact(&mut buf)
        .map_err(|_| McpServerError::Transport("stdio read failed".to_string()))?;
    Ok(Some(buf))
}

/// Writes a framed stdio payload using MCP Content-Length headers.
fn write_framed(writer: &mut impl Write, payload: &[u8]) -> Result<(), McpServerError> {
    let header = format!("Content-Length: {}\r\n\r\n", payload.len());
    writer
        .write_all(header.as_bytes())
        .map_err(|_| McpServerError::Transport("stdio write failed".to_string()))?;
    writer
        .write_all(payload)
        .map_err(|_| McpServerError::Transport("stdio write failed".to_string()))?;
    writer.flush().map_err(|_| McpServerError::Transport("stdio write failed".to_string()))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// MCP server errors.
#[derive(Debug, thiserror::Error)]
pub enum McpServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        clippy::dbg_macro,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        reason = "Test-only framing assertions."
    )]

    use std::io::BufReader;
    use std::io::Cursor;
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::Value;
    use serde_json::json;
    use shipwright_core::WizardEngine;

    use super::JsonRpcRequest;
    use super::handle_request;
    use super::read_framed;
    use crate::audit::NoopAuditSink;
    use crate::tools::RequestContext;
    use crate::tools::ToolRouter;

    /// Builds a JSON-RPC request for one tool call.
    fn tool_call(name: &str, arguments: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: json!(1),
            method: "tools/call".to_string(),
            params: Some(json!({"name": name, "arguments": arguments})),
        }
    }

    /// Builds a router over the default plan for request tests.
    fn test_router() -> ToolRouter {
        ToolRouter::new(WizardEngine::default(), Arc::new(NoopAuditSink))
    }

    #[test]
    fn tools_list_returns_the_definitions() {
        let router = test_router();
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: json!(7),
            method: "tools/list".to_string(),
            params: None,
        };
        let (status, response) = handle_request(&router, &RequestContext::stdio(), request);
        assert_eq!(status, StatusCode::OK);
        let result = response.result.expect("result");
        assert_eq!(result["tools"].as_array().expect("tools").len(), 13);
    }

    #[test]
    fn unknown_tools_map_to_method_not_found_code() {
        let router = test_router();
        let (status, response) = handle_request(
            &router,
            &RequestContext::stdio(),
            tool_call("warehouse_set", json!({})),
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.expect("error").code, -32601);
    }

    #[test]
    fn blocked_writes_carry_the_missing_steps_as_error_data() {
        let router = test_router();
        let (status, response) = handle_request(
            &router,
            &RequestContext::stdio(),
            tool_call("label_set", json!({"size": "4x6"})),
        );
        assert_eq!(status, StatusCode::OK);
        let error = response.error.expect("error");
        assert_eq!(error.code, -32011);
        assert_eq!(error.data.expect("data")["missing"], json!(["carrier", "options"]));
    }

    #[test]
    fn invalid_json_rpc_versions_are_rejected() {
        let router = test_router();
        let request = JsonRpcRequest {
            jsonrpc: "1.0".to_string(),
            id: json!(1),
            method: "tools/list".to_string(),
            params: None,
        };
        let (status, response) = handle_request(&router, &RequestContext::stdio(), request);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.expect("error").code, -32600);
    }

    #[test]
    fn successful_calls_wrap_the_result_as_json_content() {
        let router = test_router();
        let (status, response) = handle_request(
            &router,
            &RequestContext::stdio(),
            tool_call("carrier_set", json!({"carrier": "UPS", "service": "Ground"})),
        );
        assert_eq!(status, StatusCode::OK);
        let result = response.result.expect("result");
        assert_eq!(result["content"][0]["type"], "json");
        assert_eq!(result["content"][0]["json"]["saved"]["carrier"], "UPS");
    }

    #[test]
    fn read_framed_rejects_payload_over_limit() {
        let payload = br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let framed = format!(
            "Content-Length: {}\r\n\r\n{}",
            payload.len(),
            String::from_utf8_lossy(payload)
        );
        let mut reader = BufReader::new(Cursor::new(framed.into_bytes()));
        let result = read_framed(&mut reader, payload.len() - 1);
        assert!(result.is_err());
    }

    #[test]
    fn read_framed_accepts_payload_at_limit() {
        let payload = br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let framed = format!(
            "Content-Length: {}\r\n\r\n{}",
            payload.len(),
            String::from_utf8_lossy(payload)
        );
        let mut reader = BufReader::new(Cursor::new(framed.into_bytes()));
        let bytes = read_framed(&mut reader, payload.len()).expect("frame read");
        assert_eq!(bytes.as_deref(), Some(payload.as_slice()));
    }

    #[test]
    fn read_framed_reports_clean_eof_as_none() {
        let mut reader = BufReader::new(Cursor::new(Vec::new()));
        let result = read_framed(&mut reader, 1024).expect("eof read");
        assert!(result.is_none());
    }

    #[test]
    fn read_framed_requires_a_content_length_header() {
        let mut reader = BufReader::new(Cursor::new(b"\r\n{}".to_vec()));
        let result = read_framed(&mut reader, 1024);
        assert!(result.is_err());
    }
}
