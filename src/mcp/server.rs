//! MCP server exposing silkscreen generation as tools.
//!
//! This module implements the MCP server lifecycle:
//!
//! 1. **Initialisation**: Capability negotiation and version agreement
//! 2. **Operation**: Handling tool calls and other requests
//! 3. **Shutdown**: On stdin EOF or SIGINT/SIGTERM (Ctrl+C on Windows)
//!
//! # Tools
//!
//! - `generate_silkscreen`: expand the outline around the pads and cut it
//!   back into silkscreen polylines
//! - `expand_outline`: only the expansion, no clipping
//! - `check_outline`: report on an outline without running the algorithm
//!
//! Each tool takes either an inline `footprint` document or a `filepath`
//! to one inside the allowed directories.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::geometry::polygon;
use crate::mcp::protocol::{
    parse_message, IncomingMessage, JsonRpcError, JsonRpcNotification, JsonRpcRequest,
    JsonRpcResponse, RequestId, MCP_PROTOCOL_VERSION, SERVER_NAME,
};
use crate::mcp::transport::{StdioTransport, Transport};
use crate::silkscreen::{
    expand_outline, generate_silkscreen, validate_pads, ExpansionReport, Footprint,
    SilkscreenError, SilkscreenOptions,
};

/// Server state in the MCP lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Waiting for initialize request.
    AwaitingInit,
    /// Initialize received, waiting for initialized notification.
    Initialising,
    /// Ready for normal operation.
    Running,
    /// Shutdown in progress.
    ShuttingDown,
}

/// Server capabilities advertised during initialisation.
#[derive(Debug, Clone, Serialize)]
pub struct ServerCapabilities {
    /// Tool-related capabilities.
    pub tools: ToolCapabilities,
}

impl Default for ServerCapabilities {
    fn default() -> Self {
        Self {
            tools: ToolCapabilities { list_changed: false },
        }
    }
}

/// Tool-specific capabilities.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCapabilities {
    /// Whether the tool list can change during the session.
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Server information for initialisation response.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Client information received during initialisation.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    /// Client name.
    pub name: String,
    /// Client version.
    #[serde(default)]
    pub version: Option<String>,
}

/// Parameters for the initialize request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Protocol version requested by client.
    pub protocol_version: String,
    /// Client capabilities.
    #[serde(default)]
    pub capabilities: Value,
    /// Client information.
    #[serde(default)]
    pub client_info: Option<ClientInfo>,
}

/// A tool definition for tools/list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
}

/// Parameters for tools/call request.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call.
    pub name: String,
    /// Arguments for the tool.
    #[serde(default)]
    pub arguments: Value,
}

/// Content item in a tool call response.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

/// Result of a tool call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the tool call resulted in an error.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Creates a successful text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Creates an error text result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// Pretty-prints a JSON body as a text result.
    fn json(body: &Value, is_error: bool) -> Self {
        match serde_json::to_string_pretty(body) {
            Ok(text) if is_error => Self::error(text),
            Ok(text) => Self::text(text),
            Err(e) => Self::error(format!("Failed to serialise result: {e}")),
        }
    }

    /// Text of the first content item.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| match c {
            ToolContent::Text { text } => text.as_str(),
        })
    }
}

/// The MCP server for silkscreen generation.
pub struct McpServer<R = tokio::io::BufReader<tokio::io::Stdin>, W = tokio::io::Stdout> {
    /// Current server state.
    state: ServerState,
    /// The transport layer.
    transport: Transport<R, W>,
    /// Negotiated protocol version (set after initialisation).
    protocol_version: Option<String>,
    /// Directories footprint files may be read from.
    allowed_paths: Vec<PathBuf>,
    /// Defaults for generation runs.
    options: SilkscreenOptions,
}

impl McpServer {
    /// Creates a server on stdin/stdout.
    #[must_use]
    pub fn new(allowed_paths: Vec<PathBuf>, options: SilkscreenOptions) -> Self {
        Self::with_transport(StdioTransport::stdio(), allowed_paths, options)
    }
}

impl<R, W> McpServer<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a server over an arbitrary transport.
    pub const fn with_transport(
        transport: Transport<R, W>,
        allowed_paths: Vec<PathBuf>,
        options: SilkscreenOptions,
    ) -> Self {
        Self {
            state: ServerState::AwaitingInit,
            transport,
            protocol_version: None,
            allowed_paths,
            options,
        }
    }

    /// Returns the current server state.
    #[must_use]
    pub const fn state(&self) -> ServerState {
        self.state
    }

    /// Negotiated protocol version, once initialised.
    #[must_use]
    pub fn protocol_version(&self) -> Option<&str> {
        self.protocol_version.as_deref()
    }

    /// Consumes the server, returning its transport.
    #[must_use]
    pub fn into_transport(self) -> Transport<R, W> {
        self.transport
    }

    /// Runs the server until the input closes or a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if transport I/O fails.
    #[cfg(unix)]
    pub async fn run(&mut self) -> io::Result<()> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        loop {
            tokio::select! {
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT, shutting down");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, shutting down");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                line = self.transport.read_line() => {
                    if self.handle_transport_result(line).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Runs the server until the input closes or Ctrl+C is pressed.
    ///
    /// # Errors
    ///
    /// Returns an error if transport I/O fails.
    #[cfg(windows)]
    pub async fn run(&mut self) -> io::Result<()> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    tracing::info!("Received Ctrl+C, shutting down");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                line = self.transport.read_line() => {
                    if self.handle_transport_result(line).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Runs the server until the input closes, without signal handling.
    ///
    /// # Errors
    ///
    /// Returns an error if transport I/O fails.
    pub async fn serve(&mut self) -> io::Result<()> {
        loop {
            let line = self.transport.read_line().await;
            if self.handle_transport_result(line).await? {
                return Ok(());
            }
        }
    }

    /// Returns `true` if the server should stop.
    async fn handle_transport_result(&mut self, line: io::Result<Option<String>>) -> io::Result<bool> {
        let Some(line) = line? else {
            tracing::info!("Input closed, shutting down");
            self.state = ServerState::ShuttingDown;
            return Ok(true);
        };

        if line.trim().is_empty() {
            return Ok(false);
        }

        match parse_message(&line) {
            Ok(IncomingMessage::Request(req)) => self.handle_request(&req).await?,
            Ok(IncomingMessage::Notification(notif)) => self.handle_notification(&notif),
            Err(error) => self.transport.write_message(&error).await?,
        }

        Ok(self.state == ServerState::ShuttingDown)
    }

    async fn handle_request(&mut self, req: &JsonRpcRequest) -> io::Result<()> {
        let response = match req.method.as_str() {
            "initialize" => self.handle_initialize(req),
            "tools/list" => self.handle_tools_list(req),
            "tools/call" => self.handle_tools_call(req),
            "ping" => Ok(JsonRpcResponse::success(req.id.clone(), json!({}))),
            _ => Err(JsonRpcError::method_not_found(req.id.clone(), &req.method)),
        };

        match response {
            Ok(resp) => self.transport.write_message(&resp).await,
            Err(error) => self.transport.write_message(&error).await,
        }
    }

    fn handle_notification(&mut self, notif: &JsonRpcNotification) {
        if notif.method == "notifications/initialized" && self.state == ServerState::Initialising {
            tracing::info!("Client initialised, server running");
            self.state = ServerState::Running;
        }
    }

    fn handle_initialize(&mut self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        if self.state != ServerState::AwaitingInit {
            return Err(JsonRpcError::invalid_request(
                Some(req.id.clone()),
                "Server already initialised",
            ));
        }

        let params: InitializeParams = req.params_as("initialize")?;
        if let Some(client) = &params.client_info {
            tracing::info!(
                client = %client.name,
                client_version = client.version.as_deref().unwrap_or("unknown"),
                requested_version = %params.protocol_version,
                "Initialising"
            );
        }

        self.protocol_version = Some(MCP_PROTOCOL_VERSION.to_string());
        self.state = ServerState::Initialising;

        Ok(JsonRpcResponse::success(
            req.id.clone(),
            json!({
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": ServerCapabilities::default(),
                "serverInfo": ServerInfo::default(),
            }),
        ))
    }

    fn handle_tools_list(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;
        Ok(JsonRpcResponse::success(
            req.id.clone(),
            json!({ "tools": tool_definitions() }),
        ))
    }

    fn handle_tools_call(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let params: ToolCallParams = req.params_as("tool call")?;
        tracing::debug!(tool = %params.name, "Tool call");

        let result = self.call_tool(&params.name, &params.arguments);

        let value = serde_json::to_value(&result).map_err(|e| {
            tracing::error!(error = %e, "Failed to serialise tool call result");
            JsonRpcError::internal_error(req.id.clone(), "Failed to serialise tool call result")
        })?;

        Ok(JsonRpcResponse::success(req.id.clone(), value))
    }

    fn require_running(&self, id: &RequestId) -> Result<(), JsonRpcError> {
        if self.state != ServerState::Running {
            return Err(JsonRpcError::invalid_request(
                Some(id.clone()),
                "Server not initialised",
            ));
        }
        Ok(())
    }

    /// Dispatches a tool call by name.
    #[must_use]
    pub fn call_tool(&self, name: &str, arguments: &Value) -> ToolCallResult {
        match name {
            "generate_silkscreen" => self.call_generate_silkscreen(arguments),
            "expand_outline" => self.call_expand_outline(arguments),
            "check_outline" => self.call_check_outline(arguments),
            _ => ToolCallResult::error(format!("Unknown tool: {name}")),
        }
    }

    // ==================== Tool Handlers ====================

    fn call_generate_silkscreen(&self, arguments: &Value) -> ToolCallResult {
        let footprint = match self.resolve_footprint(arguments) {
            Ok(fp) => fp,
            Err(result) => return result,
        };
        let options = match self.resolve_options(arguments) {
            Ok(options) => options,
            Err(result) => return result,
        };

        match generate_silkscreen(&footprint, &options) {
            Ok(artwork) => {
                let polylines: Vec<Value> = artwork
                    .polylines
                    .iter()
                    .map(|p| json!({ "points": p.points, "closed": p.is_closed() }))
                    .collect();
                ToolCallResult::json(
                    &json!({
                        "status": "success",
                        "name": artwork.name,
                        "ring": artwork.ring,
                        "polylines": polylines,
                        "line_width": artwork.line_width,
                        "stroke_length": artwork.stroke_length(),
                        "report": report_json(artwork.report),
                    }),
                    false,
                )
            }
            Err(e) => silkscreen_error(&e),
        }
    }

    fn call_expand_outline(&self, arguments: &Value) -> ToolCallResult {
        let footprint = match self.resolve_footprint(arguments) {
            Ok(fp) => fp,
            Err(result) => return result,
        };
        let options = match self.resolve_options(arguments) {
            Ok(options) => options,
            Err(result) => return result,
        };

        match expand_outline(&footprint, &options) {
            Ok((ring, report)) => ToolCallResult::json(
                &json!({
                    "status": "success",
                    "name": footprint.name,
                    "area": ring.signed_area(),
                    "ring": ring,
                    "report": report_json(report),
                }),
                false,
            ),
            Err(e) => silkscreen_error(&e),
        }
    }

    fn call_check_outline(&self, arguments: &Value) -> ToolCallResult {
        let footprint = match self.resolve_footprint(arguments) {
            Ok(fp) => fp,
            Err(result) => return result,
        };

        let points = &footprint.outline;
        let area = polygon::signed_area(points);
        let orientation = if !area.is_finite() || area.abs() <= crate::geometry::TOLERANCE {
            "degenerate"
        } else if polygon::is_ccw(points) {
            "counter_clockwise"
        } else {
            "clockwise"
        };
        let problem = footprint
            .ring()
            .and_then(|_| validate_pads(&footprint.pads))
            .err()
            .map(|e| e.to_string());

        ToolCallResult::json(
            &json!({
                "status": "success",
                "name": footprint.name,
                "point_count": points.len(),
                "pad_count": footprint.pads.len(),
                "signed_area": area,
                "orientation": orientation,
                "is_simple": polygon::is_simple(points),
                "is_valid": polygon::is_valid(points),
                "usable": problem.is_none(),
                "problem": problem,
            }),
            false,
        )
    }

    // ==================== Argument Helpers ====================

    fn resolve_footprint(&self, arguments: &Value) -> Result<Footprint, ToolCallResult> {
        if let Some(inline) = arguments.get("footprint") {
            return serde_json::from_value(inline.clone())
                .map_err(|e| ToolCallResult::error(format!("Invalid footprint: {e}")));
        }

        let Some(filepath) = arguments.get("filepath").and_then(Value::as_str) else {
            return Err(ToolCallResult::error(
                "Missing required parameter: footprint or filepath",
            ));
        };
        self.validate_path(filepath).map_err(ToolCallResult::error)?;
        Footprint::read(filepath).map_err(|e| silkscreen_error(&e))
    }

    fn resolve_options(&self, arguments: &Value) -> Result<SilkscreenOptions, ToolCallResult> {
        let mut options = self.options;
        if let Some(value) = arguments.get("max_iterations") {
            let Some(cap) = value.as_u64().filter(|&n| n >= 1) else {
                return Err(ToolCallResult::error(
                    "max_iterations must be a positive integer",
                ));
            };
            options.max_iterations = usize::try_from(cap).unwrap_or(usize::MAX);
        }
        Ok(options)
    }

    /// Checks that an existing file lies within one of the allowed paths.
    ///
    /// With no allowed paths configured the current directory is used.
    fn validate_path(&self, filepath: &str) -> Result<(), String> {
        let path = Path::new(filepath);
        let canonical = path
            .canonicalize()
            .map_err(|e| format!("Failed to resolve path '{}': {e}", path.display()))?;

        let current = [PathBuf::from(".")];
        let roots = if self.allowed_paths.is_empty() {
            &current[..]
        } else {
            &self.allowed_paths[..]
        };

        let allowed = roots
            .iter()
            .filter_map(|root| root.canonicalize().ok())
            .any(|root| canonical.starts_with(root));

        if allowed {
            Ok(())
        } else {
            // Don't echo the configured directories back to the client.
            Err("Access denied: path is outside the configured allowed directories".to_string())
        }
    }
}

fn report_json(report: ExpansionReport) -> Value {
    json!({
        "expansions": report.expansions,
        "repairs": report.repairs,
        "steps": report.steps(),
    })
}

fn silkscreen_error(error: &SilkscreenError) -> ToolCallResult {
    tracing::warn!(kind = error.kind(), error = %error, "Silkscreen tool failed");
    ToolCallResult::json(
        &json!({
            "status": "error",
            "kind": error.kind(),
            "recoverable": error.is_recoverable(),
            "error": error.to_string(),
        }),
        true,
    )
}

fn footprint_schema() -> Value {
    let direction = json!({ "enum": ["east", "west", "north", "south"] });
    json!({
        "type": "object",
        "description": "Component footprint: body outline, optional per-edge locks and pads",
        "properties": {
            "name": { "type": "string" },
            "outline": {
                "type": "array",
                "description": "Body outline vertices as [x, y] pairs, either winding",
                "items": {
                    "type": "array",
                    "items": { "type": "number" },
                    "minItems": 2,
                    "maxItems": 2
                },
                "minItems": 3
            },
            "locks": {
                "type": "array",
                "description": "One entry per outline edge (edge i runs from point i to point i+1). \
                                A direction restricts which pads may push the edge; null leaves it free.",
                "items": { "enum": ["east", "west", "north", "south", null] }
            },
            "pads": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "min_x": { "type": "number" },
                        "min_y": { "type": "number" },
                        "max_x": { "type": "number" },
                        "max_y": { "type": "number" },
                        "direction": direction
                    },
                    "required": ["min_x", "min_y", "max_x", "max_y", "direction"]
                }
            }
        },
        "required": ["outline"]
    })
}

fn input_schema(with_cap: bool) -> Value {
    let mut properties = json!({
        "footprint": footprint_schema(),
        "filepath": {
            "type": "string",
            "description": "Path to a footprint JSON document (alternative to footprint)"
        }
    });
    if with_cap {
        properties["max_iterations"] = json!({
            "type": "integer",
            "minimum": 1,
            "description": "Optional: cap on expansion and repair steps (default from config)"
        });
    }
    json!({ "type": "object", "properties": properties })
}

/// Returns the list of available tools.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "generate_silkscreen",
            description: "Generate silkscreen artwork for a footprint. The body outline is pushed \
                          outward until no edge passes through a pad, then cut wherever it still \
                          touches one. Returns the expanded outline, the silkscreen polylines, \
                          the line width and how many expansion and repair steps were taken. \
                          All coordinates are in millimetres.",
            input_schema: input_schema(true),
        },
        ToolDefinition {
            name: "expand_outline",
            description: "Expand a footprint's body outline until it clears every pad, without \
                          cutting it into silkscreen strokes. Returns the expanded outline with \
                          its edge locks and the step report.",
            input_schema: input_schema(true),
        },
        ToolDefinition {
            name: "check_outline",
            description: "Check a footprint without generating anything: point count, signed \
                          area, winding, whether the outline is a simple polygon and whether the \
                          outline, locks and pads are usable for generation.",
            input_schema: input_schema(false),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(allowed: Vec<PathBuf>) -> McpServer<&'static [u8], Vec<u8>> {
        McpServer::with_transport(
            Transport::new(&b""[..], Vec::new()),
            allowed,
            SilkscreenOptions::default(),
        )
    }

    fn body(result: &ToolCallResult) -> Value {
        serde_json::from_str(result.first_text().unwrap()).unwrap()
    }

    fn square_with_corner_pad() -> Value {
        json!({
            "footprint": {
                "outline": [[0, 0], [4, 0], [4, 4], [0, 4]],
                "pads": [{ "min_x": 3, "min_y": -1, "max_x": 5, "max_y": 1, "direction": "south" }]
            }
        })
    }

    #[test]
    fn server_initial_state() {
        let server = server(vec![]);
        assert_eq!(server.state(), ServerState::AwaitingInit);
        assert!(server.protocol_version().is_none());
    }

    #[test]
    fn tool_definitions_valid() {
        let tools = tool_definitions();
        assert_eq!(tools.len(), 3);
        for tool in &tools {
            assert!(!tool.name.is_empty());
            assert!(tool.input_schema.is_object());
        }
    }

    #[test]
    fn tool_call_result_error() {
        let result = ToolCallResult::error("Something went wrong");
        assert!(result.is_error);
        assert_eq!(result.first_text(), Some("Something went wrong"));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isError"], json!(true));
    }

    #[test]
    fn successful_result_omits_is_error() {
        let value = serde_json::to_value(ToolCallResult::text("ok")).unwrap();
        assert!(value.get("isError").is_none());
        assert_eq!(value["content"][0]["type"], "text");
    }

    #[test]
    fn generate_inline_footprint() {
        let result = server(vec![]).call_tool("generate_silkscreen", &square_with_corner_pad());
        assert!(!result.is_error);

        let body = body(&result);
        assert_eq!(body["status"], "success");
        assert_eq!(body["ring"]["points"].as_array().unwrap().len(), 6);
        assert_eq!(body["polylines"].as_array().unwrap().len(), 1);
        assert_eq!(body["report"]["expansions"], 1);
        assert_eq!(body["report"]["steps"], 1);
        assert!((body["stroke_length"].as_f64().unwrap() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn expand_inline_footprint() {
        let result = server(vec![]).call_tool("expand_outline", &square_with_corner_pad());
        let body = body(&result);
        assert_eq!(body["status"], "success");
        assert!((body["area"].as_f64().unwrap() - 20.0).abs() < 1e-9);
        assert!(body.get("polylines").is_none());
    }

    #[test]
    fn check_reports_clockwise_outline() {
        let args = json!({ "footprint": { "outline": [[0, 0], [0, 4], [4, 4], [4, 0]] } });
        let body = body(&server(vec![]).call_tool("check_outline", &args));
        assert_eq!(body["orientation"], "clockwise");
        assert_eq!(body["is_valid"], true);
        assert_eq!(body["usable"], true);
    }

    #[test]
    fn check_reports_unusable_outline() {
        let args = json!({ "footprint": { "outline": [[0, 0], [4, 4], [4, 0], [0, 4]] } });
        let body = body(&server(vec![]).call_tool("check_outline", &args));
        assert_eq!(body["is_simple"], false);
        assert_eq!(body["usable"], false);
        assert!(body["problem"].as_str().unwrap().contains("self-intersecting"));
    }

    #[test]
    fn malformed_input_is_a_tool_error() {
        let args = json!({ "footprint": { "outline": [[0, 0], [1, 0]] } });
        let result = server(vec![]).call_tool("generate_silkscreen", &args);
        assert!(result.is_error);
        let body = body(&result);
        assert_eq!(body["kind"], "malformed_input");
        assert_eq!(body["recoverable"], false);
    }

    #[test]
    fn non_convergence_is_a_recoverable_tool_error() {
        let mut args = json!({
            "footprint": {
                "outline": [[0, 0], [4, 0], [4, 4], [0, 4]],
                "pads": [
                    { "min_x": 3, "min_y": -1, "max_x": 5, "max_y": 1, "direction": "south" },
                    { "min_x": -1, "min_y": 3, "max_x": 1, "max_y": 5, "direction": "north" }
                ]
            }
        });
        args["max_iterations"] = json!(1);
        let result = server(vec![]).call_tool("generate_silkscreen", &args);
        let body = body(&result);
        assert_eq!(body["kind"], "non_convergence");
        assert_eq!(body["recoverable"], true);
    }

    #[test]
    fn zero_iteration_override_is_rejected() {
        let mut args = square_with_corner_pad();
        args["max_iterations"] = json!(0);
        let result = server(vec![]).call_tool("generate_silkscreen", &args);
        assert!(result.is_error);
        assert!(result.first_text().unwrap().contains("positive integer"));
    }

    #[test]
    fn missing_input_is_reported() {
        let result = server(vec![]).call_tool("generate_silkscreen", &json!({}));
        assert!(result.is_error);
        assert!(result.first_text().unwrap().contains("footprint or filepath"));
    }

    #[test]
    fn unknown_tool_is_reported() {
        let result = server(vec![]).call_tool("render_footprint", &json!({}));
        assert!(result.is_error);
        assert!(result.first_text().unwrap().contains("Unknown tool"));
    }

    #[test]
    fn reads_footprint_file_inside_allowed_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.json");
        std::fs::write(
            &path,
            serde_json::to_string(&square_with_corner_pad()["footprint"]).unwrap(),
        )
        .unwrap();

        let server = server(vec![dir.path().to_path_buf()]);
        let args = json!({ "filepath": path.to_string_lossy() });
        let result = server.call_tool("generate_silkscreen", &args);
        assert!(!result.is_error, "{:?}", result.first_text());
    }

    #[test]
    fn rejects_footprint_file_outside_allowed_path() {
        let allowed = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let path = other.path().join("square.json");
        std::fs::write(&path, "{}").unwrap();

        let server = server(vec![allowed.path().to_path_buf()]);
        let args = json!({ "filepath": path.to_string_lossy() });
        let result = server.call_tool("check_outline", &args);
        assert!(result.is_error);
        assert!(result.first_text().unwrap().contains("Access denied"));
    }
}
