/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Routes tool calls to the progress engine
/// 3. Sends JSON-RPC responses to stdout

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolContext, ToolError};
use crate::{ProgressServer, ServerError};

/// MCP server that exposes the progress engine as tools
pub struct McpServer {
    /// The underlying progress server
    progress: ProgressServer,
    /// Whether the client has finished initialization
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(progress: ProgressServer) -> Self {
        Self {
            progress,
            initialized: false,
        }
    }

    pub fn progress(&self) -> &ProgressServer {
        &self.progress
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request).await
    }

    /// Handle a JSON-RPC request
    async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            self.handle_notification(&request.method);
            return None;
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                id,
                error_codes::INVALID_REQUEST,
                format!("Unsupported JSON-RPC version '{}'", request.jsonrpc),
                None,
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(id, json!(null))
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        };

        Some(response)
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                info!("MCP client initialized");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Habit Progress MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        respond(id, &result)
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        respond(id, &json!({ "tools": tool_definitions() }))
    }

    /// Handle tools/call request
    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let name = tool_params.name;
        let args = tool_params.arguments;
        debug!("Calling tool '{}'", name);

        match name.as_str() {
            "snapshot_load" => self.call_snapshot_load(id, args),
            "date_range" => self.call_tool(id, &name, args, tools::date_range),
            "shift_period" => self.call_tool(id, &name, args, tools::shift_period),
            "completion_stats" => self.call_tool(id, &name, args, tools::completion_stats),
            "habit_streaks" => self.call_tool(id, &name, args, tools::habit_streaks),
            "progress_report" => self.call_tool(id, &name, args, tools::progress_report),
            _ => respond(id, &ToolCallResult::error(format!("Unknown tool: {}", name))),
        }
    }

    /// Decode arguments, run a read-only tool and wrap its response
    fn call_tool<P, R, F>(&self, id: Value, name: &str, args: HashMap<String, Value>, tool: F) -> JsonRpcResponse
    where
        P: DeserializeOwned,
        R: Serialize,
        F: FnOnce(&ToolContext<'_>, P) -> Result<R, ToolError>,
    {
        let params: P = match decode_arguments(args) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid arguments for {}: {}", name, e),
                    None,
                );
            }
        };

        let ctx = self.progress.context();
        match tool(&ctx, params) {
            Ok(response) => tool_success(id, &response),
            Err(e) => tool_failure(id, name, &e),
        }
    }

    /// Replace the snapshot and rebuild the completion index
    fn call_snapshot_load(&mut self, id: Value, args: HashMap<String, Value>) -> JsonRpcResponse {
        let params: tools::SnapshotParams = match decode_arguments(args) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid arguments for snapshot_load: {}", e),
                    None,
                );
            }
        };

        match tools::load_snapshot(params) {
            Ok((snapshot, response)) => {
                self.progress.replace_snapshot(snapshot);
                tool_success(id, &response)
            }
            Err(e) => tool_failure(id, "snapshot_load", &e),
        }
    }
}

fn decode_arguments<P: DeserializeOwned>(args: HashMap<String, Value>) -> Result<P, serde_json::Error> {
    serde_json::from_value(Value::Object(args.into_iter().collect()))
}

/// Serialize a result into a success response
fn respond<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => {
            error!("Failed to serialize result: {}", e);
            JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string(), None)
        }
    }
}

fn tool_success<R: Serialize>(id: Value, response: &R) -> JsonRpcResponse {
    match serde_json::to_string_pretty(response) {
        Ok(text) => respond(id, &ToolCallResult::success(text)),
        Err(e) => {
            error!("Failed to serialize tool response: {}", e);
            JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string(), None)
        }
    }
}

fn tool_failure(id: Value, tool: &str, e: &ToolError) -> JsonRpcResponse {
    warn!("Tool '{}' failed: {}", tool, e);
    JsonRpcResponse::error(
        id,
        tool_error_to_json_rpc_code(e),
        e.to_string(),
        Some(json!({ "tool": tool })),
    )
}

fn input_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| json!({ "type": "object" }))
}

/// Tools this server advertises
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "snapshot_load".to_string(),
            description: "Replace the habits and completion records the other tools read, inline or from a JSON export".to_string(),
            input_schema: input_schema::<tools::SnapshotParams>(),
        },
        ToolDefinition {
            name: "date_range".to_string(),
            description: "List the days of a week, month, year, trailing all-time window or custom range".to_string(),
            input_schema: input_schema::<tools::DateRangeParams>(),
        },
        ToolDefinition {
            name: "shift_period".to_string(),
            description: "Move a view to the previous or next period".to_string(),
            input_schema: input_schema::<tools::ShiftParams>(),
        },
        ToolDefinition {
            name: "completion_stats".to_string(),
            description: "Completion rate for a view, the prior period's rate and the change between them".to_string(),
            input_schema: input_schema::<tools::StatsParams>(),
        },
        ToolDefinition {
            name: "habit_streaks".to_string(),
            description: "Current and best streaks per habit".to_string(),
            input_schema: input_schema::<tools::StreakParams>(),
        },
        ToolDefinition {
            name: "progress_report".to_string(),
            description: "Full progress report for a view with per-habit rates, streaks and insights".to_string(),
            input_schema: input_schema::<tools::ReportParams>(),
        },
    ]
}
