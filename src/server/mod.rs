//! MCP server over stdio
//!
//! Reads newline-delimited JSON-RPC 2.0 messages, answers each request on its
//! own line, and never replies to notifications. Requests are processed one at
//! a time, to completion, in arrival order.
//!
//! | Method                      | Handler                             |
//! |-----------------------------|-------------------------------------|
//! | `initialize`                | protocol version and capabilities   |
//! | `ping`                      | empty result                        |
//! | `tools/list`                | [`Dispatcher::list_operations`]     |
//! | `tools/call`                | [`Dispatcher::call_operation`]      |
//! | `resources/list`            | [`Dispatcher::list_resources`]      |
//! | `resources/read`            | [`Dispatcher::read_resource`]       |

mod protocol;

pub use protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR, INVALID_PARAMS,
    INVALID_REQUEST, MCP_PROTOCOL_VERSION, METHOD_NOT_FOUND, PARSE_ERROR, SERVER_NAME,
};

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::types::JsonValue;
use serde::Deserialize;
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

#[derive(Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Option<JsonValue>,
}

#[derive(Deserialize)]
struct ReadParams {
    uri: String,
}

/// Protocol front end for a [`Dispatcher`]
#[derive(Debug, Clone)]
pub struct McpServer {
    dispatcher: Dispatcher,
}

impl McpServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Serve on the process's stdin and stdout until stdin closes
    pub async fn serve_stdio(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve newline-delimited messages from `reader` until EOF
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("MCP server ready (protocol {})", MCP_PROTOCOL_VERSION);
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let mut frame = serde_json::to_vec(&response)?;
                frame.push(b'\n');
                writer.write_all(&frame).await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle one raw frame
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: JsonValue = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Unparseable frame: {}", e);
                return Some(JsonRpcResponse::error(
                    JsonValue::Null,
                    JsonRpcError::parse_error(format!("Parse error: {e}")),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(JsonValue::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!("Invalid request: {e}")),
            )),
        }
    }

    /// Handle one decoded message; `None` for notifications
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            debug!("Notification {}", request.method);
            return None;
        };

        debug!("Request {} ({})", request.method, id);
        let response = match self.route(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        };
        Some(response)
    }

    async fn route(
        &self,
        method: &str,
        params: JsonValue,
    ) -> std::result::Result<JsonValue, JsonRpcError> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": { "tools": {}, "resources": {} },
                "serverInfo": { "name": SERVER_NAME, "version": crate::VERSION },
            })),
            "ping" => Ok(json!({})),
            "tools/list" => {
                let tools: Vec<JsonValue> = self
                    .dispatcher
                    .list_operations()
                    .iter()
                    .map(|op| op.tool_definition())
                    .collect();
                Ok(json!({ "tools": tools }))
            }
            "tools/call" => {
                let params: CallParams = parse_params(params)?;
                let result = self
                    .dispatcher
                    .call_operation(&params.name, params.arguments.as_ref())
                    .await;
                to_result(&result)
            }
            "resources/list" => {
                let resources = self
                    .dispatcher
                    .list_resources()
                    .await
                    .map_err(|e| JsonRpcError::from(&e))?;
                Ok(json!({ "resources": to_result(&resources)? }))
            }
            "resources/read" => {
                let params: ReadParams = parse_params(params)?;
                let contents = self
                    .dispatcher
                    .read_resource(&params.uri)
                    .await
                    .map_err(|e| {
                        warn!("Reading {} failed: {}", params.uri, e);
                        JsonRpcError::from(&e)
                    })?;
                Ok(json!({ "contents": [to_result(&contents)?] }))
            }
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(
    params: JsonValue,
) -> std::result::Result<T, JsonRpcError> {
    serde_json::from_value(params).map_err(|e| JsonRpcError::invalid_params(e.to_string()))
}

fn to_result<T: serde::Serialize>(value: &T) -> std::result::Result<JsonValue, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal(e.to_string()))
}
