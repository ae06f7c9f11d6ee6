use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::tool::{ToolDefinition, ToolError, ToolRegistry, ToolResult};

/// A request to invoke a tool by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// The tool name
    pub name: String,
    /// The tool input
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Dispatches tool calls against a registry.
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
}

impl ToolExecutor {
    /// Creates a new tool executor with the given registry.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Returns all tool definitions in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry.to_tool_definitions()
    }

    /// Validates and executes a single tool call.
    pub async fn call(&self, name: &str, arguments: Value) -> Result<ToolResult, ToolError> {
        let tool = self
            .registry
            .get(name)
            .cloned()
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        if let Err(err) = tool.validate(&arguments) {
            warn!(tool = name, error = %err, "Rejected tool input");
            return Err(err);
        }

        debug!(tool = name, "Executing tool");
        tool.execute(arguments).await
    }

    /// Executes several tool calls concurrently. Results keep the call order.
    pub async fn call_all(&self, calls: Vec<ToolCall>) -> Vec<Result<ToolResult, ToolError>> {
        let pending = calls
            .into_iter()
            .map(|call| async move { self.call(&call.name, call.arguments).await });

        join_all(pending).await
    }
}
