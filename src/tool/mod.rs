pub mod registry;
pub mod executor;

pub use registry::ToolRegistry;
pub use executor::{ToolCall, ToolExecutor};
pub use tool_types::{ToolDefinition, ToolResult, ToolError};
pub use tool_trait::Tool;
pub use tool_trait::DynTool;

mod tool_types {
    use serde::{Deserialize, Serialize};
    use serde_json::{Map, Value};

    use crate::compiler::SchemaViolation;
    use crate::http::{HttpError, HttpResponse};

    /// Definition of a tool as advertised to a tool-calling client.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ToolDefinition {
        /// The name of the tool
        pub name: String,
        /// A description of what the tool does
        pub description: String,
        /// JSON Schema for the tool's input parameters
        pub input_schema: Value,
    }

    /// The result of executing a tool.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ToolResult {
        /// The output from the tool
        pub output: Value,
        /// Optional metadata from the tool execution
        pub metadata: Option<Map<String, Value>>,
    }

    impl ToolResult {
        /// Creates a result without metadata.
        pub fn ok(output: impl Into<Value>) -> Self {
            Self {
                output: output.into(),
                metadata: None,
            }
        }

        /// Adds a metadata entry.
        pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
            self.metadata
                .get_or_insert_with(Map::new)
                .insert(key.into(), value.into());
            self
        }

        /// The backend HTTP status, when the result came from a backend call.
        pub fn status(&self) -> Option<u16> {
            self.metadata
                .as_ref()?
                .get("status")?
                .as_u64()
                .and_then(|status| u16::try_from(status).ok())
        }
    }

    impl From<HttpResponse> for ToolResult {
        fn from(response: HttpResponse) -> Self {
            ToolResult::ok(response.body).with_metadata("status", response.status)
        }
    }

    /// Errors that can occur when executing a tool.
    #[derive(Debug, thiserror::Error)]
    pub enum ToolError {
        #[error("Invalid arguments: {0}")]
        InvalidArguments(#[from] SchemaViolation),
        #[error("Tool not found: {0}")]
        NotFound(String),
        #[error("Backend request failed: {0}")]
        Backend(#[from] HttpError),
    }
}

mod tool_trait {
    use super::tool_types::{ToolDefinition, ToolResult, ToolError};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Arc;

    /// A named, schema-described operation that can be invoked with JSON input.
    #[async_trait]
    pub trait Tool: Send + Sync {
        /// Returns the name of the tool.
        fn name(&self) -> &str;
        /// Returns a description of what the tool does.
        fn description(&self) -> &str;
        /// Returns the JSON Schema for the tool's input parameters.
        fn parameters_schema(&self) -> Value;

        /// Checks arguments before execution. Accepts everything by default.
        fn validate(&self, _args: &Value) -> Result<(), ToolError> {
            Ok(())
        }

        /// Executes the tool with the given arguments.
        async fn execute(&self, args: Value) -> Result<ToolResult, ToolError>;

        /// Converts the tool to its definition.
        fn to_definition(&self) -> ToolDefinition {
            ToolDefinition {
                name: self.name().to_string(),
                description: self.description().to_string(),
                input_schema: self.parameters_schema(),
            }
        }
    }

    /// A type alias for a dynamic tool reference.
    pub type DynTool = Arc<dyn Tool>;
}
