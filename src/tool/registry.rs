use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::tool::{DynTool, Tool, ToolDefinition};

/// A registry of tools, kept in registration order.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<DynTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Creates a new empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool. A tool with the same name is replaced in place.
    pub fn register(&mut self, tool: DynTool) {
        let name = tool.name().to_string();
        match self.index.get(&name) {
            Some(&slot) => self.tools[slot] = tool,
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Registers every tool from an iterator, in order.
    pub fn register_all<T>(&mut self, tools: impl IntoIterator<Item = T>)
    where
        T: Tool + 'static,
    {
        for tool in tools {
            self.register(Arc::new(tool));
        }
    }

    /// Gets a tool by name.
    pub fn get(&self, name: &str) -> Option<&DynTool> {
        self.index.get(name).map(|&slot| &self.tools[slot])
    }

    /// Returns all registered tools in registration order.
    pub fn list(&self) -> &[DynTool] {
        &self.tools
    }

    /// Returns the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Converts all tools to their definitions.
    pub fn to_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|tool| tool.to_definition()).collect()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools_count", &self.tools.len())
            .finish()
    }
}

impl<T: Tool + 'static> FromIterator<T> for ToolRegistry {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut registry = ToolRegistry::new();
        registry.register_all(iter);
        registry
    }
}

impl<'a> IntoIterator for &'a ToolRegistry {
    type Item = &'a DynTool;
    type IntoIter = std::slice::Iter<'a, DynTool>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{ToolError, ToolResult};
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct Echo {
        name: &'static str,
        description: &'static str,
    }

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.description
        }

        fn parameters_schema(&self) -> Value {
            json!({"type": "object", "properties": {}})
        }

        async fn execute(&self, args: Value) -> Result<ToolResult, ToolError> {
            Ok(ToolResult::ok(args))
        }
    }

    fn echo(name: &'static str, description: &'static str) -> Echo {
        Echo { name, description }
    }

    #[test]
    fn test_registration_order() {
        let registry: ToolRegistry =
            vec![echo("GetProducts", ""), echo("GetCarts", ""), echo("PostCarts", "")]
                .into_iter()
                .collect();

        let names: Vec<&str> = registry.list().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["GetProducts", "GetCarts", "PostCarts"]);
        assert_eq!(registry.len(), 3);
        assert!(registry.get("GetCarts").is_some());
        assert!(registry.get("DeleteCarts").is_none());
    }

    #[test]
    fn test_duplicate_replaces_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register_all(vec![echo("A", "first"), echo("B", "")]);
        registry.register(Arc::new(echo("A", "second")));

        let definitions = registry.to_tool_definitions();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].name, "A");
        assert_eq!(definitions[0].description, "second");
        assert_eq!(definitions[1].name, "B");
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.to_tool_definitions().is_empty());
    }
}
