//! Tool registry for dispatch by name

use crate::error::{Result, ToolError};
use crate::llm::{ToolCallRequest, ToolDefinition};
use crate::search::SimilaritySearch;
use crate::tools::builtin::{CaloriesCalculator, MenuRecommendation};
use crate::tools::Tool;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Static mapping from tool name to implementation
///
/// Dispatch is O(1) by exact name and fails closed: an unregistered name is
/// an error, never a fuzzy match or fallback.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with the built-in nutrition tools
    pub fn with_defaults(search: Arc<dyn SimilaritySearch>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CaloriesCalculator::new()));
        registry.register(Arc::new(MenuRecommendation::new(search)));
        registry
    }

    /// Register a tool under its own name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// List all registered tool names
    pub fn list(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Get the tool catalog advertised to the model
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    /// Execute a tool-call request, failing closed on unknown names
    pub async fn dispatch(&self, call: &ToolCallRequest) -> Result<Value> {
        let tool = self.get(&call.name).ok_or_else(|| {
            tracing::error!(tool = %call.name, "dispatch failed: unknown tool");
            ToolError::UnknownTool {
                name: call.name.clone(),
            }
        })?;

        tool.execute(&call.arguments).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, SearchError};
    use crate::search::{MetadataFilter, ScoredRecord};
    use async_trait::async_trait;
    use serde_json::json;

    struct NoopSearch;

    #[async_trait]
    impl SimilaritySearch for NoopSearch {
        async fn similarity_search(
            &self,
            _query: &str,
            _k: usize,
            _filter: &MetadataFilter,
        ) -> Result<Vec<ScoredRecord>> {
            Err(SearchError::Upstream {
                message: "not wired in this test".to_string(),
            }
            .into())
        }
    }

    #[test]
    fn default_registry_has_both_nutrition_tools() {
        let registry = ToolRegistry::with_defaults(Arc::new(NoopSearch));
        let mut tools = registry.list();
        tools.sort();
        assert_eq!(tools, vec!["calories-calculator", "menu-recommendation"]);

        for definition in registry.definitions() {
            assert_eq!(definition.tool_type, "function");
            assert!(!definition.function.description.is_empty());
            assert!(definition.function.parameters.is_object());
        }
    }

    #[tokio::test]
    async fn dispatch_fails_closed_on_unknown_name() {
        let registry = ToolRegistry::with_defaults(Arc::new(NoopSearch));
        let call = ToolCallRequest {
            id: "call_1".to_string(),
            name: "calorie-calculator".to_string(), // near miss, not registered
            arguments: json!({}),
        };

        let err = registry.dispatch(&call).await.unwrap_err();
        match err {
            Error::Tool(ToolError::UnknownTool { name }) => {
                assert_eq!(name, "calorie-calculator");
            }
            other => panic!("expected UnknownTool, got {other:?}"),
        }
    }
}
