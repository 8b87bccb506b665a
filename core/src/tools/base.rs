//! Base tool trait and argument helpers

use crate::error::{Result, ToolError};
use crate::llm::{FunctionDefinition, ToolDefinition};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Trait for all tools
///
/// A tool is a named, schema-described callable exposed to the model for
/// structured invocation. The schema is static: defined at process start,
/// immutable, and shared read-only between catalog advertisement and
/// dispatch.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the name of the tool
    fn name(&self) -> &str;

    /// Get the description of the tool
    fn description(&self) -> &str;

    /// Get the JSON schema for the tool's arguments
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments
    ///
    /// Returns the tool's raw structured payload. Argument validation
    /// failures propagate as typed errors; a tool never returns a partial
    /// result.
    async fn execute(&self, arguments: &Value) -> Result<Value>;

    /// Build the catalog entry advertised to the model
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: self.name().to_string(),
                description: self.description().to_string(),
                parameters: self.parameters_schema(),
            },
        }
    }
}

/// Extract a required, typed argument from a tool-call argument mapping.
///
/// `expected` describes the accepted values and is echoed back in the
/// failure, so the caller can correct the input.
pub fn require_argument<T>(arguments: &Value, field: &str, expected: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let value = arguments
        .get(field)
        .ok_or_else(|| ToolError::InvalidArgument {
            field: field.to_string(),
            expected: expected.to_string(),
        })?;

    serde_json::from_value(value.clone()).map_err(|_| {
        ToolError::InvalidArgument {
            field: field.to_string(),
            expected: expected.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn require_argument_extracts_typed_values() {
        let args = json!({"weight": 70.5, "age": 30});
        let weight: f64 = require_argument(&args, "weight", "a number").unwrap();
        let age: u32 = require_argument(&args, "age", "an integer").unwrap();
        assert_eq!(weight, 70.5);
        assert_eq!(age, 30);
    }

    #[test]
    fn require_argument_names_the_missing_field() {
        let args = json!({});
        let err = require_argument::<f64>(&args, "weight", "a number in kg").unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("weight"));
        assert!(err.to_string().contains("a number in kg"));
    }

    #[test]
    fn require_argument_rejects_wrong_types() {
        let args = json!({"age": "thirty"});
        assert!(require_argument::<u32>(&args, "age", "an integer").is_err());
    }
}
