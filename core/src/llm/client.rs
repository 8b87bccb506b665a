//! Model gateway trait and response structures

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::message::ChatMessage;

/// Trait for model gateway clients
///
/// The model is an opaque capability: given a system instruction, a tool
/// catalog, and the conversation input, it returns either free text or a
/// list of structured tool-call requests. Implementations must be
/// deterministic enough for testing via a scripted stub.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one turn of conversation along with the tool catalog and
    /// classify the reply.
    async fn invoke(
        &self,
        system_prompt: &str,
        tools: &[ToolDefinition],
        messages: &[ChatMessage],
    ) -> Result<ModelResponse>;

    /// Get the model name
    fn model_name(&self) -> &str;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}

/// Classified response from the model gateway
///
/// A tagged variant rather than a record with optional fields: a response is
/// either a final text answer or a non-text request to invoke tools, never
/// both and never neither. A reply that carries prose alongside tool-call
/// requests classifies as `ToolCalls`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelResponse {
    /// Free-text answer, terminal for the turn
    Text {
        /// The answer content
        content: String,
    },

    /// Structured tool-call requests, in model order
    ToolCalls {
        /// The parsed requests
        calls: Vec<ToolCallRequest>,
    },
}

/// A single tool-call request parsed from a model reply
///
/// Produced only by a gateway implementation's classification of its own
/// output; never authored elsewhere. The name must reference a registered
/// tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Provider-assigned identifier for this call
    pub id: String,

    /// Name of the tool to call
    pub name: String,

    /// Arguments to pass to the tool
    pub arguments: serde_json::Value,
}

/// Tool definition advertised to the model for function calling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Type of tool (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,

    /// Function definition
    pub function: FunctionDefinition,
}

/// Function definition for tool calling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Name of the function
    pub name: String,

    /// Description of what the function does
    pub description: String,

    /// JSON schema for the function parameters
    pub parameters: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn model_response_is_kind_tagged() {
        let text = ModelResponse::Text {
            content: "hi".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&text).unwrap(),
            json!({"kind": "text", "content": "hi"})
        );

        let calls = ModelResponse::ToolCalls {
            calls: vec![ToolCallRequest {
                id: "call_1".to_string(),
                name: "calories-calculator".to_string(),
                arguments: json!({"weight": 70.0}),
            }],
        };
        let value = serde_json::to_value(&calls).unwrap();
        assert_eq!(value["kind"], "tool_calls");
        assert_eq!(value["calls"][0]["name"], "calories-calculator");
    }
}
