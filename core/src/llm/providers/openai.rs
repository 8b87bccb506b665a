//! OpenAI client implementation using the async-openai library

use crate::config::ResolvedLlmConfig;
use crate::error::{ConfigError, LlmError, Result};
use crate::llm::{
    ChatMessage, LlmClient, MessageRole, ModelResponse, ToolCallRequest, ToolDefinition,
};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, ChatCompletionTool, ChatCompletionToolType,
        CreateChatCompletionRequestArgs, FunctionObject, Role,
    },
    Client,
};
use async_trait::async_trait;
use serde_json::Value;

/// Sampling temperature for every request
const TEMPERATURE: f32 = 0.0;

/// OpenAI-compatible model gateway using the async-openai library
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiClient {
    /// Create a new OpenAI client from resolved LLM config
    pub fn new(config: &ResolvedLlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(ConfigError::MissingField {
                field: "api_key".to_string(),
            }
            .into());
        }

        let mut openai_config = OpenAIConfig::new().with_api_key(&config.api_key);

        // Set custom base URL if provided
        if config.base_url != "https://api.openai.com/v1" {
            openai_config = openai_config.with_api_base(&config.base_url);
        }

        let client = Client::with_config(openai_config);

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    /// Convert our internal message format to async-openai format
    fn convert_messages(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Vec<ChatCompletionRequestMessage> {
        let mut converted = Vec::with_capacity(messages.len() + 1);

        converted.push(ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessage {
                content: system_prompt.to_string().into(),
                name: None,
            },
        ));

        for message in messages {
            match message.role {
                MessageRole::System => {
                    converted.push(ChatCompletionRequestMessage::System(
                        ChatCompletionRequestSystemMessage {
                            content: message.content.clone().into(),
                            name: None,
                        },
                    ));
                }
                MessageRole::User => {
                    converted.push(ChatCompletionRequestMessage::User(
                        ChatCompletionRequestUserMessage {
                            content: message.content.clone().into(),
                            name: None,
                        },
                    ));
                }
                MessageRole::Assistant => {
                    converted.push(ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessage {
                            content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                                message.content.clone(),
                            )),
                            ..Default::default()
                        },
                    ));
                }
            }
        }

        converted
    }

    /// Convert our tool definitions to async-openai format
    fn convert_tools(&self, tools: &[ToolDefinition]) -> Vec<ChatCompletionTool> {
        tools
            .iter()
            .map(|tool| ChatCompletionTool {
                r#type: ChatCompletionToolType::Function,
                function: FunctionObject {
                    name: tool.function.name.clone(),
                    description: Some(tool.function.description.clone()),
                    parameters: Some(tool.function.parameters.clone()),
                    strict: None,
                },
            })
            .collect()
    }

    /// Classify the raw completion into a text answer or tool-call requests
    fn classify_response(
        &self,
        response: async_openai::types::CreateChatCompletionResponse,
    ) -> Result<ModelResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse {
                message: "no choices in completion".to_string(),
            })?;

        if !matches!(choice.message.role, Role::Assistant) {
            return Err(LlmError::InvalidResponse {
                message: format!(
                    "expected an assistant message, got role '{:?}'",
                    choice.message.role
                ),
            }
            .into());
        }

        if let Some(tool_calls) = choice.message.tool_calls {
            if !tool_calls.is_empty() {
                let mut calls = Vec::with_capacity(tool_calls.len());
                for tool_call in tool_calls {
                    let arguments: Value = serde_json::from_str(&tool_call.function.arguments)
                        .map_err(|e| LlmError::InvalidResponse {
                            message: format!(
                                "malformed arguments for tool '{}': {}",
                                tool_call.function.name, e
                            ),
                        })?;
                    calls.push(ToolCallRequest {
                        id: tool_call.id,
                        name: tool_call.function.name,
                        arguments,
                    });
                }
                return Ok(ModelResponse::ToolCalls { calls });
            }
        }

        match choice.message.content {
            Some(content) => Ok(ModelResponse::Text { content }),
            None => Err(LlmError::InvalidResponse {
                message: "assistant message carried neither text nor tool calls".to_string(),
            }
            .into()),
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn invoke(
        &self,
        system_prompt: &str,
        tools: &[ToolDefinition],
        messages: &[ChatMessage],
    ) -> Result<ModelResponse> {
        let converted_messages = self.convert_messages(system_prompt, messages);
        let converted_tools = self.convert_tools(tools);

        tracing::debug!(
            model = %self.model,
            tools = converted_tools.len(),
            "sending chat completion request"
        );

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model);
        request_builder.messages(converted_messages);
        request_builder.temperature(TEMPERATURE);

        if !converted_tools.is_empty() {
            request_builder.tools(converted_tools);
        }

        let request = request_builder.build().map_err(|e| {
            tracing::error!("Failed to build OpenAI request: {}", e);
            LlmError::InvalidResponse {
                message: format!("failed to build request: {}", e),
            }
        })?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!("OpenAI API call failed: {}", e);
            LlmError::Upstream {
                message: e.to_string(),
            }
        })?;

        let classified = self.classify_response(response)?;
        if let ModelResponse::ToolCalls { calls } = &classified {
            tracing::debug!("completion contains {} tool calls", calls.len());
            for call in calls {
                tracing::debug!("tool call: {} (id: {})", call.name, call.id);
            }
        }

        Ok(classified)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}
