//! Model gateway abstractions and implementations

pub mod client;
pub mod message;
pub mod providers;

pub use client::{FunctionDefinition, LlmClient, ModelResponse, ToolCallRequest, ToolDefinition};
pub use message::{ChatMessage, MessageRole};
pub use providers::OpenAiClient;
