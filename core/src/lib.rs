//! # mAIMeals Core
//!
//! Core library for the mAIMeals nutrition agent.
//!
//! One conversation turn flows through a small state machine: the model is
//! invoked with the conversation input and a catalog of tool schemas, its
//! response is classified as either a final answer or a tool-call request,
//! and at most one tool runs before the turn terminates. The two built-in
//! tools are a deterministic calorie calculator and a similarity search
//! over a menu vector index.

// Core modules
pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod search;
pub mod tools;

// Re-export commonly used types
pub use agent::{AgentBuilder, AgentConfig, AgentCore, TurnOutcome};
pub use config::{Protocol, ResolvedLlmConfig, VectorStoreConfig};
pub use error::{Error, Result};
pub use llm::{ChatMessage, LlmClient, MessageRole, ModelResponse, ToolCallRequest};
pub use search::{OpenAiEmbeddings, PgVectorStore, SimilaritySearch};
pub use tools::ToolRegistry;

/// Current version of the maimeals-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
