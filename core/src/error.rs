//! Error types and handling for the mAIMeals agent core

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the agent core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Model gateway errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Tool dispatch and argument errors
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// Agent state machine errors
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    /// Vector search errors
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-specific errors
///
/// Fatal at startup or first use; never retried.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

/// Model gateway errors
#[derive(Error, Debug)]
pub enum LlmError {
    /// Transport or API failure when calling the model. Propagated to the
    /// caller as-is; retry policy belongs to the outer layer.
    #[error("Model gateway unavailable: {message}")]
    Upstream { message: String },

    /// The model returned something the engine cannot classify as an
    /// assistant answer or a tool-call request.
    #[error("Invalid model response: {message}")]
    InvalidResponse { message: String },
}

/// Tool dispatch and argument validation errors
#[derive(Error, Debug)]
pub enum ToolError {
    /// Dispatch by name failed closed. No fuzzy matching, no fallback.
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    /// A tool argument failed validation. User-correctable.
    #[error("Invalid argument '{field}': expected {expected}")]
    InvalidArgument { field: String, expected: String },
}

/// Agent state machine errors
#[derive(Error, Debug)]
pub enum AgentError {
    /// The turn reached a state with neither an answer nor tool calls.
    /// Contract violation by the model gateway, never silently tolerated.
    #[error("Invalid agent state: {message}")]
    InvalidState { message: String },
}

/// Vector search errors
#[derive(Error, Debug)]
pub enum SearchError {
    /// Transport, pool, or query failure against the vector index.
    #[error("Vector search unavailable: {message}")]
    Upstream { message: String },
}

impl Error {
    /// Whether this failure was caused by bad caller input.
    ///
    /// The outer transport layer maps these to a 4xx-equivalent outcome;
    /// everything else is an internal or upstream fault.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::Tool(ToolError::InvalidArgument { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_is_caller_error() {
        let err: Error = ToolError::InvalidArgument {
            field: "gender".to_string(),
            expected: "one of: male, female".to_string(),
        }
        .into();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("gender"));
    }

    #[test]
    fn contract_violations_are_internal_faults() {
        let unknown: Error = ToolError::UnknownTool {
            name: "no-such-tool".to_string(),
        }
        .into();
        let state: Error = AgentError::InvalidState {
            message: "empty tool-call list".to_string(),
        }
        .into();
        assert!(!unknown.is_invalid_input());
        assert!(!state.is_invalid_input());
    }
}
