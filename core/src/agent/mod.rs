//! Agent orchestration engine

pub mod engine;
pub mod prompt;
pub mod turn;

pub use engine::{AgentBuilder, AgentConfig, AgentCore};
pub use prompt::{build_system_prompt, DEFAULT_ANSWER_LANGUAGE};
pub use turn::TurnOutcome;
