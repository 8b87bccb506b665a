//! Minimal configuration module for the agent core
//!
//! Only exports pure data types. All loading logic is in the CLI layer.

pub mod types;

pub use types::{Protocol, ResolvedLlmConfig, VectorStoreConfig};
