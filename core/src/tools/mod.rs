//! Tool system and built-in tools

pub mod base;
pub mod builtin;
pub mod registry;

pub use base::{require_argument, Tool};
pub use builtin::{CaloriesCalculator, MenuRecommendation};
pub use registry::ToolRegistry;
