//! Built-in nutrition tools

pub mod calories;
pub mod menu;

pub use calories::{BmiCategory, CalorieReport, CaloriesCalculator};
pub use menu::MenuRecommendation;
