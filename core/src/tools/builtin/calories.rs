//! Calorie and BMI calculator tool
//!
//! Deterministic nutrition math: BMI with its standard categories, BMR via
//! the Mifflin-St Jeor equation, and daily calorie requirements from an
//! activity multiplier and a body-weight target. Gender, activity, and
//! target arrive as free text from the model and are matched against fixed
//! English/Indonesian synonym tables, so the accepted vocabulary is a
//! closed, testable artifact.

use crate::error::{Result, ToolError};
use crate::tools::base::{require_argument, Tool};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const MALE_SYNONYMS: &[&str] = &["male", "laki laki", "laki-laki", "pria"];
const FEMALE_SYNONYMS: &[&str] = &["female", "wanita", "perempuan"];

/// Activity synonym groups with their TDEE multipliers
const ACTIVITY_LEVELS: &[(&[&str], f64)] = &[
    (
        &["sedentary", "tidak aktif", "tidak banyak bergerak"],
        1.2,
    ),
    (&["lightly active", "sedikit aktif"], 1.375),
    (&["moderately active", "cukup aktif", "aktif"], 1.55),
    (&["very active", "very_active", "sangat aktif"], 1.725),
    (&["extremely active", "sangat aktif sekali"], 1.9),
];

const MAINTAIN_SYNONYMS: &[&str] = &["maintain", "mempertahankan"];
const GAIN_SYNONYMS: &[&str] = &["gain", "meningkatkan", "menaikkan"];
const LOSS_SYNONYMS: &[&str] = &["loss", "menurunkan"];

/// Calorie surplus/deficit applied for the gain/loss targets
const TARGET_ADJUSTMENT: f64 = 500.0;

/// Biological sex as matched from the gender synonym tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gender {
    Male,
    Female,
}

impl Gender {
    fn parse(input: &str) -> Option<Self> {
        let normalized = input.to_lowercase();
        if MALE_SYNONYMS.contains(&normalized.as_str()) {
            Some(Gender::Male)
        } else if FEMALE_SYNONYMS.contains(&normalized.as_str()) {
            Some(Gender::Female)
        } else {
            None
        }
    }

    /// Sign term of the Mifflin-St Jeor equation
    fn bmr_offset(self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
        }
    }
}

/// Body-weight target as matched from the target synonym tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Maintain,
    Gain,
    Loss,
}

impl Target {
    fn parse(input: &str) -> Option<Self> {
        let normalized = input.to_lowercase();
        if MAINTAIN_SYNONYMS.contains(&normalized.as_str()) {
            Some(Target::Maintain)
        } else if GAIN_SYNONYMS.contains(&normalized.as_str()) {
            Some(Target::Gain)
        } else if LOSS_SYNONYMS.contains(&normalized.as_str()) {
            Some(Target::Loss)
        } else {
            None
        }
    }
}

fn activity_multiplier(input: &str) -> Option<f64> {
    let normalized = input.to_lowercase();
    ACTIVITY_LEVELS
        .iter()
        .find(|(synonyms, _)| synonyms.contains(&normalized.as_str()))
        .map(|(_, multiplier)| *multiplier)
}

fn vocabulary(groups: &[&[&str]]) -> String {
    let all: Vec<&str> = groups.iter().flat_map(|g| g.iter().copied()).collect();
    format!("one of: {}", all.join(", "))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// BMI classification by the standard thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Categorize a BMI value: <18.5 underweight, [18.5, 25) normal,
    /// [25, 30) overweight, >=30 obese
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::NormalWeight
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

/// Result of one calorie computation, all numbers rounded to 2 decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieReport {
    /// Body mass index
    pub bmi: f64,

    /// BMI category
    pub category: BmiCategory,

    /// Basal metabolic rate in kcal/day
    pub bmr: f64,

    /// Total daily energy expenditure in kcal/day
    pub maintenance_calories: f64,

    /// Daily calories for the requested target
    pub required_calories: f64,
}

/// Tool computing daily calorie requirements from body measurements
pub struct CaloriesCalculator;

impl CaloriesCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Pure computation behind the tool. Validates every field and returns
    /// either a complete report or the first validation failure; never a
    /// partial result.
    pub fn compute(
        weight: f64,
        height: f64,
        age: u32,
        gender: &str,
        activity: &str,
        target: &str,
    ) -> Result<CalorieReport> {
        if weight <= 0.0 {
            return Err(invalid("weight", "a positive number of kilograms"));
        }
        if height <= 0.0 {
            return Err(invalid("height", "a positive number of centimeters"));
        }
        if age == 0 {
            return Err(invalid("age", "a positive number of years"));
        }

        let gender = Gender::parse(gender).ok_or_else(|| {
            invalid(
                "gender",
                &vocabulary(&[MALE_SYNONYMS, FEMALE_SYNONYMS]),
            )
        })?;

        let multiplier = activity_multiplier(activity).ok_or_else(|| {
            let groups: Vec<&[&str]> = ACTIVITY_LEVELS.iter().map(|(s, _)| *s).collect();
            invalid("activity", &vocabulary(&groups))
        })?;

        let target = Target::parse(target).ok_or_else(|| {
            invalid(
                "target",
                &vocabulary(&[MAINTAIN_SYNONYMS, GAIN_SYNONYMS, LOSS_SYNONYMS]),
            )
        })?;

        let bmi = round2(weight / (height / 100.0).powi(2));
        let category = BmiCategory::from_bmi(bmi);

        let bmr = (10.0 * weight) + (6.25 * height) - (5.0 * f64::from(age))
            + gender.bmr_offset();
        let tdee = bmr * multiplier;

        let required_calories = match target {
            Target::Maintain => tdee,
            Target::Gain => tdee + TARGET_ADJUSTMENT,
            Target::Loss => tdee - TARGET_ADJUSTMENT,
        };

        Ok(CalorieReport {
            bmi,
            category,
            bmr: round2(bmr),
            maintenance_calories: round2(tdee),
            required_calories: round2(required_calories),
        })
    }
}

fn invalid(field: &str, expected: &str) -> crate::error::Error {
    ToolError::InvalidArgument {
        field: field.to_string(),
        expected: expected.to_string(),
    }
    .into()
}

#[async_trait]
impl Tool for CaloriesCalculator {
    fn name(&self) -> &str {
        "calories-calculator"
    }

    fn description(&self) -> &str {
        "Calculate the amount of calories required to maintain a healthy weight."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "weight": {
                    "type": "number",
                    "description": "Weight in kg"
                },
                "height": {
                    "type": "number",
                    "description": "Height in cm"
                },
                "age": {
                    "type": "integer",
                    "description": "Age in years"
                },
                "gender": {
                    "type": "string",
                    "description": "Gender"
                },
                "activity": {
                    "type": "string",
                    "description": "Activity level"
                },
                "target": {
                    "type": "string",
                    "description": "Target body weight"
                }
            },
            "required": ["weight", "height", "age", "gender", "activity", "target"]
        })
    }

    async fn execute(&self, arguments: &Value) -> Result<Value> {
        let weight: f64 = require_argument(arguments, "weight", "a positive number of kilograms")?;
        let height: f64 =
            require_argument(arguments, "height", "a positive number of centimeters")?;
        let age: u32 = require_argument(arguments, "age", "a positive number of years")?;
        let gender: String = require_argument(arguments, "gender", "a gender description")?;
        let activity: String = require_argument(arguments, "activity", "an activity level")?;
        let target: String = require_argument(arguments, "target", "a body-weight target")?;

        let report = Self::compute(weight, height, age, &gender, &activity, &target)?;
        Ok(serde_json::to_value(report)?)
    }
}

impl Default for CaloriesCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn baseline(target: &str) -> CalorieReport {
        CaloriesCalculator::compute(70.0, 175.0, 30, "male", "sedentary", target).unwrap()
    }

    #[test]
    fn maintain_baseline_matches_mifflin_st_jeor() {
        let report = baseline("maintain");
        assert_eq!(report.bmi, 22.86);
        assert_eq!(report.category, BmiCategory::NormalWeight);
        // 10*70 + 6.25*175 - 5*30 + 5
        assert_eq!(report.bmr, 1648.75);
        assert_eq!(report.maintenance_calories, 1978.5);
        assert_eq!(report.required_calories, 1978.5);
    }

    #[test]
    fn gain_and_loss_shift_by_five_hundred() {
        assert_eq!(baseline("loss").required_calories, 1478.5);
        assert_eq!(baseline("gain").required_calories, 2478.5);
    }

    #[test]
    fn female_offset_applies() {
        let report =
            CaloriesCalculator::compute(60.0, 165.0, 25, "female", "sedentary", "maintain")
                .unwrap();
        // 10*60 + 6.25*165 - 5*25 - 161 = 1345.25
        assert_eq!(report.bmr, 1345.25);
        assert_eq!(report.maintenance_calories, 1614.3);
    }

    #[test]
    fn category_boundary_at_twenty_five_is_closed_below() {
        assert_eq!(BmiCategory::from_bmi(24.9), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn category_serializes_with_spaced_label() {
        let json = serde_json::to_value(BmiCategory::NormalWeight).unwrap();
        assert_eq!(json, "Normal weight");
    }

    #[test]
    fn indonesian_synonyms_are_accepted() {
        let report =
            CaloriesCalculator::compute(70.0, 175.0, 30, "pria", "cukup aktif", "menurunkan")
                .unwrap();
        // 1648.75 * 1.55 - 500
        assert_eq!(report.required_calories, 2055.56);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let report =
            CaloriesCalculator::compute(70.0, 175.0, 30, "Male", "Sedentary", "MAINTAIN").unwrap();
        assert_eq!(report.required_calories, 1978.5);
    }

    #[test]
    fn unknown_gender_names_the_field_and_vocabulary() {
        let err =
            CaloriesCalculator::compute(70.0, 175.0, 30, "xyz", "sedentary", "maintain")
                .unwrap_err();
        assert!(err.is_invalid_input());
        let message = err.to_string();
        assert!(message.contains("gender"));
        assert!(message.contains("male"));
        assert!(message.contains("perempuan"));
    }

    #[test]
    fn unknown_activity_and_target_fail() {
        assert!(
            CaloriesCalculator::compute(70.0, 175.0, 30, "male", "couch potato", "maintain")
                .is_err()
        );
        assert!(
            CaloriesCalculator::compute(70.0, 175.0, 30, "male", "sedentary", "bulk").is_err()
        );
    }

    #[test]
    fn non_positive_measurements_fail() {
        assert!(CaloriesCalculator::compute(0.0, 175.0, 30, "male", "sedentary", "maintain")
            .is_err());
        assert!(CaloriesCalculator::compute(70.0, -175.0, 30, "male", "sedentary", "maintain")
            .is_err());
        assert!(CaloriesCalculator::compute(70.0, 175.0, 0, "male", "sedentary", "maintain")
            .is_err());
    }

    #[tokio::test]
    async fn execute_returns_the_full_report() {
        let tool = CaloriesCalculator::new();
        let value = tool
            .execute(&serde_json::json!({
                "weight": 70.0,
                "height": 175.0,
                "age": 30,
                "gender": "male",
                "activity": "sedentary",
                "target": "maintain"
            }))
            .await
            .unwrap();

        assert_eq!(value["bmi"], 22.86);
        assert_eq!(value["category"], "Normal weight");
        assert_eq!(value["required_calories"], 1978.5);
    }

    #[tokio::test]
    async fn execute_rejects_missing_fields_without_partial_results() {
        let tool = CaloriesCalculator::new();
        let err = tool
            .execute(&serde_json::json!({"weight": 70.0}))
            .await
            .unwrap_err();
        match err {
            Error::Tool(ToolError::InvalidArgument { field, .. }) => {
                assert_eq!(field, "height");
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }
}
