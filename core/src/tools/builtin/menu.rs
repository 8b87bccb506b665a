//! Menu recommendation tool
//!
//! Semantic search over the menu collection, constrained so every
//! recommended item fits within one meal of the caller's daily calorie
//! budget.

use crate::error::Result;
use crate::search::{MetadataFilter, SimilaritySearch};
use crate::tools::base::{require_argument, Tool};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// Number of matches requested from the index
const TOP_K: usize = 3;

/// The daily budget is split evenly across this many meals
const MEALS_PER_DAY: f64 = 3.0;

/// Metadata field carrying an item's calorie count
const CALORIES_FIELD: &str = "calories";

/// Tool recommending menu items within a per-meal calorie ceiling
pub struct MenuRecommendation {
    search: Arc<dyn SimilaritySearch>,
}

impl MenuRecommendation {
    pub fn new(search: Arc<dyn SimilaritySearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for MenuRecommendation {
    fn name(&self) -> &str {
        "menu-recommendation"
    }

    fn description(&self) -> &str {
        "Give Recommendation Process for a meal based on required calories"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "required_calories": {
                    "type": "number",
                    "description": "Required calories for the meal in one day"
                },
                "preferred_menu": {
                    "type": "string",
                    "description": "Preferred menu for the meal"
                }
            },
            "required": ["required_calories", "preferred_menu"]
        })
    }

    async fn execute(&self, arguments: &Value) -> Result<Value> {
        let required_calories: f64 = require_argument(
            arguments,
            "required_calories",
            "a positive daily calorie budget",
        )?;
        let preferred_menu: String =
            require_argument(arguments, "preferred_menu", "a menu description")?;

        if required_calories <= 0.0 {
            return Err(crate::error::ToolError::InvalidArgument {
                field: "required_calories".to_string(),
                expected: "a positive daily calorie budget".to_string(),
            }
            .into());
        }

        let per_meal_ceiling = required_calories / MEALS_PER_DAY;
        let filter = MetadataFilter::less_than(CALORIES_FIELD, per_meal_ceiling);

        let records = self
            .search
            .similarity_search(&preferred_menu, TOP_K, &filter)
            .await?;

        tracing::debug!(
            matches = records.len(),
            ceiling = per_meal_ceiling,
            "menu recommendation search completed"
        );

        // Empty is a valid answer: nothing on the menu fits the ceiling.
        let metadata: Vec<Value> = records.into_iter().map(|record| record.metadata).collect();
        Ok(Value::Array(metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ScoredRecord;
    use std::sync::Mutex;

    /// Scripted index that records the search it was asked to run
    struct ScriptedSearch {
        records: Vec<ScoredRecord>,
        seen: Mutex<Option<(String, usize, MetadataFilter)>>,
    }

    impl ScriptedSearch {
        fn returning(records: Vec<ScoredRecord>) -> Arc<Self> {
            Arc::new(Self {
                records,
                seen: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl SimilaritySearch for ScriptedSearch {
        async fn similarity_search(
            &self,
            query: &str,
            k: usize,
            filter: &MetadataFilter,
        ) -> Result<Vec<ScoredRecord>> {
            *self.seen.lock().unwrap() = Some((query.to_string(), k, filter.clone()));
            Ok(self.records.clone())
        }
    }

    fn record(score: f64, calories: f64) -> ScoredRecord {
        ScoredRecord {
            score,
            metadata: json!({"name": "menu item", "calories": calories}),
        }
    }

    #[tokio::test]
    async fn issues_a_per_meal_ceiling_search() {
        let search = ScriptedSearch::returning(vec![
            record(0.92, 480.0),
            record(0.88, 350.0),
            record(0.71, 520.0),
        ]);
        let tool = MenuRecommendation::new(search.clone());

        let value = tool
            .execute(&json!({"required_calories": 1800.0, "preferred_menu": "ayam bakar"}))
            .await
            .unwrap();

        let (query, k, filter) = search.seen.lock().unwrap().clone().unwrap();
        assert_eq!(query, "ayam bakar");
        assert_eq!(k, 3);
        assert_eq!(filter, MetadataFilter::less_than("calories", 600.0));

        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 3);
        // Metadata passes through untouched, similarity order preserved.
        assert_eq!(items[0]["calories"], 480.0);
        assert_eq!(items[2]["calories"], 520.0);
    }

    #[tokio::test]
    async fn all_filtered_out_is_an_empty_list_not_an_error() {
        let tool = MenuRecommendation::new(ScriptedSearch::returning(Vec::new()));

        let value = tool
            .execute(&json!({"required_calories": 900.0, "preferred_menu": "steak"}))
            .await
            .unwrap();

        assert_eq!(value, json!([]));
    }

    #[tokio::test]
    async fn non_positive_budget_is_rejected() {
        let tool = MenuRecommendation::new(ScriptedSearch::returning(Vec::new()));

        let err = tool
            .execute(&json!({"required_calories": 0.0, "preferred_menu": "soto"}))
            .await
            .unwrap_err();

        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("required_calories"));
    }

    #[tokio::test]
    async fn missing_menu_field_is_rejected() {
        let tool = MenuRecommendation::new(ScriptedSearch::returning(Vec::new()));

        let err = tool
            .execute(&json!({"required_calories": 1800.0}))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("preferred_menu"));
    }
}
