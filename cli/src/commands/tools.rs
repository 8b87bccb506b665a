//! Tool catalog listing command

use anyhow::Result;
use async_trait::async_trait;
use maimeals_core::search::{MetadataFilter, ScoredRecord, SimilaritySearch};
use maimeals_core::ToolRegistry;
use std::sync::Arc;

/// Placeholder search handle so the catalog can be printed without a
/// configured database. It is never invoked by this command.
struct UnconfiguredSearch;

#[async_trait]
impl SimilaritySearch for UnconfiguredSearch {
    async fn similarity_search(
        &self,
        _query: &str,
        _k: usize,
        _filter: &MetadataFilter,
    ) -> maimeals_core::Result<Vec<ScoredRecord>> {
        Err(maimeals_core::error::SearchError::Upstream {
            message: "vector store is not configured in this command".to_string(),
        }
        .into())
    }
}

/// Print the tool catalog advertised to the model
pub fn tools_command() -> Result<()> {
    let registry = ToolRegistry::with_defaults(Arc::new(UnconfiguredSearch));

    let mut definitions = registry.definitions();
    definitions.sort_by(|a, b| a.function.name.cmp(&b.function.name));

    for definition in definitions {
        println!("{}", definition.function.name);
        println!("  {}", definition.function.description);
        println!(
            "  parameters: {}",
            serde_json::to_string_pretty(&definition.function.parameters)?
        );
        println!();
    }

    Ok(())
}
