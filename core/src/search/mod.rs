//! Similarity search boundary for menu recommendation
//!
//! The embedding model and the vector index are opaque collaborators: the
//! core only depends on the contracts in this module. `store` holds the
//! pgvector-backed implementation used in production.

pub mod store;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use store::{OpenAiEmbeddings, PgVectorStore};

/// Trait for embedding providers
///
/// Converts text into a dense vector representation for nearest-neighbor
/// retrieval.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate the embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Name of the embedding model
    fn model_name(&self) -> &str;
}

/// Trait for metadata-filtered nearest-neighbor retrieval
#[async_trait]
pub trait SimilaritySearch: Send + Sync {
    /// Return up to `k` records nearest to `query`, restricted by `filter`,
    /// ordered by descending similarity. An empty result is valid, not an
    /// error.
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        filter: &MetadataFilter,
    ) -> Result<Vec<ScoredRecord>>;
}

/// Single numeric predicate over a metadata field
///
/// The core only ever constrains one field with a strict less-than bound,
/// so the filter is exactly that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataFilter {
    /// Metadata field the predicate applies to
    pub field: String,

    /// Exclusive upper bound
    pub less_than: f64,
}

impl MetadataFilter {
    /// Build a `field < value` predicate
    pub fn less_than<S: Into<String>>(field: S, value: f64) -> Self {
        Self {
            field: field.into(),
            less_than: value,
        }
    }
}

/// One similarity-search match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    /// Similarity to the query, higher is closer
    pub score: f64,

    /// Open metadata mapping stored alongside the embedding
    pub metadata: serde_json::Value,
}
