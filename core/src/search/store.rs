//! pgvector-backed similarity search over the menu collection
//!
//! The index follows the langchain-pgvector layout the menu data is loaded
//! into: `langchain_pg_collection` names a collection,
//! `langchain_pg_embedding` holds one row per item with its embedding and a
//! `cmetadata` JSONB document. Queries are embedded through an
//! [`EmbeddingProvider`] and matched by cosine distance.

use crate::config::VectorStoreConfig;
use crate::error::{ConfigError, Result, SearchError};
use crate::search::{EmbeddingProvider, MetadataFilter, ScoredRecord, SimilaritySearch};
use async_openai::{config::OpenAIConfig, types::CreateEmbeddingRequestArgs, Client};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use std::sync::Arc;
use tokio::sync::OnceCell;

const MAX_CONNECTIONS: u32 = 5;

const SEARCH_SQL: &str = r#"
SELECT e.cmetadata AS metadata,
       e.embedding <=> $1::vector AS distance
FROM langchain_pg_embedding e
JOIN langchain_pg_collection c ON e.collection_id = c.uuid
WHERE c.name = $2
  AND (e.cmetadata ->> $3)::float8 < $4
ORDER BY e.embedding <=> $1::vector
LIMIT $5
"#;

/// Query embedder backed by the OpenAI embeddings API
pub struct OpenAiEmbeddings {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiEmbeddings {
    /// Create a new embedder
    pub fn new<S: Into<String>>(api_key: &str, model: S) -> Result<Self> {
        if api_key.is_empty() {
            return Err(ConfigError::MissingField {
                field: "api_key".to_string(),
            }
            .into());
        }

        let config = OpenAIConfig::new().with_api_key(api_key);
        Ok(Self {
            client: Client::with_config(config),
            model: model.into(),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(text)
            .build()
            .map_err(|e| SearchError::Upstream {
                message: format!("failed to build embedding request: {}", e),
            })?;

        let response = self.client.embeddings().create(request).await.map_err(|e| {
            tracing::error!("embedding request failed: {}", e);
            SearchError::Upstream {
                message: e.to_string(),
            }
        })?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::Upstream {
                message: "embedding response contained no vectors".to_string(),
            })?;

        Ok(embedding.embedding)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Similarity search over a pgvector index
///
/// The connection pool is created lazily on first search and reused for the
/// life of the process. Initialization runs at most once even under
/// concurrent first use; the pool itself is safe for concurrent reuse.
pub struct PgVectorStore {
    config: VectorStoreConfig,
    embeddings: Arc<dyn EmbeddingProvider>,
    pool: OnceCell<PgPool>,
}

impl std::fmt::Debug for PgVectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgVectorStore")
            .field("config", &self.config)
            .field("embeddings", &"<dyn EmbeddingProvider>")
            .field("pool", &self.pool.get().is_some())
            .finish()
    }
}

impl PgVectorStore {
    /// Create a new store.
    ///
    /// Connection configuration is validated here, before any network call;
    /// the actual connection is deferred to the first search.
    pub fn new(config: VectorStoreConfig, embeddings: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            embeddings,
            pool: OnceCell::new(),
        })
    }

    /// Get the shared pool, connecting on first use
    async fn pool(&self) -> Result<&PgPool> {
        self.pool
            .get_or_try_init(|| async {
                tracing::debug!(
                    collection = %self.config.collection,
                    "connecting vector store pool"
                );
                PgPoolOptions::new()
                    .max_connections(MAX_CONNECTIONS)
                    .connect(&self.config.database_url)
                    .await
                    .map_err(|e| {
                        crate::error::Error::from(SearchError::Upstream {
                            message: format!("failed to connect vector store: {}", e),
                        })
                    })
            })
            .await
    }

    /// Close the pool if it was ever opened. Called at process shutdown.
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
        }
    }

    fn vector_literal(embedding: &[f32]) -> String {
        let dims: Vec<String> = embedding.iter().map(|d| d.to_string()).collect();
        format!("[{}]", dims.join(","))
    }
}

#[async_trait]
impl SimilaritySearch for PgVectorStore {
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        filter: &MetadataFilter,
    ) -> Result<Vec<ScoredRecord>> {
        let embedding = self.embeddings.embed(query).await?;
        let pool = self.pool().await?;

        let rows = sqlx::query(SEARCH_SQL)
            .bind(Self::vector_literal(&embedding))
            .bind(&self.config.collection)
            .bind(&filter.field)
            .bind(filter.less_than)
            .bind(k as i64)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                tracing::error!("vector search query failed: {}", e);
                SearchError::Upstream {
                    message: e.to_string(),
                }
            })?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let metadata: serde_json::Value =
                row.try_get("metadata").map_err(|e| SearchError::Upstream {
                    message: format!("malformed metadata row: {}", e),
                })?;
            let distance: f64 =
                row.try_get("distance").map_err(|e| SearchError::Upstream {
                    message: format!("malformed distance row: {}", e),
                })?;

            // Cosine distance, reported as similarity so higher is closer.
            records.push(ScoredRecord {
                score: 1.0 - distance,
                metadata,
            });
        }

        tracing::debug!(
            matches = records.len(),
            k,
            field = %filter.field,
            "vector search completed"
        );

        Ok(records)
    }
}
