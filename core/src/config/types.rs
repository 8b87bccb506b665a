//! Minimal configuration types for the agent core
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in the CLI layer.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Supported LLM protocols
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// OpenAI-compatible API (includes OpenAI, many proxies, local models)
    #[serde(rename = "openai_compat")]
    OpenAICompat,
    /// Azure OpenAI API (shares the OpenAI-compatible client)
    #[serde(rename = "azure_openai")]
    AzureOpenAI,
}

impl Protocol {
    /// Get the protocol name as a string
    pub fn as_str(&self) -> &str {
        match self {
            Protocol::OpenAICompat => "openai_compat",
            Protocol::AzureOpenAI => "azure_openai",
        }
    }

    /// Get the default base URL for this protocol
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            Protocol::OpenAICompat => Some("https://api.openai.com/v1"),
            Protocol::AzureOpenAI => None, // Requires custom endpoint
        }
    }
}

/// A fully resolved LLM configuration ready for use by core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLlmConfig {
    /// The protocol to use
    pub protocol: Protocol,
    /// Base URL for the API
    pub base_url: String,
    /// API key for authentication
    pub api_key: String,
    /// Model name/identifier
    pub model: String,
}

impl ResolvedLlmConfig {
    /// Create a new resolved LLM config
    pub fn new(protocol: Protocol, base_url: String, api_key: String, model: String) -> Self {
        Self {
            protocol,
            base_url,
            api_key,
            model,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingField {
                field: "api_key".to_string(),
            }
            .into());
        }

        if self.model.is_empty() {
            return Err(ConfigError::MissingField {
                field: "model".to_string(),
            }
            .into());
        }

        if self.base_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "base_url".to_string(),
            }
            .into());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                value: self.base_url.clone(),
            }
            .into());
        }

        Ok(())
    }
}

/// Resolved connection settings for the menu vector index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    /// Postgres connection URL for the pgvector-backed index
    pub database_url: String,
    /// Name of the collection holding menu embeddings
    pub collection: String,
    /// Embedding model used to vectorize queries
    pub embedding_model: String,
}

impl VectorStoreConfig {
    /// Create a new vector store config with the default collection and
    /// embedding model
    pub fn new(database_url: String) -> Self {
        Self {
            database_url,
            collection: "menu".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
        }
    }

    /// Set the collection name
    pub fn with_collection(mut self, collection: String) -> Self {
        self.collection = collection;
        self
    }

    /// Set the embedding model
    pub fn with_embedding_model(mut self, model: String) -> Self {
        self.embedding_model = model;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.database_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "database_url".to_string(),
            }
            .into());
        }

        if !self.database_url.starts_with("postgres://")
            && !self.database_url.starts_with("postgresql://")
        {
            return Err(ConfigError::InvalidValue {
                field: "database_url".to_string(),
                value: self.database_url.clone(),
            }
            .into());
        }

        if self.collection.is_empty() {
            return Err(ConfigError::MissingField {
                field: "collection".to_string(),
            }
            .into());
        }

        if self.embedding_model.is_empty() {
            return Err(ConfigError::MissingField {
                field: "embedding_model".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llm_config_rejects_missing_api_key() {
        let config = ResolvedLlmConfig::new(
            Protocol::OpenAICompat,
            "https://api.openai.com/v1".to_string(),
            String::new(),
            "gpt-5-mini".to_string(),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn vector_store_config_defaults() {
        let config = VectorStoreConfig::new("postgresql://u:p@localhost:5432/menus".to_string());
        assert_eq!(config.collection, "menu");
        assert_eq!(config.embedding_model, "text-embedding-3-small");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn vector_store_config_rejects_non_postgres_url() {
        let config = VectorStoreConfig::new("mysql://u:p@localhost/menus".to_string());
        assert!(config.validate().is_err());
    }
}
