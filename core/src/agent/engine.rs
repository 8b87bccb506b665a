//! Orchestration engine for one conversation turn
//!
//! A short state machine: the `model` state invokes the gateway with the
//! conversation input and the tool catalog, its classified response either
//! terminates the turn with an answer or moves it to the `tool` state, and
//! the `tool` state dispatches exactly one call before terminating. There is
//! no loop back to the model; the tool payload is the turn's final word.

use crate::agent::prompt::{build_system_prompt, DEFAULT_ANSWER_LANGUAGE};
use crate::agent::turn::TurnOutcome;
use crate::config::{Protocol, ResolvedLlmConfig};
use crate::error::{AgentError, ConfigError, Result, ToolError};
use crate::llm::{ChatMessage, LlmClient, ModelResponse, OpenAiClient, ToolCallRequest};
use crate::search::SimilaritySearch;
use crate::tools::ToolRegistry;
use std::sync::Arc;

/// Configuration for the agent
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Language the agent answers in
    pub answer_language: String,

    /// Custom system prompt, overriding the built-in nutrition prompt
    pub system_prompt: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            answer_language: DEFAULT_ANSWER_LANGUAGE.to_string(),
            system_prompt: None,
        }
    }
}

/// The orchestration engine
///
/// Stateless between turns: a turn's state lives on the stack of
/// [`AgentCore::run_turn`] and is discarded at its terminal state. One
/// engine may serve concurrent turns.
pub struct AgentCore {
    config: AgentConfig,
    llm_client: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

impl std::fmt::Debug for AgentCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentCore")
            .field("config", &self.config)
            .field("llm_client", &"<dyn LlmClient>")
            .field("tools", &self.tools.list())
            .finish()
    }
}

impl AgentCore {
    /// Create an engine from its collaborators
    pub fn new(config: AgentConfig, llm_client: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self {
            config,
            llm_client,
            tools,
        }
    }

    /// Get the engine configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Names of the tools advertised to the model
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.list()
    }

    fn system_prompt(&self) -> String {
        self.config
            .system_prompt
            .clone()
            .unwrap_or_else(|| build_system_prompt(&self.config.answer_language))
    }

    /// Run one conversation turn to its terminal state.
    ///
    /// Resolves in at most two stages: one gateway call, then at most one
    /// tool dispatch. Upstream failures propagate unchanged; the engine
    /// never substitutes a degraded answer.
    pub async fn run_turn(&self, input: &[ChatMessage]) -> Result<TurnOutcome> {
        if input.is_empty() {
            return Err(ToolError::InvalidArgument {
                field: "input".to_string(),
                expected: "at least one conversation message".to_string(),
            }
            .into());
        }

        let response = self.invoke_model(input).await?;
        match response {
            ModelResponse::Text { content } => {
                tracing::debug!("turn resolved with a direct answer");
                Ok(TurnOutcome::Answer(content))
            }
            ModelResponse::ToolCalls { calls } => self.invoke_tool(&calls).await,
        }
    }

    /// `model` state: one gateway invocation with the full tool catalog
    async fn invoke_model(&self, input: &[ChatMessage]) -> Result<ModelResponse> {
        let catalog = self.tools.definitions();
        tracing::debug!(
            model = self.llm_client.model_name(),
            provider = self.llm_client.provider_name(),
            tools = catalog.len(),
            "invoking model gateway"
        );

        self.llm_client
            .invoke(&self.system_prompt(), &catalog, input)
            .await
    }

    /// `tool` state: dispatch the first requested call, then terminate
    async fn invoke_tool(&self, calls: &[ToolCallRequest]) -> Result<TurnOutcome> {
        let call = calls.first().ok_or_else(|| {
            tracing::error!("model response contained neither an answer nor tool calls");
            AgentError::InvalidState {
                message: "model response contained neither an answer nor tool calls".to_string(),
            }
        })?;

        // Single tool call per turn. Extra requests are dropped, not queued.
        if calls.len() > 1 {
            tracing::warn!(
                tool = %call.name,
                discarded = calls.len() - 1,
                "model requested multiple tool calls; executing only the first"
            );
        }

        tracing::debug!(tool = %call.name, id = %call.id, "dispatching tool call");
        let payload = self.tools.dispatch(call).await?;

        Ok(TurnOutcome::ToolOutput(payload))
    }
}

/// Builder for creating an engine from resolved configuration
pub struct AgentBuilder {
    llm_config: Option<ResolvedLlmConfig>,
    agent_config: AgentConfig,
    llm_client: Option<Arc<dyn LlmClient>>,
    search: Option<Arc<dyn SimilaritySearch>>,
    registry: Option<ToolRegistry>,
}

impl AgentBuilder {
    /// Create a builder that will construct the gateway client from config
    pub fn new(llm_config: ResolvedLlmConfig) -> Self {
        Self {
            llm_config: Some(llm_config),
            agent_config: AgentConfig::default(),
            llm_client: None,
            search: None,
            registry: None,
        }
    }

    /// Create a builder around an existing gateway client
    pub fn with_client(client: Arc<dyn LlmClient>) -> Self {
        Self {
            llm_config: None,
            agent_config: AgentConfig::default(),
            llm_client: Some(client),
            search: None,
            registry: None,
        }
    }

    /// Set the agent configuration
    pub fn with_agent_config(mut self, agent_config: AgentConfig) -> Self {
        self.agent_config = agent_config;
        self
    }

    /// Set the answer language
    pub fn with_answer_language<S: Into<String>>(mut self, language: S) -> Self {
        self.agent_config.answer_language = language.into();
        self
    }

    /// Set the similarity-search handle used by the menu tool
    pub fn with_search(mut self, search: Arc<dyn SimilaritySearch>) -> Self {
        self.search = Some(search);
        self
    }

    /// Replace the default tool registry
    pub fn with_registry(mut self, registry: ToolRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<AgentCore> {
        let llm_client: Arc<dyn LlmClient> = match self.llm_client {
            Some(client) => client,
            None => {
                let config = self.llm_config.ok_or_else(|| ConfigError::MissingField {
                    field: "llm_config".to_string(),
                })?;
                config.validate()?;
                match config.protocol {
                    Protocol::OpenAICompat | Protocol::AzureOpenAI => {
                        Arc::new(OpenAiClient::new(&config)?)
                    }
                }
            }
        };

        let registry = match self.registry {
            Some(registry) => registry,
            None => {
                let search = self.search.ok_or_else(|| ConfigError::MissingField {
                    field: "similarity_search".to_string(),
                })?;
                ToolRegistry::with_defaults(search)
            }
        };

        Ok(AgentCore::new(self.agent_config, llm_client, registry))
    }
}
