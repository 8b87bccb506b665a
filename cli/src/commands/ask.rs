//! Single-turn ask command

use anyhow::Result;
use maimeals_core::{
    AgentBuilder, ChatMessage, OpenAiEmbeddings, PgVectorStore, TurnOutcome,
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::EnvConfigLoader;

/// Run one agent turn and print the outcome envelope as JSON
pub async fn ask_command(question: String, loader: EnvConfigLoader) -> Result<()> {
    let llm_config = loader.load_llm()?;
    let store_config = loader.load_vector_store()?;
    info!(model = %llm_config.model, "running one agent turn");

    let embeddings = Arc::new(OpenAiEmbeddings::new(
        &llm_config.api_key,
        store_config.embedding_model.clone(),
    )?);
    let store = Arc::new(PgVectorStore::new(store_config, embeddings)?);

    let mut builder = AgentBuilder::new(llm_config).with_search(store.clone());
    if let Some(language) = loader.answer_language() {
        builder = builder.with_answer_language(language);
    }
    let agent = builder.build()?;

    let outcome = agent.run_turn(&[ChatMessage::user(question)]).await?;
    match &outcome {
        TurnOutcome::Answer(_) => debug!("turn ended with a direct answer"),
        TurnOutcome::ToolOutput(_) => debug!("turn ended with a tool payload"),
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    store.close().await;
    Ok(())
}
