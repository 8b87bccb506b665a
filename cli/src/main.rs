//! # maimeals CLI
//!
//! Command-line interface for the mAIMeals nutrition agent.
//!
//! ## Usage
//!
//! - `maimeals ask "berapa kebutuhan kalori saya?"` - Run a single turn
//! - `maimeals tools` - Show the tools advertised to the model
//!
//! Configuration comes from the environment (a `.env` file is honored), the
//! same variables the backend deployment uses: `OPENAI_API_KEY`, `MODEL`,
//! `DB_USER`, `DB_PASSWORD`, `DB_HOST`, `DB_PORT`, `DB_NAME`, and friends.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

use commands::{ask_command, tools_command};
use config::EnvConfigLoader;

/// maimeals - a generative nutrition agent
#[derive(Parser)]
#[command(name = "maimeals")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A generative nutrition agent with calorie and menu tools")]
#[command(long_about = None)]
struct Cli {
    /// API key override
    #[arg(long)]
    api_key: Option<String>,

    /// Base URL override
    #[arg(long)]
    base_url: Option<String>,

    /// Model name override
    #[arg(long)]
    model: Option<String>,

    /// Answer language override
    #[arg(long)]
    language: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the agent a nutrition question and print the outcome envelope
    Ask {
        /// The question to ask
        question: String,
    },

    /// Show the tools advertised to the model
    Tools,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    maimeals_core::init_tracing_with_debug(cli.verbose);

    let loader = EnvConfigLoader::new()
        .with_api_key_override(cli.api_key)
        .with_base_url_override(cli.base_url)
        .with_model_override(cli.model)
        .with_language_override(cli.language);

    match cli.command {
        Commands::Ask { question } => ask_command(question, loader).await,
        Commands::Tools => tools_command(),
    }
}
