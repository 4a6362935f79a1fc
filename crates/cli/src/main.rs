//! groundwork CLI — the main entry point.
//!
//! Commands:
//! - `ask`    — Answer one question grounded in the corpus
//! - `corpus` — Inspect the extracted corpus and keyword ranking
//! - `serve`  — Start the HTTP gateway
//! - `config` — Show the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "groundwork",
    about = "Grounded answers from a document corpus",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file (default: ./groundwork.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer one question grounded in the corpus
    Ask {
        /// The question to answer
        query: String,
    },

    /// List the extracted corpus, optionally ranked against a query
    Corpus {
        /// Rank documents against this query
        query: Option<String>,
    },

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Ask { query } => commands::ask::run(cli.config, query).await?,
        Commands::Corpus { query } => commands::corpus::run(cli.config, query).await?,
        Commands::Serve { port } => commands::serve::run(cli.config, port).await?,
        Commands::Config => commands::config_cmd::run(cli.config).await?,
    }

    Ok(())
}
