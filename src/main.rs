//! medrag: multilingual medical document Q&A
//!
//! Serves the HTTP API and provides a terminal chat client for it.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use medrag::config::{Config, LogFormat, LoggingConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "medrag")]
#[command(about = "Ask questions about medical PDFs in your language")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Listen address (overrides server.listen_addr)
        #[arg(short, long)]
        listen: Option<String>,
    },

    /// Write a default configuration file
    Init {
        /// Output directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List supported answer languages
    Languages,

    /// Chat about a document with a running server
    Chat {
        /// Server base URL
        #[arg(short, long, default_value = "http://localhost:8000")]
        server: String,

        /// PDF to upload before the first question
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Answer language (name or code)
        #[arg(short, long, default_value = "en")]
        language: String,

        /// API key sent as a Bearer token
        #[arg(long, env = "MEDRAG_API_KEY")]
        api_key: Option<String>,
    },
}

fn init_logging(logging: &LoggingConfig, verbose: u8) -> Result<()> {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)?;
    init_logging(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Serve { listen } => commands::serve::run(config, listen).await,
        Commands::Init { path, force } => commands::init::run(path, force),
        Commands::Languages => {
            commands::languages::run();
            Ok(())
        }
        Commands::Chat {
            server,
            file,
            language,
            api_key,
        } => commands::chat::run(&server, file, &language, api_key).await,
    }
}
