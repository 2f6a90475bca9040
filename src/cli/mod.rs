use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Counterparty Transaction Decoder
#[derive(Parser)]
#[command(name = "counterparty-decoder")]
#[command(about = "Extract and decode Counterparty messages embedded in Bitcoin transactions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a transaction from the block explorer and decode it
    Decode(commands::decode::DecodeCommand),
    /// Decode a saved block explorer transaction document
    DecodeFile(commands::decode::DecodeFileCommand),
    /// Decode a prefix-less message body (ledger `messages.data` form)
    DecodeData(commands::data::DecodeDataCommand),
    /// Fetch and decode many transactions concurrently
    Batch(commands::batch::BatchCommand),
    /// Apply the RC4 keystream to a hex chunk
    Arc4(commands::arc4::Arc4Command),
}

pub async fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode(command) => command.run().await,
        Commands::DecodeFile(command) => command.run(),
        Commands::DecodeData(command) => command.run(),
        Commands::Batch(command) => command.run().await,
        Commands::Arc4(command) => command.run(),
    }
}
