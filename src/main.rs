//! Squadbot CLI entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use squadbot::config::{BotConfig, WorkerConfig};
use squadbot::dispatcher::Dispatcher;
use squadbot::runner::{InProcessRunner, SubprocessRunner, WorkerRunner};
use squadbot::telegram::TelegramBot;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "squadbot")]
#[command(version)]
#[command(about = "Telegram bot that creates 2-of-2 Squads v4 multisigs on Solana devnet")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Telegram bot
    Bot {
        /// Run each multisig creation in an isolated subprocess
        #[arg(long)]
        isolate_worker: bool,
    },

    /// Create one multisig and print the JSON result to stdout
    CreateMultisig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr: the worker's stdout is reserved for the JSON
    // result, and the subprocess transport treats any stderr as failure,
    // so the worker defaults to warn.
    let default_filter = match (&cli.command, cli.verbose) {
        (_, true) => "squadbot=debug",
        (Commands::CreateMultisig, false) => "squadbot=warn",
        (_, false) => "squadbot=info",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Bot { isolate_worker } => run_bot(isolate_worker).await,
        Commands::CreateMultisig => {
            let config = WorkerConfig::from_env();
            squadbot::worker::run(&config).await?;
            Ok(())
        }
    }
}

async fn run_bot(isolate_worker: bool) -> Result<()> {
    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let runner: Arc<dyn WorkerRunner> = if isolate_worker {
        Arc::new(SubprocessRunner::new())
    } else {
        Arc::new(InProcessRunner::new(config.worker.clone()))
    };

    let dispatcher = Dispatcher::new(TelegramBot::new(config.bot_token), runner);

    tokio::select! {
        result = dispatcher.run() => result.map_err(Into::into),
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
            Ok(())
        }
    }
}
