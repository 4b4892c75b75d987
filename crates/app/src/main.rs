use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser, Debug)]
#[command(name = "kauri", version, about = "Summarise and classify bank statement exports")]
struct Cli {
    /// Config file (defaults to ./kauri.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Totals spent and received, transaction count and date range
    Summarise {
        /// Directory of statement CSVs (defaults to the configured one)
        dir: Option<PathBuf>,
    },

    /// Totals per transaction type, marked as income or expense
    Process {
        dir: Option<PathBuf>,
    },

    /// Spending category for each transaction, plus those needing review
    Classify {
        dir: Option<PathBuf>,

        /// Confidence below which a classification needs manual review
        #[arg(long)]
        threshold: Option<f32>,
    },

    /// Description statistics, useful for writing custom rules
    Analyse {
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let started = Instant::now();
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;
    let dir_or_default = |dir: Option<PathBuf>| dir.unwrap_or_else(|| cfg.statements_dir.clone());

    let result = match cli.command {
        Command::Summarise { dir } => commands::summarise(&dir_or_default(dir), &cfg).await,
        Command::Process { dir } => commands::process(&dir_or_default(dir), &cfg).await,
        Command::Classify { dir, threshold } => {
            commands::classify(&dir_or_default(dir), &cfg, threshold).await
        }
        Command::Analyse { dir } => commands::analyse(&dir_or_default(dir), &cfg).await,
    };

    tracing::info!("Execution time: {}ms", started.elapsed().as_millis());
    result
}
