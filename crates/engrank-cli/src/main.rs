mod output;
mod query;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "engrank-cli")]
#[command(about = "Engagement leaderboard command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect engagement in-process and print the leaderboard
    Run {
        /// Profile URL, e.g. `https://www.linkedin.com/in/username`
        #[arg(long)]
        url: String,

        /// Size of the look-back window in days
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,

        /// Scoring configuration file; defaults to `ENGRANK_SCORING_PATH`
        #[arg(long)]
        scoring: Option<PathBuf>,

        /// Print the full JSON payload instead of the ranked list
        #[arg(long)]
        json: bool,
    },
    /// Request a leaderboard from a running server
    Query {
        /// Profile URL, e.g. `https://www.linkedin.com/in/username`
        #[arg(long)]
        url: String,

        /// Size of the look-back window in days
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,

        /// Server base URL
        #[arg(long, env = "ENGRANK_SERVER_URL", default_value = "http://localhost:3000")]
        base_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = engrank_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            url,
            days,
            scoring,
            json,
        } => run::run_leaderboard(&config, &url, days, scoring.as_deref(), json).await,
        Commands::Query {
            url,
            days,
            base_url,
        } => query::query_server(&base_url, &url, days).await,
    }
}

#[cfg(test)]
mod tests;
