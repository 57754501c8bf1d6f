//! In-process collection: provider client, collector and leaderboard in one
//! command, without a server.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;

use engrank_core::{load_scoring_weights_or_default, AppConfig};
use engrank_leaderboard::{generate_leaderboard, RequestInfo};
use engrank_linkedin::{collect_engagement, LinkedinClient};

use crate::output::print_leaderboard;

/// Collects engagement for `url` and prints the leaderboard.
///
/// `scoring` overrides the configured scoring file. With `json` set the full
/// payload is printed as pretty JSON.
///
/// # Errors
///
/// Returns an error when no provider key is configured, when the collection
/// fails fatally, or when the payload cannot be serialized.
pub(crate) async fn run_leaderboard(
    config: &AppConfig,
    url: &str,
    days: u32,
    scoring: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let client = LinkedinClient::from_app_config(config)
        .context("cannot build provider client (is RAPIDAPI_KEY set?)")?;

    tracing::info!(url, days, "collecting engagement in-process");
    let run = collect_engagement(&client, url, days)
        .await
        .with_context(|| format!("failed to collect engagement for {url}"))?;
    if !run.errors.is_empty() {
        tracing::warn!(errors = run.errors.len(), "collection finished with isolated failures");
    }

    let weights = load_scoring_weights_or_default(scoring.unwrap_or(config.scoring_path.as_path()));
    let response = generate_leaderboard(&run, &weights, days).with_request_info(RequestInfo {
        linkedin_url: url.to_owned(),
        days_analyzed: days,
        processed_at: Utc::now(),
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_leaderboard(&response);
    }
    Ok(())
}
