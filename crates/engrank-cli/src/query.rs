//! Client for a running `engrank-server`.

use std::time::{Duration, Instant};

use anyhow::Context;
use reqwest::StatusCode;
use serde::Deserialize;

use engrank_leaderboard::LeaderboardResponse;

use crate::output::print_leaderboard;

/// Failure body returned by the server on any non-2xx response.
#[derive(Debug, Deserialize)]
pub(crate) struct ServerError {
    pub error: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// Outcome of one leaderboard request.
#[derive(Debug)]
pub(crate) enum QueryOutcome {
    Leaderboard(LeaderboardResponse),
    Failed(ServerError),
}

/// Posts `{LinkedinURL, days}` to `{base_url}/api/leaderboard` and decodes
/// the reply.
///
/// # Errors
///
/// Returns an error when the server is unreachable or replies with a body
/// that is neither a leaderboard nor an error payload.
pub(crate) async fn request_leaderboard(
    base_url: &str,
    url: &str,
    days: u32,
) -> anyhow::Result<(StatusCode, Duration, QueryOutcome)> {
    let endpoint = format!("{}/api/leaderboard", base_url.trim_end_matches('/'));
    let body = serde_json::json!({ "LinkedinURL": url, "days": days });

    tracing::debug!(%endpoint, days, "requesting leaderboard");
    let started = Instant::now();
    let response = reqwest::Client::new()
        .post(&endpoint)
        .json(&body)
        .send()
        .await
        .with_context(|| format!("request to {endpoint} failed"))?;
    let status = response.status();
    let text = response.text().await?;
    let elapsed = started.elapsed();
    tracing::info!(
        %endpoint,
        status = status.as_u16(),
        elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        "leaderboard response received"
    );

    let outcome = if status.is_success() {
        QueryOutcome::Leaderboard(
            serde_json::from_str(&text).context("failed to parse leaderboard response")?,
        )
    } else {
        QueryOutcome::Failed(
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse error response ({status})"))?,
        )
    };
    Ok((status, elapsed, outcome))
}

/// Requests a leaderboard and prints the status, timing and result.
///
/// # Errors
///
/// See [`request_leaderboard`].
pub(crate) async fn query_server(base_url: &str, url: &str, days: u32) -> anyhow::Result<()> {
    println!("LinkedIn URL: {url}");
    println!("Days: {days}");
    println!("Base URL: {base_url}");
    println!("---");

    let (status, elapsed, outcome) = request_leaderboard(base_url, url, days).await?;
    println!("Status Code: {}", status.as_u16());
    println!("Response Time: {}ms", elapsed.as_millis());
    println!("---");

    match outcome {
        QueryOutcome::Leaderboard(response) => {
            println!("Success!");
            print_leaderboard(&response);
        }
        QueryOutcome::Failed(err) => {
            println!("Error: {}", err.error);
            println!("Message: {}", err.message);
            if let Some(details) = err.details {
                println!("Details: {details}");
            }
        }
    }
    Ok(())
}
