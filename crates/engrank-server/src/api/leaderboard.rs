use std::sync::LazyLock;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use regex::Regex;
use serde_json::Value;

use engrank_core::load_scoring_weights_or_default;
use engrank_leaderboard::{generate_leaderboard, LeaderboardResponse, RequestInfo};
use engrank_linkedin::collect_engagement;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

static PROFILE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?linkedin\.com/in/[^/?]+").expect("valid regex")
});

const URL_FORMAT_HINT: &str =
    "Please provide a valid LinkedIn profile URL in the format: https://www.linkedin.com/in/username";

#[derive(Debug, PartialEq, Eq)]
struct LeaderboardRequest {
    linkedin_url: String,
    days: u32,
}

/// Checks the raw body in the order clients are told about problems:
/// missing URL, then `days`, then URL shape.
fn validate(body: &Value) -> Result<LeaderboardRequest, ApiError> {
    let Some(linkedin_url) = body
        .get("LinkedinURL")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    else {
        return Err(ApiError::bad_request(
            "Missing required parameter: LinkedinURL",
            "Please provide a LinkedIn profile URL in the format: https://www.linkedin.com/in/username",
        ));
    };

    let Some(days) = body
        .get("days")
        .and_then(Value::as_u64)
        .and_then(|d| u32::try_from(d).ok())
        .filter(|&d| d > 0)
    else {
        return Err(ApiError::bad_request(
            "Invalid days parameter",
            "Please provide a positive number for the days parameter.",
        ));
    };

    if !PROFILE_URL_RE.is_match(linkedin_url) {
        return Err(ApiError::bad_request(
            "Invalid LinkedIn URL format",
            URL_FORMAT_HINT,
        ));
    }

    Ok(LeaderboardRequest {
        linkedin_url: linkedin_url.to_owned(),
        days,
    })
}

pub(super) async fn create_leaderboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "Invalid request body",
            rejection.body_text(),
        )
    })?;
    let request = validate(&body)?;

    let Some(client) = state.client.as_deref() else {
        tracing::error!(request_id = %req_id.0, "provider API key is not configured");
        return Err(ApiError::internal(
            "Server configuration error",
            "API key not configured. Please contact administrator.",
        ));
    };

    tracing::info!(
        request_id = %req_id.0,
        linkedin_url = %request.linkedin_url,
        days = request.days,
        "processing leaderboard request"
    );

    let run = collect_engagement(client, &request.linkedin_url, request.days)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %req_id.0, error = %e, "collection failed");
            ApiError::internal("Failed to fetch LinkedIn data", e.to_string()).with_details(
                "There was an error retrieving data from LinkedIn. Please check the LinkedIn URL and try again.",
            )
        })?;

    let weights = load_scoring_weights_or_default(&state.config.scoring_path);
    let response = generate_leaderboard(&run, &weights, request.days).with_request_info(
        RequestInfo {
            linkedin_url: request.linkedin_url,
            days_analyzed: request.days,
            processed_at: Utc::now(),
        },
    );

    tracing::info!(
        request_id = %req_id.0,
        people = response.data.metadata.total_people,
        posts = response.data.metadata.posts_analyzed,
        errors = run.errors.len(),
        "leaderboard generated"
    );
    Ok(Json(response))
}

#[cfg(test)]
#[path = "leaderboard_test.rs"]
mod tests;
