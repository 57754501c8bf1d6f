//! HTTP client for the `LinkedIn` data provider (`RapidAPI` `linkedin-api8`).
//!
//! Wraps `reqwest` with the provider's auth headers, per-request retry, and
//! typed page decoding. Each `fetch_*_page` method returns one [`RawPage`];
//! the multi-page stream methods live in [`streams`].

mod streams;

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;

use engrank_core::AppConfig;

use crate::error::LinkedinError;
use crate::pagination::{Cursor, RawPage};
use crate::retry::retry_with_backoff;
use crate::types::{
    CommentsResponse, PostsResponse, RawActor, RawComment, RawPost, ReactionsResponse,
    RepostsResponse,
};

const DEFAULT_BASE_URL: &str = "https://linkedin-api8.p.rapidapi.com/";

/// Offset step of the posts endpoint's `start` parameter.
pub const POSTS_PAGE_SIZE: u32 = 50;

/// Items per page of the reactions endpoint; used to turn its reported total
/// into a page ceiling.
pub const REACTIONS_PAGE_SIZE: u32 = 10;

/// Client for the provider's posts and engagement endpoints.
///
/// Use [`LinkedinClient::new`] for production or
/// [`LinkedinClient::with_base_url`] to point at a mock server in tests.
pub struct LinkedinClient {
    client: Client,
    api_key: String,
    host: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
    inter_request_delay: Duration,
}

impl LinkedinClient {
    /// Creates a client pointed at the production provider, with retries
    /// disabled and no inter-request delay.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, LinkedinError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`LinkedinError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, LinkedinError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("engrank/0.1 (engagement-leaderboard)")
            .build()?;

        // Exactly one trailing slash, so `join` appends endpoint paths instead
        // of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| LinkedinError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        let host = parsed.host_str().unwrap_or_default().to_owned();

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            host,
            base_url: parsed,
            max_retries: 0,
            backoff_base_ms: 0,
            inter_request_delay: Duration::ZERO,
        })
    }

    /// Builds a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError::MissingApiKey`] when no provider key is
    /// configured, or any error from [`LinkedinClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, LinkedinError> {
        let api_key = config
            .rapidapi_key
            .as_deref()
            .ok_or(LinkedinError::MissingApiKey)?;
        Ok(
            Self::with_base_url(api_key, config.request_timeout_secs, &config.provider_base_url)?
                .with_retry(config.max_retries, config.retry_backoff_base_ms)
                .with_inter_request_delay(config.inter_request_delay_ms),
        )
    }

    /// Enables retry of transient failures: up to `max_retries` extra
    /// attempts per request, backing off from `backoff_base_ms`.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Sleeps `delay_ms` between consecutive page requests of one stream.
    #[must_use]
    pub fn with_inter_request_delay(mut self, delay_ms: u64) -> Self {
        self.inter_request_delay = Duration::from_millis(delay_ms);
        self
    }

    /// Fetches one page of a profile's posts, newest first.
    ///
    /// # Errors
    ///
    /// - [`LinkedinError::Status`] / [`LinkedinError::RateLimited`] on non-2xx.
    /// - [`LinkedinError::Http`] on network failure.
    /// - [`LinkedinError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_posts_page(
        &self,
        username: &str,
        cursor: Cursor,
    ) -> Result<RawPage<RawPost>, LinkedinError> {
        let start = (cursor.page.saturating_sub(1) * POSTS_PAGE_SIZE).to_string();
        let mut params = vec![("username", username), ("start", start.as_str())];
        if let Some(token) = cursor.token.as_deref() {
            params.push(("paginationToken", token));
        }
        let url = self.endpoint_url("get-profile-posts", &params)?;
        let body = self.request_json(Method::GET, url, None, "Posts").await?;
        decode_page::<PostsResponse, RawPost>(body, "get-profile-posts")
    }

    /// Fetches one page of a post's reactions. `post_url` is the post's
    /// canonical URL, not its URN.
    ///
    /// # Errors
    ///
    /// Same as [`LinkedinClient::fetch_posts_page`].
    pub async fn fetch_reactions_page(
        &self,
        post_url: &str,
        cursor: Cursor,
    ) -> Result<RawPage<RawActor>, LinkedinError> {
        let url = self.endpoint_url("get-post-reactions", &[])?;
        let payload = serde_json::json!({
            "url": post_url,
            "page": cursor.page,
            "reactionType": "",
        });
        let body = self
            .request_json(Method::POST, url, Some(&payload), "Reactions")
            .await?;
        decode_page::<ReactionsResponse, RawActor>(body, "get-post-reactions")
    }

    /// Fetches one page of a post's comments, most relevant first.
    ///
    /// # Errors
    ///
    /// Same as [`LinkedinClient::fetch_posts_page`].
    pub async fn fetch_comments_page(
        &self,
        urn: &str,
        cursor: Cursor,
    ) -> Result<RawPage<RawComment>, LinkedinError> {
        let page = cursor.page.to_string();
        let mut params = vec![("urn", urn), ("sort", "mostRelevant"), ("page", page.as_str())];
        if let Some(token) = cursor.token.as_deref() {
            params.push(("paginationToken", token));
        }
        let url = self.endpoint_url("get-profile-posts-comments", &params)?;
        let body = self.request_json(Method::GET, url, None, "Comments").await?;
        decode_page::<CommentsResponse, RawComment>(body, "get-profile-posts-comments")
    }

    /// Fetches one page of a post's reposts.
    ///
    /// # Errors
    ///
    /// Same as [`LinkedinClient::fetch_posts_page`].
    pub async fn fetch_reposts_page(
        &self,
        urn: &str,
        cursor: Cursor,
    ) -> Result<RawPage<RawActor>, LinkedinError> {
        let url = self.endpoint_url("posts/reposts", &[])?;
        let payload = serde_json::json!({
            "urn": urn,
            "page": cursor.page,
            "paginationToken": cursor.token.unwrap_or_default(),
        });
        let body = self
            .request_json(Method::POST, url, Some(&payload), "Reposts")
            .await?;
        decode_page::<RepostsResponse, RawActor>(body, "posts/reposts")
    }

    /// Joins `path` onto the base URL and appends percent-encoded query pairs.
    fn endpoint_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, LinkedinError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| LinkedinError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends one request with retry, asserts a 2xx status, and parses the body
    /// as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError::RateLimited`] on 429, [`LinkedinError::Status`]
    /// on any other non-2xx, [`LinkedinError::Http`] on network failure and
    /// [`LinkedinError::Deserialize`] if the body is not JSON.
    async fn request_json(
        &self,
        method: Method,
        url: Url,
        payload: Option<&serde_json::Value>,
        endpoint: &'static str,
    ) -> Result<serde_json::Value, LinkedinError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let method = method.clone();
            let url = url.clone();
            async move {
                let mut request = self
                    .client
                    .request(method, url)
                    .header("x-rapidapi-host", &self.host)
                    .header("x-rapidapi-key", &self.api_key);
                if let Some(payload) = payload {
                    request = request.json(payload);
                }

                let response = request.send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(LinkedinError::RateLimited {
                        endpoint,
                        retry_after_secs,
                    });
                }

                if !status.is_success() {
                    return Err(LinkedinError::Status {
                        status: status.as_u16(),
                        endpoint,
                    });
                }

                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|e| LinkedinError::Deserialize {
                    context: endpoint.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }
}

/// Returns `true` when the envelope reports `"success": true`.
fn is_success(body: &serde_json::Value) -> bool {
    body.get("success").and_then(serde_json::Value::as_bool) == Some(true)
}

/// Decodes a response envelope into a page. A `success: false` envelope is
/// an empty page, not an error: the provider uses it for "nothing more".
fn decode_page<R, T>(body: serde_json::Value, context: &str) -> Result<RawPage<T>, LinkedinError>
where
    R: DeserializeOwned + Into<RawPage<T>>,
{
    if !is_success(&body) {
        tracing::debug!(endpoint = context, "provider reported success=false");
        return Ok(RawPage::default());
    }
    let response: R = serde_json::from_value(body).map_err(|e| LinkedinError::Deserialize {
        context: context.to_owned(),
        source: e,
    })?;
    Ok(response.into())
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
