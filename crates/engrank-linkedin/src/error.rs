use thiserror::Error;

/// Errors returned by the `LinkedIn` data-provider client and collector.
#[derive(Debug, Error)]
pub enum LinkedinError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("{endpoint} API failed: {status}")]
    Status { status: u16, endpoint: &'static str },

    /// HTTP 429 from the provider.
    #[error("rate limited by {endpoint} (retry after {retry_after_secs}s)")]
    RateLimited {
        endpoint: &'static str,
        retry_after_secs: u64,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// No `/in/<username>` segment could be found in the profile URL.
    #[error("invalid LinkedIn URL format: {0}")]
    InvalidProfileUrl(String),

    /// A post carried neither a share URL nor a post URL, so its reactions
    /// cannot be requested.
    #[error("post {urn} has no URL")]
    NoPostUrl { urn: String },

    #[error("pagination limit reached for {stream}: exceeded {max_pages} pages")]
    PaginationLimit { stream: String, max_pages: u32 },

    #[error("invalid provider base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("provider API key is not configured")]
    MissingApiKey,
}
