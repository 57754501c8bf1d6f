//! Multi-page stream fetches for `LinkedinClient`.

use chrono::{DateTime, Utc};

use crate::error::LinkedinError;
use crate::pagination::{paginate, Paginated, Protocol};
use crate::types::{RawActor, RawComment, RawPost};

use super::{LinkedinClient, REACTIONS_PAGE_SIZE};

impl LinkedinClient {
    /// Fetches a profile's posts newer than `cutoff`.
    ///
    /// Pages are walked newest first; the first post strictly older than
    /// `cutoff` ends the stream on the spot, so posts after it on the same
    /// page and every later page are never collected. Posts before it on
    /// that page are kept.
    ///
    /// Returns the full [`Paginated`] outcome rather than a `Result` so the
    /// caller can keep posts gathered before a mid-stream failure.
    pub async fn fetch_profile_posts(
        &self,
        username: &str,
        cutoff: DateTime<Utc>,
    ) -> Paginated<RawPost> {
        paginate(
            "posts",
            Protocol::Token,
            self.inter_request_delay,
            |cursor| self.fetch_posts_page(username, cursor),
            |post: &RawPost| {
                if post.is_older_than(cutoff) {
                    tracing::debug!(
                        username,
                        post_urn = %post.urn,
                        "reached post older than cutoff"
                    );
                    false
                } else {
                    true
                }
            },
        )
        .await
    }

    /// Fetches every reaction on a post.
    ///
    /// # Errors
    ///
    /// Returns the first page error; reactions from earlier pages are discarded.
    pub async fn fetch_post_reactions(
        &self,
        post_url: &str,
    ) -> Result<Vec<RawActor>, LinkedinError> {
        paginate(
            "reactions",
            Protocol::Count {
                page_size: REACTIONS_PAGE_SIZE,
            },
            self.inter_request_delay,
            |cursor| self.fetch_reactions_page(post_url, cursor),
            |_| true,
        )
        .await
        .into_result()
    }

    /// Fetches every comment on a post.
    ///
    /// # Errors
    ///
    /// Returns the first page error; comments from earlier pages are discarded.
    pub async fn fetch_post_comments(&self, urn: &str) -> Result<Vec<RawComment>, LinkedinError> {
        paginate(
            "comments",
            Protocol::Token,
            self.inter_request_delay,
            |cursor| self.fetch_comments_page(urn, cursor),
            |_| true,
        )
        .await
        .into_result()
    }

    /// Fetches every repost of a post.
    ///
    /// # Errors
    ///
    /// Returns the first page error; reposts from earlier pages are discarded.
    pub async fn fetch_post_reposts(&self, urn: &str) -> Result<Vec<RawActor>, LinkedinError> {
        paginate(
            "reposts",
            Protocol::CountWithToken,
            self.inter_request_delay,
            |cursor| self.fetch_reposts_page(urn, cursor),
            |_| true,
        )
        .await
        .into_result()
    }
}
