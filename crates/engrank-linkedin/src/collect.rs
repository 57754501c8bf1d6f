//! Collection orchestration: posts first, then each post's engagement streams.
//!
//! Network calls are strictly sequential. Per-post stream failures are
//! isolated into [`CollectionRun::errors`]; only an unresolvable profile URL
//! or a posts stream that yields nothing before failing aborts the run.

use std::future::Future;
use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use engrank_core::EngagementKind;
use regex::Regex;

use crate::client::LinkedinClient;
use crate::error::LinkedinError;
use crate::pagination::StopReason;
use crate::types::{EngagementRecord, RawActor, RawComment, RawPost};

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/in/([^/?#]+)").expect("valid regex"));

/// Extracts the profile username from a `LinkedIn` profile URL.
///
/// # Errors
///
/// Returns [`LinkedinError::InvalidProfileUrl`] when the URL has no
/// `/in/<username>` segment.
pub fn extract_username(profile_url: &str) -> Result<String, LinkedinError> {
    USERNAME_RE
        .captures(profile_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
        .ok_or_else(|| LinkedinError::InvalidProfileUrl(profile_url.to_owned()))
}

/// Raw engagement gathered for one post.
#[derive(Debug, Clone, Default)]
pub struct PostEngagement {
    pub urn: String,
    pub url: Option<String>,
    pub reactions: Vec<RawActor>,
    pub comments: Vec<RawComment>,
    pub reposts: Vec<RawActor>,
}

impl PostEngagement {
    /// All records of the post: reactions, then comments, then reposts.
    pub fn records(&self) -> impl Iterator<Item = EngagementRecord<'_>> {
        self.reactions
            .iter()
            .map(EngagementRecord::Reaction)
            .chain(self.comments.iter().map(EngagementRecord::Comment))
            .chain(self.reposts.iter().map(EngagementRecord::Repost))
    }
}

/// Raw record counts across the whole run, before identity filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunAggregates {
    pub total_reactions: u64,
    pub total_comments: u64,
    pub total_reposts: u64,
    pub posts_analyzed: u64,
}

impl RunAggregates {
    #[must_use]
    pub fn total_engagement(&self) -> u64 {
        self.total_reactions + self.total_comments + self.total_reposts
    }
}

/// Everything one collection run produced.
#[derive(Debug, Clone, Default)]
pub struct CollectionRun {
    pub posts: Vec<PostEngagement>,
    pub aggregates: RunAggregates,
    pub errors: Vec<String>,
}

/// Collects engagement for the profile's posts from the last `days` days.
///
/// # Errors
///
/// See [`collect_engagement_at`].
pub async fn collect_engagement(
    client: &LinkedinClient,
    profile_url: &str,
    days: u32,
) -> Result<CollectionRun, LinkedinError> {
    collect_engagement_at(client, profile_url, days, Utc::now()).await
}

/// Same as [`collect_engagement`] with an explicit clock.
///
/// # Errors
///
/// Returns [`LinkedinError::InvalidProfileUrl`] when no username can be
/// extracted, or the posts stream error when it fails before any post was
/// retained. All other failures are recorded in [`CollectionRun::errors`].
pub async fn collect_engagement_at(
    client: &LinkedinClient,
    profile_url: &str,
    days: u32,
    now: DateTime<Utc>,
) -> Result<CollectionRun, LinkedinError> {
    let username = extract_username(profile_url)?;
    let cutoff = window_start(now, days);
    let mut errors = Vec::new();

    tracing::info!(%username, days, %cutoff, "fetching posts");
    let posts = client.fetch_profile_posts(&username, cutoff).await;
    let posts = match posts.stop {
        StopReason::Failed(e) if posts.items.is_empty() => {
            tracing::error!(%username, error = %e, "posts stream failed");
            return Err(e);
        }
        StopReason::Failed(e) => {
            tracing::warn!(
                %username,
                kept = posts.items.len(),
                error = %e,
                "posts stream failed after partial results"
            );
            errors.push(format!(
                "Failed to fetch further posts for {username}: {e}"
            ));
            posts.items
        }
        _ => posts.items,
    };
    tracing::info!(%username, count = posts.len(), "posts within window");

    let mut collected = Vec::with_capacity(posts.len());
    for post in &posts {
        collected.push(collect_post(client, post, &mut errors).await);
    }

    let aggregates = RunAggregates {
        total_reactions: collected.iter().map(|p| p.reactions.len() as u64).sum(),
        total_comments: collected.iter().map(|p| p.comments.len() as u64).sum(),
        total_reposts: collected.iter().map(|p| p.reposts.len() as u64).sum(),
        posts_analyzed: collected.len() as u64,
    };
    tracing::info!(
        %username,
        posts = aggregates.posts_analyzed,
        reactions = aggregates.total_reactions,
        comments = aggregates.total_comments,
        reposts = aggregates.total_reposts,
        errors = errors.len(),
        "collection finished"
    );

    Ok(CollectionRun {
        posts: collected,
        aggregates,
        errors,
    })
}

/// Start of the collection window. A window reaching past the earliest
/// representable instant starts there, so every dated post is kept.
fn window_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    Duration::try_days(i64::from(days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

async fn collect_post(
    client: &LinkedinClient,
    post: &RawPost,
    errors: &mut Vec<String>,
) -> PostEngagement {
    let urn = post.urn.as_str();
    let url = post.canonical_url();
    tracing::debug!(post_urn = urn, "collecting engagement for post");

    let reactions = isolated(errors, EngagementKind::Reaction, urn, async {
        let url = url.ok_or_else(|| LinkedinError::NoPostUrl {
            urn: urn.to_owned(),
        })?;
        client.fetch_post_reactions(url).await
    })
    .await;
    let comments = isolated(
        errors,
        EngagementKind::Comment,
        urn,
        client.fetch_post_comments(urn),
    )
    .await;
    let reposts = isolated(
        errors,
        EngagementKind::Repost,
        urn,
        client.fetch_post_reposts(urn),
    )
    .await;

    PostEngagement {
        urn: urn.to_owned(),
        url: url.map(str::to_owned),
        reactions,
        comments,
        reposts,
    }
}

/// Awaits one per-post stream; a failure is recorded and yields no records.
async fn isolated<T, Fut>(
    errors: &mut Vec<String>,
    kind: EngagementKind,
    urn: &str,
    fut: Fut,
) -> Vec<T>
where
    Fut: Future<Output = Result<Vec<T>, LinkedinError>>,
{
    let stream = kind.stream_name();
    match fut.await {
        Ok(items) => {
            tracing::debug!(post_urn = urn, stream, count = items.len(), "stream collected");
            items
        }
        Err(e) => {
            tracing::warn!(post_urn = urn, stream, error = %e, "stream failed, continuing");
            errors.push(format!("Failed to get {stream} for post {urn}: {e}"));
            Vec::new()
        }
    }
}
