//! `LinkedIn` data-provider response types.
//!
//! Every endpoint wraps its payload in a `{"success": bool, "data": ...}`
//! envelope. The envelope's `success` flag is checked on the raw JSON before
//! these types are deserialized (see [`crate::client`]), so `data` here is
//! only ever read from successful responses. All record fields are optional:
//! a record the provider returns half-filled is still collected and left for
//! the normalizer to accept or drop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use engrank_core::EngagementKind;

use crate::pagination::RawPage;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Reads an optional string, mapping `null` to the empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A post returned by `get-profile-posts`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub urn: String,
    #[serde(default)]
    pub share_url: Option<String>,
    #[serde(default)]
    pub post_url: Option<String>,
    /// Publication time in epoch milliseconds.
    #[serde(default)]
    pub posted_date_timestamp: Option<i64>,
}

impl RawPost {
    /// Canonical URL of the post: the share URL, falling back to the post URL.
    #[must_use]
    pub fn canonical_url(&self) -> Option<&str> {
        self.share_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.post_url.as_deref().filter(|u| !u.is_empty()))
    }

    #[must_use]
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        self.posted_date_timestamp
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// `true` when the post is strictly older than `cutoff`. Posts without a
    /// readable timestamp are never considered older.
    #[must_use]
    pub fn is_older_than(&self, cutoff: DateTime<Utc>) -> bool {
        self.posted_at().is_some_and(|at| at < cutoff)
    }
}

/// One size variant of an actor's profile picture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfilePicture {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub width: Option<u64>,
    #[serde(default)]
    pub height: Option<u64>,
}

/// Actor shape shared by reaction and repost items: identity at top level
/// plus a list of picture variants.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActor {
    #[serde(default)]
    pub urn: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<Vec<ProfilePicture>>,
}

/// A comment item; the commenter is nested under `author`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawComment {
    #[serde(default)]
    pub author: Option<CommentAuthor>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    #[serde(default)]
    pub urn: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

/// A borrowed engagement record tagged with its kind.
#[derive(Debug, Clone, Copy)]
pub enum EngagementRecord<'a> {
    Reaction(&'a RawActor),
    Comment(&'a RawComment),
    Repost(&'a RawActor),
}

impl EngagementRecord<'_> {
    #[must_use]
    pub fn kind(&self) -> EngagementKind {
        match self {
            EngagementRecord::Reaction(_) => EngagementKind::Reaction,
            EngagementRecord::Comment(_) => EngagementKind::Comment,
            EngagementRecord::Repost(_) => EngagementKind::Repost,
        }
    }
}

// ---------------------------------------------------------------------------
// get-profile-posts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostsResponse {
    #[serde(default)]
    pub data: Option<Vec<RawPost>>,
    #[serde(default)]
    pub pagination_token: Option<String>,
}

impl From<PostsResponse> for RawPage<RawPost> {
    fn from(resp: PostsResponse) -> Self {
        RawPage {
            items: resp.data,
            token: resp.pagination_token,
            ..RawPage::default()
        }
    }
}

// ---------------------------------------------------------------------------
// get-post-reactions
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ReactionsResponse {
    #[serde(default)]
    pub data: Option<ReactionsData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReactionsData {
    #[serde(default)]
    pub items: Option<Vec<RawActor>>,
    /// Total number of reactions across all pages.
    #[serde(default)]
    pub total: Option<u64>,
}

impl From<ReactionsResponse> for RawPage<RawActor> {
    fn from(resp: ReactionsResponse) -> Self {
        let Some(data) = resp.data else {
            return RawPage::default();
        };
        RawPage {
            items: data.items,
            total_items: data.total,
            ..RawPage::default()
        }
    }
}

// ---------------------------------------------------------------------------
// get-profile-posts-comments
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentsResponse {
    #[serde(default)]
    pub data: Option<Vec<RawComment>>,
    #[serde(default)]
    pub pagination_token: Option<String>,
    #[serde(default)]
    pub total_page: Option<u32>,
}

impl From<CommentsResponse> for RawPage<RawComment> {
    fn from(resp: CommentsResponse) -> Self {
        RawPage {
            items: resp.data,
            token: resp.pagination_token,
            total_pages: resp.total_page,
            ..RawPage::default()
        }
    }
}

// ---------------------------------------------------------------------------
// posts/reposts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct RepostsResponse {
    #[serde(default)]
    pub data: Option<RepostsData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepostsData {
    #[serde(default)]
    pub items: Option<Vec<RawActor>>,
    #[serde(default)]
    pub pagination_token: Option<String>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl From<RepostsResponse> for RawPage<RawActor> {
    fn from(resp: RepostsResponse) -> Self {
        let Some(data) = resp.data else {
            return RawPage::default();
        };
        RawPage {
            items: data.items,
            token: data.pagination_token,
            total_pages: data.total_pages,
            ..RawPage::default()
        }
    }
}
