use serde::{Deserialize, Serialize};

/// A category of actor interaction with a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    Reaction,
    Comment,
    Repost,
}

impl EngagementKind {
    pub const ALL: [EngagementKind; 3] = [
        EngagementKind::Reaction,
        EngagementKind::Comment,
        EngagementKind::Repost,
    ];

    /// Plural stream name used in logs and error messages (`reactions`, ...).
    #[must_use]
    pub fn stream_name(self) -> &'static str {
        match self {
            EngagementKind::Reaction => "reactions",
            EngagementKind::Comment => "comments",
            EngagementKind::Repost => "reposts",
        }
    }
}

impl std::fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngagementKind::Reaction => write!(f, "reaction"),
            EngagementKind::Comment => write!(f, "comment"),
            EngagementKind::Repost => write!(f, "repost"),
        }
    }
}

/// Provider-agnostic projection of an engagement actor.
///
/// `id` is the provider-assigned actor identifier. A `None` id marks a record
/// that cannot be attributed to anyone and must be dropped by consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonIdentity {
    pub id: Option<String>,
    pub name: Option<String>,
    pub profile_url: Option<String>,
    pub display_picture: Option<String>,
}
