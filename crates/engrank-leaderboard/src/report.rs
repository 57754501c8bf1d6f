//! Leaderboard response payload.
//!
//! Field names are part of the public response format and several contain
//! spaces (`"profile url"`, `"total score"`), hence the explicit renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use engrank_core::{serialize_number, ScoringWeights};
use engrank_linkedin::CollectionRun;

use crate::aggregate::aggregate_by_person;
use crate::rank::{rank_people, RankedPerson};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub success: bool,
    pub data: LeaderboardData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardData {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub metadata: LeaderboardMetadata,
}

/// One ranked person as exposed to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: Option<String>,
    #[serde(rename = "profile url")]
    pub profile_url: Option<String>,
    #[serde(rename = "display pic")]
    pub display_pic: Option<String>,
    pub reactions: u64,
    pub comments: u64,
    pub reposts: u64,
    #[serde(rename = "total engagement")]
    pub total_engagement: u64,
    #[serde(rename = "total score", serialize_with = "serialize_number")]
    pub total_score: f64,
}

impl From<RankedPerson> for LeaderboardEntry {
    fn from(ranked: RankedPerson) -> Self {
        let RankedPerson { rank, person } = ranked;
        Self {
            rank,
            name: person.identity.name,
            profile_url: person.identity.profile_url,
            display_pic: person.identity.display_picture,
            reactions: person.reaction_count,
            comments: person.comment_count,
            reposts: person.repost_count,
            total_engagement: person.total_engagement,
            total_score: person.total_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardMetadata {
    pub total_people: usize,
    pub posts_analyzed: u64,
    pub aggregates: MetadataAggregates,
    pub scoring_config: ScoringWeights,
    /// `null` when the run had no isolated failures.
    pub errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_info: Option<RequestInfo>,
}

/// Raw record totals of the run, including records later dropped for
/// lacking an actor id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataAggregates {
    pub total_reactions: u64,
    pub total_comments: u64,
    pub total_reposts: u64,
    pub total_engagement: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    pub linkedin_url: String,
    pub days_analyzed: u32,
    pub processed_at: DateTime<Utc>,
}

impl LeaderboardResponse {
    /// Attaches the originating request to the metadata.
    #[must_use]
    pub fn with_request_info(mut self, info: RequestInfo) -> Self {
        self.data.metadata.request_info = Some(info);
        self
    }
}

/// Builds the leaderboard for a finished collection run.
///
/// A run that analyzed no posts yields an empty leaderboard with zeroed
/// aggregates and an explanatory `message`.
#[must_use]
pub fn generate_leaderboard(
    run: &CollectionRun,
    weights: &ScoringWeights,
    days: u32,
) -> LeaderboardResponse {
    let errors = (!run.errors.is_empty()).then(|| run.errors.clone());

    if run.aggregates.posts_analyzed == 0 {
        tracing::info!(days, "no posts in window, returning empty leaderboard");
        return LeaderboardResponse {
            success: true,
            data: LeaderboardData {
                leaderboard: Vec::new(),
                metadata: LeaderboardMetadata {
                    total_people: 0,
                    posts_analyzed: 0,
                    aggregates: MetadataAggregates::default(),
                    scoring_config: *weights,
                    errors,
                    message: Some(format!(
                        "No posts found within the last {days} days for this profile."
                    )),
                    request_info: None,
                },
            },
        };
    }

    let people = aggregate_by_person(run);
    let leaderboard: Vec<LeaderboardEntry> = rank_people(people.into_values(), weights)
        .into_iter()
        .map(LeaderboardEntry::from)
        .collect();

    let totals = &run.aggregates;
    tracing::info!(
        people = leaderboard.len(),
        posts = totals.posts_analyzed,
        "leaderboard generated"
    );

    LeaderboardResponse {
        success: true,
        data: LeaderboardData {
            metadata: LeaderboardMetadata {
                total_people: leaderboard.len(),
                posts_analyzed: totals.posts_analyzed,
                aggregates: MetadataAggregates {
                    total_reactions: totals.total_reactions,
                    total_comments: totals.total_comments,
                    total_reposts: totals.total_reposts,
                    total_engagement: totals.total_engagement(),
                },
                scoring_config: *weights,
                errors,
                message: None,
                request_info: None,
            },
            leaderboard,
        },
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
