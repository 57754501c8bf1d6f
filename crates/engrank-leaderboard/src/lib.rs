//! Engagement leaderboard for one collection run.
//!
//! Folds a [`engrank_linkedin::CollectionRun`] into per-person aggregates,
//! scores them with configurable per-kind weights, assigns dense ranks and
//! assembles the response payload.

pub mod aggregate;
pub mod rank;
pub mod report;

pub use aggregate::{aggregate_by_person, merge_or_create, PersonAggregate};
pub use rank::{rank_people, score, RankedPerson};
pub use report::{
    generate_leaderboard, LeaderboardData, LeaderboardEntry, LeaderboardMetadata,
    LeaderboardResponse, MetadataAggregates, RequestInfo,
};
