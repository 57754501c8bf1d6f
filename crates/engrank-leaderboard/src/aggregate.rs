//! Per-person aggregation of normalized engagement records.

use std::collections::HashMap;

use engrank_core::{EngagementKind, PersonIdentity};
use engrank_linkedin::{normalize_person, CollectionRun};

/// Engagement totals for one person across the whole run.
///
/// `total_score` stays `0.0` until [`crate::rank_people`] scores the aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonAggregate {
    pub identity: PersonIdentity,
    pub reaction_count: u64,
    pub comment_count: u64,
    pub repost_count: u64,
    pub total_engagement: u64,
    pub total_score: f64,
}

impl PersonAggregate {
    fn new(identity: PersonIdentity) -> Self {
        Self {
            identity,
            reaction_count: 0,
            comment_count: 0,
            repost_count: 0,
            total_engagement: 0,
            total_score: 0.0,
        }
    }

    /// Aggregate key. Always present: identities without an id never become
    /// aggregates.
    #[must_use]
    pub fn id(&self) -> &str {
        self.identity.id.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn count(&self, kind: EngagementKind) -> u64 {
        match kind {
            EngagementKind::Reaction => self.reaction_count,
            EngagementKind::Comment => self.comment_count,
            EngagementKind::Repost => self.repost_count,
        }
    }
}

/// Folds one sighting of `incoming` into `existing`.
///
/// Creates a zeroed aggregate when `existing` is `None`, then counts the
/// sighting under `kind`. Identity fields keep their first value, except the
/// display picture, which is filled in while still absent. An `incoming`
/// without an id is dropped and `existing` is returned unchanged.
#[must_use]
pub fn merge_or_create(
    existing: Option<PersonAggregate>,
    incoming: &PersonIdentity,
    kind: EngagementKind,
) -> Option<PersonAggregate> {
    if incoming.id.is_none() {
        return existing;
    }

    let mut aggregate = existing.unwrap_or_else(|| PersonAggregate::new(incoming.clone()));
    if aggregate.identity.display_picture.is_none() {
        aggregate
            .identity
            .display_picture
            .clone_from(&incoming.display_picture);
    }

    match kind {
        EngagementKind::Reaction => aggregate.reaction_count += 1,
        EngagementKind::Comment => aggregate.comment_count += 1,
        EngagementKind::Repost => aggregate.repost_count += 1,
    }
    aggregate.total_engagement += 1;
    Some(aggregate)
}

/// Builds the id-keyed aggregate map for every record of the run.
///
/// Posts are walked in order, and within each post reactions, comments and
/// reposts in that order. Counts do not depend on the order; which sighting
/// supplies the name and profile URL does.
#[must_use]
pub fn aggregate_by_person(run: &CollectionRun) -> HashMap<String, PersonAggregate> {
    let mut people: HashMap<String, PersonAggregate> = HashMap::new();
    let mut dropped = 0usize;

    for record in run.posts.iter().flat_map(|post| post.records()) {
        let person = normalize_person(record);
        let Some(id) = person.id.clone() else {
            dropped += 1;
            continue;
        };
        let existing = people.remove(&id);
        if let Some(merged) = merge_or_create(existing, &person, record.kind()) {
            people.insert(id, merged);
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "skipped records without an actor id");
    }
    tracing::debug!(people = people.len(), "aggregated engagement by person");
    people
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
