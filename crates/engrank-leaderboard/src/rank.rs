//! Weighted scoring and dense ranking of person aggregates.

use std::cmp::Ordering;

use engrank_core::{EngagementKind, ScoringWeights};

use crate::aggregate::PersonAggregate;

/// A scored aggregate with its 1-based position.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPerson {
    pub rank: u32,
    pub person: PersonAggregate,
}

/// Weighted sum of a person's counts.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score(person: &PersonAggregate, weights: &ScoringWeights) -> f64 {
    EngagementKind::ALL
        .iter()
        .map(|&kind| person.count(kind) as f64 * weights.weight(kind))
        .sum()
}

/// Scores every aggregate and orders them by score, then total engagement
/// (both descending), then id ascending.
///
/// Ranks are assigned by sorted position starting at 1; equal keys never
/// share a rank.
#[must_use]
pub fn rank_people<I>(people: I, weights: &ScoringWeights) -> Vec<RankedPerson>
where
    I: IntoIterator<Item = PersonAggregate>,
{
    let mut scored: Vec<PersonAggregate> = people
        .into_iter()
        .map(|mut person| {
            person.total_score = score(&person, weights);
            person
        })
        .collect();

    scored.sort_by(compare);

    (1u32..)
        .zip(scored)
        .map(|(rank, person)| RankedPerson { rank, person })
        .collect()
}

fn compare(a: &PersonAggregate, b: &PersonAggregate) -> Ordering {
    b.total_score
        .total_cmp(&a.total_score)
        .then_with(|| b.total_engagement.cmp(&a.total_engagement))
        .then_with(|| a.id().cmp(b.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use engrank_core::PersonIdentity;

    fn person(id: &str, reactions: u64, comments: u64, reposts: u64) -> PersonAggregate {
        PersonAggregate {
            identity: PersonIdentity {
                id: Some(id.to_owned()),
                name: Some(id.to_uppercase()),
                ..PersonIdentity::default()
            },
            reaction_count: reactions,
            comment_count: comments,
            repost_count: reposts,
            total_engagement: reactions + comments + reposts,
            total_score: 0.0,
        }
    }

    fn ids(ranked: &[RankedPerson]) -> Vec<&str> {
        ranked.iter().map(|r| r.person.id()).collect()
    }

    #[test]
    fn score_applies_per_kind_weights() {
        let weights = ScoringWeights {
            reaction: 1.0,
            comment: 2.0,
            repost: 3.0,
        };
        let p = person("a", 4, 2, 1);
        assert!((score(&p, &weights) - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tied_scores_get_distinct_ranks() {
        let weights = ScoringWeights::default();
        let people = vec![person("c", 7, 0, 0), person("a", 5, 5, 0), person("b", 10, 0, 0)];
        let ranked = rank_people(people, &weights);

        let ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
        for (r, expected) in ranked.iter().zip([10.0, 10.0, 7.0]) {
            assert!((r.person.total_score - expected).abs() < f64::EPSILON);
        }
        assert_eq!(ids(&ranked), ["a", "b", "c"]);
    }

    #[test]
    fn engagement_breaks_score_ties() {
        let weights = ScoringWeights {
            reaction: 1.0,
            comment: 2.0,
            repost: 0.0,
        };
        // Both score 4; "b" has more total engagement.
        let people = vec![person("a", 0, 2, 0), person("b", 2, 1, 3)];
        let ranked = rank_people(people, &weights);
        assert_eq!(ids(&ranked), ["b", "a"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn full_ties_fall_back_to_id() {
        let weights = ScoringWeights::default();
        let people = vec![person("zed", 1, 0, 0), person("amy", 0, 1, 0), person("kai", 0, 0, 1)];
        let ranked = rank_people(people, &weights);
        assert_eq!(ids(&ranked), ["amy", "kai", "zed"]);
    }

    #[test]
    fn empty_input_yields_empty_ranking() {
        assert!(rank_people(Vec::new(), &ScoringWeights::default()).is_empty());
    }
}
