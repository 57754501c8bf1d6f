use super::*;
use chrono::TimeZone;
use engrank_linkedin::{CommentAuthor, PostEngagement, RawActor, RawComment, RunAggregates};

fn actor(urn: &str, name: &str) -> RawActor {
    RawActor {
        urn: Some(urn.to_owned()),
        full_name: Some(name.to_owned()),
        profile_url: Some(format!("https://www.linkedin.com/in/{urn}")),
        profile_picture: None,
    }
}

/// One post: reactions from A and B, one comment from A.
fn single_post_run() -> CollectionRun {
    CollectionRun {
        posts: vec![PostEngagement {
            urn: "p1".to_owned(),
            url: Some("https://www.linkedin.com/posts/p1".to_owned()),
            reactions: vec![actor("a", "A"), actor("b", "B")],
            comments: vec![RawComment {
                author: Some(CommentAuthor {
                    urn: Some("a".to_owned()),
                    name: Some("A".to_owned()),
                    linkedin_url: Some("https://www.linkedin.com/in/a".to_owned()),
                }),
                text: Some("great".to_owned()),
            }],
            reposts: Vec::new(),
        }],
        aggregates: RunAggregates {
            total_reactions: 2,
            total_comments: 1,
            total_reposts: 0,
            posts_analyzed: 1,
        },
        errors: Vec::new(),
    }
}

#[test]
fn single_post_scenario_ranks_by_score() {
    let response = generate_leaderboard(&single_post_run(), &ScoringWeights::default(), 7);

    assert!(response.success);
    let board = &response.data.leaderboard;
    assert_eq!(board.len(), 2);

    assert_eq!(board[0].rank, 1);
    assert_eq!(board[0].name.as_deref(), Some("A"));
    assert_eq!((board[0].reactions, board[0].comments, board[0].reposts), (1, 1, 0));
    assert_eq!(board[0].total_engagement, 2);
    assert!((board[0].total_score - 2.0).abs() < f64::EPSILON);

    assert_eq!(board[1].rank, 2);
    assert_eq!(board[1].name.as_deref(), Some("B"));
    assert!((board[1].total_score - 1.0).abs() < f64::EPSILON);

    let metadata = &response.data.metadata;
    assert_eq!(metadata.total_people, 2);
    assert_eq!(metadata.posts_analyzed, 1);
    assert_eq!(metadata.aggregates.total_engagement, 3);
    assert!(metadata.errors.is_none());
    assert!(metadata.message.is_none());
}

#[test]
fn weights_are_applied_and_echoed() {
    let weights = ScoringWeights {
        reaction: 1.0,
        comment: 5.0,
        repost: 3.0,
    };
    let response = generate_leaderboard(&single_post_run(), &weights, 7);
    assert!((response.data.leaderboard[0].total_score - 6.0).abs() < f64::EPSILON);
    assert_eq!(response.data.metadata.scoring_config, weights);
}

#[test]
fn zero_posts_yields_empty_board_with_message() {
    let run = CollectionRun::default();
    let response = generate_leaderboard(&run, &ScoringWeights::default(), 14);

    assert!(response.success);
    assert!(response.data.leaderboard.is_empty());
    let metadata = &response.data.metadata;
    assert_eq!(metadata.total_people, 0);
    assert_eq!(metadata.aggregates, MetadataAggregates::default());
    assert_eq!(
        metadata.message.as_deref(),
        Some("No posts found within the last 14 days for this profile.")
    );
}

#[test]
fn isolated_errors_are_reported() {
    let mut run = single_post_run();
    run.errors
        .push("Failed to get reposts for post p1: Reposts API failed: 500".to_owned());
    let response = generate_leaderboard(&run, &ScoringWeights::default(), 7);
    assert_eq!(
        response.data.metadata.errors.as_deref(),
        Some(&["Failed to get reposts for post p1: Reposts API failed: 500".to_owned()][..])
    );
}

#[test]
fn serializes_with_public_field_names() {
    let processed_at = Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap();
    let response = generate_leaderboard(&single_post_run(), &ScoringWeights::default(), 7)
        .with_request_info(RequestInfo {
            linkedin_url: "https://www.linkedin.com/in/ada".to_owned(),
            days_analyzed: 7,
            processed_at,
        });
    let json = serde_json::to_value(&response).expect("serialize");

    let entry = &json["data"]["leaderboard"][0];
    for key in [
        "rank",
        "name",
        "profile url",
        "display pic",
        "reactions",
        "comments",
        "reposts",
        "total engagement",
        "total score",
    ] {
        assert!(entry.get(key).is_some(), "missing entry field {key}");
    }
    assert!(entry["display pic"].is_null());

    let metadata = &json["data"]["metadata"];
    assert_eq!(metadata["totalPeople"], 2);
    assert_eq!(metadata["postsAnalyzed"], 1);
    assert_eq!(metadata["aggregates"]["totalReactions"], 2);
    assert_eq!(metadata["scoringConfig"]["comment"], 1.0);
    assert!(metadata["errors"].is_null());
    assert!(metadata.get("message").is_none());
    assert_eq!(metadata["requestInfo"]["daysAnalyzed"], 7);
    assert_eq!(
        metadata["requestInfo"]["linkedinUrl"],
        "https://www.linkedin.com/in/ada"
    );
}

#[test]
fn whole_scores_serialize_without_fraction() {
    let weights = ScoringWeights {
        reaction: 1.0,
        comment: 1.5,
        repost: 1.0,
    };
    let json = serde_json::to_string(&generate_leaderboard(&single_post_run(), &weights, 7))
        .expect("serialize");

    assert!(json.contains(r#""total score":2.5"#), "{json}");
    assert!(json.contains(r#""total score":1,"#) || json.contains(r#""total score":1}"#), "{json}");
    assert!(json.contains(r#""scoringConfig":{"reaction":1,"comment":1.5,"repost":1}"#), "{json}");
}

#[test]
fn response_round_trips_through_json() {
    let response = generate_leaderboard(&single_post_run(), &ScoringWeights::default(), 7);
    let text = serde_json::to_string(&response).expect("serialize");
    let parsed: LeaderboardResponse = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(parsed, response);
}
