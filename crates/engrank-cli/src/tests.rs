use super::*;
use engrank_core::ScoringWeights;
use engrank_leaderboard::{
    LeaderboardData, LeaderboardEntry, LeaderboardMetadata, LeaderboardResponse,
    MetadataAggregates,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn entry(rank: u32, name: &str, score: f64, counts: (u64, u64, u64)) -> LeaderboardEntry {
    LeaderboardEntry {
        rank,
        name: Some(name.to_owned()),
        profile_url: None,
        display_pic: None,
        reactions: counts.0,
        comments: counts.1,
        reposts: counts.2,
        total_engagement: counts.0 + counts.1 + counts.2,
        total_score: score,
    }
}

fn response(errors: Option<Vec<String>>) -> LeaderboardResponse {
    LeaderboardResponse {
        success: true,
        data: LeaderboardData {
            leaderboard: vec![entry(1, "Ada", 2.0, (1, 1, 0)), entry(2, "Bob", 1.5, (1, 0, 1))],
            metadata: LeaderboardMetadata {
                total_people: 2,
                posts_analyzed: 1,
                aggregates: MetadataAggregates {
                    total_reactions: 2,
                    total_comments: 1,
                    total_reposts: 1,
                    total_engagement: 4,
                },
                scoring_config: ScoringWeights::default(),
                errors,
                message: None,
                request_info: None,
            },
        },
    }
}

#[test]
fn parses_run_command() {
    let cli = Cli::try_parse_from([
        "engrank-cli",
        "run",
        "--url",
        "https://www.linkedin.com/in/ada",
        "--days",
        "7",
        "--json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Run {
            days: 7,
            scoring: None,
            json: true,
            ..
        }
    ));
}

#[test]
fn parses_query_command_with_default_base_url() {
    let cli = Cli::try_parse_from([
        "engrank-cli",
        "query",
        "--url",
        "https://www.linkedin.com/in/ada",
        "--days",
        "30",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Query { days, base_url, .. } => {
            assert_eq!(days, 30);
            // ENGRANK_SERVER_URL may override the default in a developer shell.
            assert!(!base_url.is_empty());
        }
        Commands::Run { .. } => panic!("expected query command"),
    }
}

#[test]
fn rejects_zero_days() {
    let result = Cli::try_parse_from([
        "engrank-cli",
        "run",
        "--url",
        "https://www.linkedin.com/in/ada",
        "--days",
        "0",
    ]);
    assert!(result.is_err());
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["engrank-cli"]).is_err());
}

#[test]
fn entry_line_matches_summary_format() {
    assert_eq!(
        output::entry_line(&entry(1, "Ada", 2.0, (1, 1, 0))),
        "1. Ada - Score: 2 (1R, 1C, 0S)"
    );
    assert_eq!(
        output::entry_line(&entry(2, "Bob", 1.5, (1, 0, 1))),
        "2. Bob - Score: 1.5 (1R, 0C, 1S)"
    );
}

#[test]
fn leaderboard_lines_include_errors_when_present() {
    let clean = output::leaderboard_lines(&response(None));
    assert_eq!(clean[0], "Found 2 people in leaderboard");
    assert_eq!(clean[2], "Total engagement: 4");
    assert!(!clean.iter().any(|l| l == "Errors encountered:"));

    let failed = output::leaderboard_lines(&response(Some(vec![
        "Failed to get comments for post p1: Comments API failed: 500".to_owned(),
    ])));
    assert_eq!(
        failed.last().map(String::as_str),
        Some("- Failed to get comments for post p1: Comments API failed: 500")
    );
}

#[tokio::test]
async fn request_leaderboard_decodes_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/leaderboard"))
        .and(body_json(serde_json::json!({
            "LinkedinURL": "https://www.linkedin.com/in/ada",
            "days": 7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(response(None)))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, outcome) =
        query::request_leaderboard(&format!("{}/", server.uri()), "https://www.linkedin.com/in/ada", 7)
            .await
            .expect("request");

    assert_eq!(status.as_u16(), 200);
    match outcome {
        query::QueryOutcome::Leaderboard(board) => assert_eq!(board, response(None)),
        query::QueryOutcome::Failed(err) => panic!("unexpected failure: {err:?}"),
    }
}

#[tokio::test]
async fn request_leaderboard_decodes_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/leaderboard"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "success": false,
            "error": "Invalid days parameter",
            "message": "Please provide a positive number for the days parameter."
        })))
        .mount(&server)
        .await;

    let (status, _, outcome) =
        query::request_leaderboard(&server.uri(), "https://www.linkedin.com/in/ada", 7)
            .await
            .expect("request");

    assert_eq!(status.as_u16(), 400);
    let query::QueryOutcome::Failed(err) = outcome else {
        panic!("expected failure outcome");
    };
    assert_eq!(err.error, "Invalid days parameter");
    assert!(err.details.is_none());
}
