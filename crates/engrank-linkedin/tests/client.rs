//! Integration tests for `LinkedinClient` stream pagination using wiremock.

use chrono::{TimeZone, Utc};
use engrank_linkedin::{LinkedinClient, LinkedinError, StopReason};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> LinkedinClient {
    LinkedinClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

fn actor(urn: &str) -> serde_json::Value {
    serde_json::json!({
        "urn": urn,
        "fullName": format!("Person {urn}"),
        "profileUrl": format!("https://www.linkedin.com/in/{urn}"),
        "profilePicture": [{ "url": format!("https://img/{urn}"), "width": 100, "height": 100 }]
    })
}

#[tokio::test]
async fn posts_follow_token_and_start_offset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-profile-posts"))
        .and(query_param("username", "ada"))
        .and(query_param("start", "0"))
        .and(header("x-rapidapi-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [{ "urn": "p1", "shareUrl": "https://www.linkedin.com/posts/p1" }],
            "paginationToken": "tok-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/get-profile-posts"))
        .and(query_param("start", "50"))
        .and(query_param("paginationToken", "tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [{ "urn": "p2", "postUrl": "https://www.linkedin.com/feed/update/p2" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let cutoff = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    let posts = client.fetch_profile_posts("ada", cutoff).await;

    assert!(matches!(posts.stop, StopReason::NoContinuation));
    assert_eq!(posts.pages_fetched, 2);
    let urns: Vec<_> = posts.items.iter().map(|p| p.urn.as_str()).collect();
    assert_eq!(urns, ["p1", "p2"]);
    assert_eq!(
        posts.items[1].canonical_url(),
        Some("https://www.linkedin.com/feed/update/p2")
    );
}

#[tokio::test]
async fn reactions_stop_at_ceiling_from_total() {
    let server = MockServer::start().await;

    // total 15 with page size 10: exactly two pages.
    for page in 1..=2u32 {
        let items: Vec<_> = (0..if page == 1 { 10 } else { 5 })
            .map(|i| actor(&format!("r{page}-{i}")))
            .collect();
        Mock::given(method("POST"))
            .and(path("/get-post-reactions"))
            .and(body_partial_json(serde_json::json!({
                "url": "https://www.linkedin.com/posts/p1",
                "page": page,
                "reactionType": ""
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": { "items": items, "total": 15 }
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = test_client(&server.uri());
    let reactions = client
        .fetch_post_reactions("https://www.linkedin.com/posts/p1")
        .await
        .expect("reactions");
    assert_eq!(reactions.len(), 15);
}

#[tokio::test]
async fn reactions_beyond_two_hundred_pages_are_all_kept() {
    let server = MockServer::start().await;

    let items: Vec<_> = (0..10).map(|i| actor(&format!("r{i}"))).collect();
    Mock::given(method("POST"))
        .and(path("/get-post-reactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "items": items, "total": 2500 }
        })))
        .expect(250)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reactions = client
        .fetch_post_reactions("https://www.linkedin.com/posts/p1")
        .await
        .expect("reactions");
    assert_eq!(reactions.len(), 2500);
}

#[tokio::test]
async fn comments_stop_when_token_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-profile-posts-comments"))
        .and(query_param("urn", "p1"))
        .and(query_param("sort", "mostRelevant"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [{ "author": { "urn": "c1", "name": "C One" }, "text": "hi" }],
            "paginationToken": "ctok",
            "totalPage": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/get-profile-posts-comments"))
        .and(query_param("page", "2"))
        .and(query_param("paginationToken", "ctok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [{ "author": { "urn": "c2", "name": "C Two" }, "text": "yo" }],
            "totalPage": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let comments = client.fetch_post_comments("p1").await.expect("comments");
    assert_eq!(comments.len(), 2, "final page items are still consumed");
}

#[tokio::test]
async fn reposts_stop_at_reported_total_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/posts/reposts"))
        .and(body_partial_json(
            serde_json::json!({ "urn": "p1", "page": 1, "paginationToken": "" }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "items": [actor("s1")], "paginationToken": "rtok", "totalPages": 2 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/posts/reposts"))
        .and(body_partial_json(
            serde_json::json!({ "urn": "p1", "page": 2, "paginationToken": "rtok" }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "items": [actor("s2")], "paginationToken": "rtok-3", "totalPages": 2 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reposts = client.fetch_post_reposts("p1").await.expect("reposts");
    let urns: Vec<_> = reposts.iter().filter_map(|r| r.urn.as_deref()).collect();
    assert_eq!(urns, ["s1", "s2"]);
}

#[tokio::test]
async fn unsuccessful_envelope_ends_stream_without_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/posts/reposts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "No reposts"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reposts = client.fetch_post_reposts("p1").await.expect("benign stop");
    assert!(reposts.is_empty());
}

#[tokio::test]
async fn non_2xx_is_a_stream_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-profile-posts-comments"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_post_comments("p1").await.unwrap_err();
    assert!(matches!(err, LinkedinError::Status { status: 500, .. }));
    assert_eq!(err.to_string(), "Comments API failed: 500");
}

#[tokio::test]
async fn transient_errors_are_retried_when_enabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-profile-posts-comments"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/get-profile-posts-comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [{ "author": { "urn": "c1" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry(2, 0);
    let comments = client.fetch_post_comments("p1").await.expect("retried");
    assert_eq!(comments.len(), 1);
}

#[tokio::test]
async fn rate_limit_surfaces_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/get-post-reactions"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .fetch_post_reactions("https://www.linkedin.com/posts/p1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LinkedinError::RateLimited {
            retry_after_secs: 7,
            ..
        }
    ));
}
