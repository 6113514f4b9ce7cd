//! Integration tests for the Twitter API client.
//!
//! These tests run the reqwest-backed client against a mock server and check
//! the requests it sends, the way it decodes responses, and a full bot run
//! end to end.

use std::sync::Arc;

use serde_json::json;
use tweetbot::{run_once, CheckpointStore, SearchParams, TweetApi, TwitterClient, TwitterConfig};
use wiremock::matchers::{header_regex, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Test Helpers
// =============================================================================

fn test_config(hash: &[&str]) -> TwitterConfig {
    TwitterConfig {
        oauth_access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".to_string(),
        oauth_access_token_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".to_string(),
        consumer_key: "xvz1evFS4wEEPTGEFPHBog".to_string(),
        consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".to_string(),
        hash: hash.iter().map(|h| h.to_string()).collect(),
    }
}

fn test_client(server: &MockServer) -> TwitterClient {
    TwitterClient::new(&test_config(&[]), server.uri())
}

fn oauth_header() -> impl wiremock::Match {
    header_regex(
        "authorization",
        r#"^OAuth oauth_consumer_key="xvz1evFS4wEEPTGEFPHBog", oauth_nonce="[A-Za-z0-9]{32}", oauth_signature="[^"]+", oauth_signature_method="HMAC-SHA1", oauth_timestamp="\d+", oauth_token="[^"]+", oauth_version="1.0"$"#,
    )
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_sends_signed_request_and_decodes_statuses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/tweets.json"))
        .and(query_param("q", "#rustlang"))
        .and(query_param("count", "5"))
        .and(query_param("result_type", "recent"))
        .and(query_param_is_missing("since_id"))
        .and(oauth_header())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statuses": [
                {"id": 1450000000000000001_i64, "id_str": "1450000000000000001", "text": "Ferris says hi #rustlang"},
                {"id": 1450000000000000002_i64, "text": "RT @ferris: hi", "retweeted_status": {"id": 1}}
            ],
            "search_metadata": {"count": 5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let search = client
        .search_tweets(SearchParams::new("#rustlang"))
        .await
        .expect("search should succeed");

    assert_eq!(search.statuses.len(), 2);
    assert_eq!(search.statuses[0].id, 1450000000000000001);
    assert_eq!(search.statuses[0].text, "Ferris says hi #rustlang");
    assert!(!search.statuses[0].is_retweet());
    assert!(search.statuses[1].is_retweet());
}

#[tokio::test]
async fn test_search_sends_since_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/tweets.json"))
        .and(query_param("since_id", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "statuses": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let search = client
        .search_tweets(SearchParams::new("#rustlang").since(100))
        .await
        .expect("search should succeed");

    assert!(search.statuses.is_empty());
}

#[tokio::test]
async fn test_search_error_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/tweets.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"code": 32, "message": "Could not authenticate you."}]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .search_tweets(SearchParams::new("#rustlang"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_search_undecodable_body_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/tweets.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client
        .search_tweets(SearchParams::new("#rustlang"))
        .await
        .is_err());
}

// =============================================================================
// Retweet
// =============================================================================

#[tokio::test]
async fn test_retweet_posts_to_status_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/statuses/retweet/1450000000000000001.json"))
        .and(oauth_header())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 99 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .retweet(1450000000000000001)
        .await
        .expect("retweet should succeed");
}

#[tokio::test]
async fn test_retweet_forbidden_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/statuses/retweet/7.json"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": [{"code": 327, "message": "You have already retweeted this Tweet."}]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = TweetApi::retweet(&client, 7).await.unwrap_err();
    assert!(err.to_string().contains("403"));
}

// =============================================================================
// End to end
// =============================================================================

#[tokio::test]
async fn test_full_run_against_mock_server() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = CheckpointStore::new(dir.path().join("lastTweetId"));
    std::fs::write(store.path(), "10").unwrap();

    Mock::given(method("GET"))
        .and(path("/search/tweets.json"))
        .and(query_param("q", "#rustlang"))
        .and(query_param("since_id", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statuses": [
                {"id": 20, "text": "new crate released #rustlang"},
                {"id": 21, "text": "RT @ferris: old news", "retweeted_status": {"id": 5}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/tweets.json"))
        .and(query_param("q", "#golang"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/statuses/retweet/20.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 30 })))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&["#rustlang", "#golang"]);
    let client = Arc::new(TwitterClient::new(&config, server.uri()));
    let mut out = Vec::new();

    let summary = run_once(client, &config.hash, &store, &mut out)
        .await
        .expect("run should succeed");

    assert_eq!(summary.hashtags, 2);
    assert_eq!(summary.collected, 2);
    assert_eq!(summary.skipped_retweets, 1);
    assert_eq!(summary.reposted, 1);
    assert_eq!(summary.checkpoint, Some(20));
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "20");
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "20 new crate released #rustlang\n"
    );
}
