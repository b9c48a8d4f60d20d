//! Unit tests for the github_client crate.

use super::*; // Import items from lib.rs
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_QUERY: &str = "query($owner: String!) { repositoryOwner(login: $owner) { login } }";

async fn client_for(mock_server: &MockServer) -> GitHubClient {
    let octocrab = Octocrab::builder()
        .base_uri(mock_server.uri())
        .unwrap()
        .personal_token("test-token".to_string())
        .build()
        .unwrap();
    GitHubClient::new(octocrab)
}

#[tokio::test]
async fn test_execute_returns_data_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": { "owner": "octocat" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "repositoryOwner": { "login": "octocat" }
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result = client
        .execute(TEST_QUERY, json!({ "owner": "octocat" }))
        .await;

    let data = result.expect("execute should succeed");
    assert_eq!(data["repositoryOwner"]["login"], "octocat");
}

#[tokio::test]
async fn test_execute_surfaces_graphql_errors() {
    let mock_server = MockServer::start().await;

    // GitHub reports schema-level problems with HTTP 200 and an errors array.
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                { "message": "Field 'bioHtml' doesn't exist on type 'User'" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result = client.execute(TEST_QUERY, json!({})).await;

    match result {
        Err(Error::Graphql(message)) => {
            assert!(message.contains("bioHtml"));
        }
        other => panic!("expected Graphql error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_execute_rejects_missing_data_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "unexpected": true
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result = client.execute(TEST_QUERY, json!({})).await;

    assert!(matches!(result, Err(Error::InvalidResponse)));
}

#[tokio::test]
async fn test_execute_maps_rate_limit_rejection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "API rate limit exceeded for user ID 1.",
            "documentation_url": "https://docs.github.com/rest/overview/rate-limits"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result = client.execute(TEST_QUERY, json!({})).await;

    assert!(matches!(result, Err(Error::RateLimitExceeded)));
}

#[tokio::test]
async fn test_execute_maps_bad_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/graphql"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result = client.execute(TEST_QUERY, json!({})).await;

    assert!(matches!(result, Err(Error::AuthError(_))));
}

#[tokio::test]
async fn test_create_token_client_succeeds() {
    let result = create_token_client("ghp_dummytoken");
    assert!(result.is_ok());
}
