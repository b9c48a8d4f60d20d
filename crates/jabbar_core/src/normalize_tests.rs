//! Unit tests for actor normalization and fork-owner resolution.

use super::*;
use crate::models::{StargazerEdge, WatcherEdge};
use crate::test_support::ScriptedClient;
use serde_json::json;

fn user_with_orgs() -> serde_json::Value {
    json!({
        "login": "alice",
        "name": "Alice A",
        "company": "Acme Inc.",
        "websiteUrl": "https://alice.example",
        "url": "https://github.com/alice",
        "organizations": {
            "totalCount": 3,
            "edges": [
                {
                    "node": {
                        "login": "openco",
                        "name": "OpenCo",
                        "description": "Open source things",
                        "websiteUrl": "https://openco.example"
                    }
                },
                { "node": { "login": "otherorg" } }
            ]
        }
    })
}

#[test]
fn test_normalize_watcher_flattens_organizations() {
    let edge: WatcherEdge = serde_json::from_value(json!({ "node": user_with_orgs() })).unwrap();

    let actor = normalize_watcher(edge);

    assert_eq!(actor.login, "alice");
    assert_eq!(actor.name.as_deref(), Some("Alice A"));
    assert_eq!(actor.company.as_deref(), Some("Acme Inc."));
    assert!(!actor.is_organization);
    assert!(actor.starred_at.is_none());
    assert!(actor.forked_at.is_none());

    // Nested edge/node wrappers are gone; the true total survives even
    // though only one page of memberships was fetched.
    let org_logins: Vec<&str> = actor.organizations.iter().map(|o| o.login.as_str()).collect();
    assert_eq!(org_logins, vec!["openco", "otherorg"]);
    assert_eq!(actor.organizations_total_count, 3);
}

#[test]
fn test_normalize_stargazer_copies_sibling_timestamp() {
    let edge: StargazerEdge = serde_json::from_value(json!({
        "starredAt": "2020-01-01T00:00:00Z",
        "node": user_with_orgs()
    }))
    .unwrap();

    let actor = normalize_stargazer(edge);

    assert_eq!(
        actor.starred_at.map(|t| t.to_rfc3339()),
        Some("2020-01-01T00:00:00+00:00".to_string())
    );
    assert!(actor.forked_at.is_none());
}

#[test]
fn test_normalize_handles_missing_organizations() {
    let edge: WatcherEdge =
        serde_json::from_value(json!({ "node": { "login": "bob" } })).unwrap();

    let actor = normalize_watcher(edge);

    assert!(actor.organizations.is_empty());
    assert_eq!(actor.organizations_total_count, 0);
}

#[tokio::test]
async fn test_classify_user_and_organization() {
    let client = ScriptedClient::new()
        .respond(
            queries::OWNER_TYPE,
            json!({ "repositoryOwner": { "__typename": "User" } }),
        )
        .respond(
            queries::OWNER_TYPE,
            json!({ "repositoryOwner": { "__typename": "Organization" } }),
        );

    assert_eq!(classify(&client, "alice").await.unwrap(), OwnerKind::User);
    assert_eq!(
        classify(&client, "openco").await.unwrap(),
        OwnerKind::Organization
    );
}

#[tokio::test]
async fn test_classify_unresolvable_login_is_shape_error() {
    let client =
        ScriptedClient::new().respond(queries::OWNER_TYPE, json!({ "repositoryOwner": null }));

    let result = classify(&client, "ghost").await;

    assert!(matches!(result, Err(Error::Shape(_))));
}

#[tokio::test]
async fn test_fetch_user_profile_normalizes() {
    let client = ScriptedClient::new().respond(
        queries::USER_PROFILE,
        json!({ "user": user_with_orgs() }),
    );

    let actor = fetch_user_profile(&client, "alice").await.unwrap();

    assert_eq!(actor.login, "alice");
    assert_eq!(actor.organizations.len(), 2);
    assert!(!actor.is_organization);
}

#[tokio::test]
async fn test_fetch_org_profile_synthesizes_self_membership() {
    let client = ScriptedClient::new().respond(
        queries::ORG_PROFILE,
        json!({
            "organization": {
                "login": "widgetco",
                "name": "WidgetCo",
                "description": "Widgets",
                "websiteUrl": "https://widgetco.example",
                "url": "https://github.com/widgetco"
            }
        }),
    );

    let actor = fetch_org_profile(&client, "widgetco").await.unwrap();

    assert!(actor.is_organization);
    assert_eq!(actor.login, "widgetco");
    assert_eq!(actor.organizations.len(), 1);
    assert_eq!(actor.organizations[0].login, "widgetco");
    assert_eq!(actor.organizations_total_count, 1);
}

#[tokio::test]
async fn test_resolve_fork_owner_org_path() {
    let client = ScriptedClient::new()
        .respond(
            queries::OWNER_TYPE,
            json!({ "repositoryOwner": { "__typename": "Organization" } }),
        )
        .respond(
            queries::ORG_PROFILE,
            json!({ "organization": { "login": "widgetco" } }),
        );

    let forked_at = "2021-06-01T00:00:00Z".parse().unwrap();
    let actor = resolve_fork_owner(&client, "widgetco", forked_at, Duration::ZERO)
        .await
        .unwrap();

    assert!(actor.is_organization);
    assert_eq!(actor.forked_at, Some(forked_at));
}

#[tokio::test]
async fn test_resolve_fork_owner_user_path() {
    let client = ScriptedClient::new()
        .respond(
            queries::OWNER_TYPE,
            json!({ "repositoryOwner": { "__typename": "User" } }),
        )
        .respond(queries::USER_PROFILE, json!({ "user": user_with_orgs() }));

    let forked_at = "2021-06-01T00:00:00Z".parse().unwrap();
    let actor = resolve_fork_owner(&client, "alice", forked_at, Duration::ZERO)
        .await
        .unwrap();

    assert!(!actor.is_organization);
    assert_eq!(actor.forked_at, Some(forked_at));
    assert_eq!(actor.organizations.len(), 2);
}
