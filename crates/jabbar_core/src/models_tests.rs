//! Unit tests for the core data models.

use super::*;
use serde_json::json;

#[test]
fn test_repo_id_parses_owner_name() {
    let repo = RepoId::parse("acme/widget").unwrap();
    assert_eq!(repo.owner(), "acme");
    assert_eq!(repo.name(), "widget");
    assert_eq!(repo.to_string(), "acme/widget");
}

#[test]
fn test_repo_id_rejects_malformed_input() {
    for input in ["widget", "acme/widget/extra", "/widget", "acme/", "", "/"] {
        let result = RepoId::parse(input);
        assert!(
            matches!(result, Err(Error::Validation(_))),
            "expected validation error for '{}'",
            input
        );
    }
}

#[test]
fn test_repo_id_from_str() {
    let repo: RepoId = "rust-lang/rust".parse().unwrap();
    assert_eq!(repo.owner(), "rust-lang");
}

#[test]
fn test_connection_deserializes_wire_shape() {
    let value = json!({
        "totalCount": 2,
        "edges": [
            { "node": { "login": "alice" } },
            { "node": { "login": "bob" } }
        ],
        "pageInfo": { "hasNextPage": true, "endCursor": "abc" }
    });

    let connection: Connection<WatcherEdge> = serde_json::from_value(value).unwrap();
    assert_eq!(connection.total_count, Some(2));
    assert_eq!(connection.edges.len(), 2);
    assert_eq!(connection.edges[0].node.login, "alice");
    assert!(connection.page_info.has_next_page);
    assert_eq!(connection.page_info.end_cursor.as_deref(), Some("abc"));
}

#[test]
fn test_stargazer_edge_carries_sibling_timestamp() {
    let value = json!({
        "starredAt": "2020-01-02T03:04:05Z",
        "node": { "login": "alice" }
    });

    let edge: StargazerEdge = serde_json::from_value(value).unwrap();
    assert_eq!(edge.starred_at.to_rfc3339(), "2020-01-02T03:04:05+00:00");
    assert_eq!(edge.node.login, "alice");
}

#[test]
fn test_actor_serializes_camel_case_and_skips_absent_fields() {
    let actor = Actor {
        login: "alice".to_string(),
        is_organization: false,
        organizations_total_count: 3,
        ..Actor::default()
    };

    let value = serde_json::to_value(&actor).unwrap();
    assert_eq!(value["login"], "alice");
    assert_eq!(value["isOrganization"], false);
    assert_eq!(value["organizationsTotalCount"], 3);
    assert!(value.get("starredAt").is_none());
    assert!(value.get("forkedAt").is_none());
    assert!(value.get("company").is_none());
}

#[test]
fn test_bare_actor_has_only_login_and_fork_timestamp() {
    let forked_at = "2021-06-01T00:00:00Z".parse().unwrap();
    let actor = Actor::bare("ghost".to_string(), forked_at);

    assert_eq!(actor.login, "ghost");
    assert_eq!(actor.forked_at, Some(forked_at));
    assert!(actor.name.is_none());
    assert!(actor.organizations.is_empty());
    assert!(!actor.is_organization);
}
