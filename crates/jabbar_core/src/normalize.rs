//! Converts raw collection edges into normalized [`Actor`] records.
//!
//! Watcher and stargazer edges normalize purely: flatten the nested
//! organization edges and copy the sibling star timestamp when present. Fork
//! edges only carry a login, so the owner is resolved with secondary lookups
//! (classification, then a user or org profile fetch); each fork entry is
//! isolated so one failed lookup degrades that record instead of aborting
//! the batch.

use std::time::Duration;

use chrono::{DateTime, Utc};
use github_client::GraphqlClient;
use serde_json::{json, Value};
use tokio::time::sleep;
use tracing::instrument;

use crate::errors::Error;
use crate::models::{Actor, OrgMembership, StargazerEdge, UserNode, WatcherEdge};
use crate::queries;

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;

/// Whether a login belongs to a user or an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    User,
    Organization,
}

/// Normalizes one watcher edge. Pure.
pub fn normalize_watcher(edge: WatcherEdge) -> Actor {
    user_node_to_actor(edge.node, None)
}

/// Normalizes one stargazer edge, carrying the star timestamp. Pure.
pub fn normalize_stargazer(edge: StargazerEdge) -> Actor {
    user_node_to_actor(edge.node, Some(edge.starred_at))
}

fn user_node_to_actor(node: UserNode, starred_at: Option<DateTime<Utc>>) -> Actor {
    let (organizations, organizations_total_count) = match node.organizations {
        Some(connection) => (
            connection
                .edges
                .into_iter()
                .map(|edge| edge.node)
                .collect(),
            connection.total_count.unwrap_or(0),
        ),
        None => (Vec::new(), 0),
    };

    Actor {
        login: node.login,
        name: node.name,
        company: node.company,
        website_url: node.website_url,
        url: node.url,
        is_organization: false,
        organizations,
        organizations_total_count,
        starred_at,
        forked_at: None,
    }
}

/// Classifies a login as a user or an organization via a single lookup.
///
/// # Errors
///
/// Returns `Error::Shape` when the login does not resolve to any repository
/// owner (deleted account) or the response carries no type name.
#[instrument(skip(client))]
pub async fn classify(client: &dyn GraphqlClient, login: &str) -> Result<OwnerKind, Error> {
    let data = client
        .execute(queries::OWNER_TYPE, json!({ "login": login }))
        .await?;

    let typename = data
        .get("repositoryOwner")
        .and_then(|owner| owner.get("__typename"))
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Shape(format!("login '{}' did not resolve to an owner", login)))?;

    match typename {
        "Organization" => Ok(OwnerKind::Organization),
        _ => Ok(OwnerKind::User),
    }
}

/// Fetches a user's profile and public org memberships.
#[instrument(skip(client))]
pub async fn fetch_user_profile(client: &dyn GraphqlClient, login: &str) -> Result<Actor, Error> {
    let data = client
        .execute(queries::USER_PROFILE, json!({ "login": login }))
        .await?;

    let node = data
        .get("user")
        .filter(|user| !user.is_null())
        .cloned()
        .ok_or_else(|| Error::Shape(format!("no user profile for '{}'", login)))?;
    let node: UserNode = serde_json::from_value(node)
        .map_err(|e| Error::Shape(format!("unexpected user profile shape: {}", e)))?;

    Ok(user_node_to_actor(node, None))
}

/// Fetches an organization's profile.
///
/// The resulting actor is marked as an organization and lists itself as its
/// single org membership, so the reporting stage sees forking orgs the same
/// way it sees members of orgs.
#[instrument(skip(client))]
pub async fn fetch_org_profile(client: &dyn GraphqlClient, login: &str) -> Result<Actor, Error> {
    let data = client
        .execute(queries::ORG_PROFILE, json!({ "login": login }))
        .await?;

    let node = data
        .get("organization")
        .filter(|org| !org.is_null())
        .cloned()
        .ok_or_else(|| Error::Shape(format!("no organization profile for '{}'", login)))?;
    let membership: OrgMembership = serde_json::from_value(node.clone())
        .map_err(|e| Error::Shape(format!("unexpected organization profile shape: {}", e)))?;

    Ok(Actor {
        login: membership.login.clone(),
        name: membership.name.clone(),
        website_url: membership.website_url.clone(),
        url: node.get("url").and_then(Value::as_str).map(str::to_string),
        is_organization: true,
        organizations_total_count: 1,
        organizations: vec![membership],
        ..Actor::default()
    })
}

/// Resolves one fork owner into a full actor record.
///
/// Performs the classification lookup, pauses for the courtesy delay, then
/// fetches the matching profile. The fork timestamp is attached to the
/// result.
pub async fn resolve_fork_owner(
    client: &dyn GraphqlClient,
    login: &str,
    forked_at: DateTime<Utc>,
    delay: Duration,
) -> Result<Actor, Error> {
    let kind = classify(client, login).await?;
    sleep(delay).await;

    let mut actor = match kind {
        OwnerKind::User => fetch_user_profile(client, login).await?,
        OwnerKind::Organization => fetch_org_profile(client, login).await?,
    };
    actor.forked_at = Some(forked_at);
    Ok(actor)
}
