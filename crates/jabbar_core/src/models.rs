//! Data models for the jabbar core engine.
//!
//! Two families live here: the raw GraphQL page shapes the paginator
//! deserializes (camelCase, mirroring the wire format), and the normalized
//! [`Actor`] record that the aggregation and reporting stages work with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::Error;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Identifies a repository by its `owner/name` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    owner: String,
    name: String,
}

impl RepoId {
    /// Parses an `owner/name` string into a `RepoId`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` unless the input is exactly two non-empty
    /// segments separated by a single `/`.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let mut parts = input.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(Error::Validation(format!(
                "repository must be given as 'owner/name', got '{}'",
                input
            ))),
        }
    }

    /// The repository owner (user or organization login).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name, without the owner.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Pagination state reported alongside every page of a collection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether another page can be fetched after this one.
    pub has_next_page: bool,
    /// Opaque token identifying the end of this page.
    pub end_cursor: Option<String>,
}

/// One page of a paginated collection: edges plus pagination state.
///
/// Pages are ephemeral; only the accumulated edge sequence outlives the
/// pagination loop.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<E> {
    /// Total size of the collection, when the query requested it.
    #[serde(default)]
    pub total_count: Option<u64>,
    pub edges: Vec<E>,
    #[serde(default)]
    pub page_info: PageInfo,
}

/// A public organization membership as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgMembership {
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

/// Edge wrapper for an organization membership.
#[derive(Debug, Clone, Deserialize)]
pub struct OrgEdge {
    pub node: OrgMembership,
}

/// Raw user payload shared by the watcher and stargazer collections.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNode {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub organizations: Option<Connection<OrgEdge>>,
}

/// One entry in the watcher collection.
#[derive(Debug, Clone, Deserialize)]
pub struct WatcherEdge {
    pub node: UserNode,
}

/// One entry in the stargazer collection; the star timestamp sits on the
/// edge, not the node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StargazerEdge {
    pub starred_at: DateTime<Utc>,
    pub node: UserNode,
}

/// One entry in the fork collection. Only the fork creation time and the
/// owning login are available here; the owner's profile is resolved with a
/// secondary lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct ForkEdge {
    pub node: ForkNode,
}

/// Raw fork payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForkNode {
    pub created_at: DateTime<Utc>,
    pub owner: ForkOwner,
}

/// The entity that created a fork; may be a user or an organization.
#[derive(Debug, Clone, Deserialize)]
pub struct ForkOwner {
    pub login: String,
}

/// The normalized unit of identity: an individual or organization that has
/// watched, starred, or forked the target repository.
///
/// `login` is the dedup key; it is unique (case-insensitively) within any
/// merged collection. `starred_at` and `forked_at` are present only when the
/// actor is known via the corresponding source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// True when the actor is itself an organization (forkers only).
    #[serde(default)]
    pub is_organization: bool,
    /// Public organization memberships, at most one page of 100.
    #[serde(default)]
    pub organizations: Vec<OrgMembership>,
    /// Total public org count; may exceed `organizations.len()` when the
    /// nested collection was truncated at one page.
    #[serde(default)]
    pub organizations_total_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starred_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forked_at: Option<DateTime<Utc>>,
}

impl Actor {
    /// A minimal record for a fork owner whose profile lookup failed: just
    /// the login and the fork timestamp, no enrichment.
    pub fn bare(login: String, forked_at: DateTime<Utc>) -> Self {
        Self {
            login,
            forked_at: Some(forked_at),
            ..Self::default()
        }
    }
}
