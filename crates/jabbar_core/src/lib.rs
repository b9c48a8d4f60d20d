//! Core engine for jabbar: pagination, normalization, and aggregation of
//! social-proof signals (watchers, stargazers, forkers) for a GitHub
//! repository.
//!
//! The crate is organized around one data flow: the [`paginator`] drives the
//! GraphQL API to exhaustion one cursor at a time, [`normalize`] converts raw
//! edges into [`models::Actor`] records, [`aggregate`] merges the three
//! sources into one deduplicated collection, and [`report`] computes the
//! derived views (affiliation partitions and popular organizations) that the
//! CLI renders. All network access goes through the
//! [`github_client::GraphqlClient`] seam, so every stage is testable with a
//! scripted client.

pub mod aggregate;
pub mod errors;
pub mod fetch;
pub mod models;
pub mod normalize;
pub mod paginator;
pub mod queries;
pub mod report;

pub use aggregate::{merge, IgnoreSet};
pub use errors::Error;
pub use fetch::{fetch_all, fetch_forkers, fetch_stargazers, fetch_watchers, Collected, FetchOutcome};
pub use models::{Actor, OrgMembership, RepoId};
pub use paginator::{paginate, PaginateOptions, Source};
pub use report::{synthesize, OrgAggregate, Report};

#[cfg(test)]
pub(crate) mod test_support;
