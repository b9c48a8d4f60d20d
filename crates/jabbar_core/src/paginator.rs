//! Cursor-based pagination over one repository collection.
//!
//! The loop is strictly serial: request, courtesy delay, next request. It is
//! iterative rather than recursive, and a seen-cursor guard aborts if the
//! remote ever hands back a stale `endCursor`, so a misbehaving API cannot
//! loop the engine forever.

use std::collections::HashSet;
use std::time::Duration;

use github_client::GraphqlClient;
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

use crate::errors::Error;
use crate::models::{Connection, RepoId};
use crate::queries;

#[cfg(test)]
#[path = "paginator_tests.rs"]
mod tests;

/// The default pause between successive page fetches.
pub const DEFAULT_COURTESY_DELAY: Duration = Duration::from_secs(1);

/// The three top-level collections the engine paginates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Watchers,
    Stargazers,
    Forks,
}

impl Source {
    /// The field under `repository` that holds this collection.
    pub fn field(&self) -> &'static str {
        match self {
            Source::Watchers => "watchers",
            Source::Stargazers => "stargazers",
            Source::Forks => "forks",
        }
    }

    /// The query document that fetches one page of this collection.
    pub fn query(&self) -> &'static str {
        match self {
            Source::Watchers => queries::WATCHERS,
            Source::Stargazers => queries::STARGAZERS,
            Source::Forks => queries::FORKS,
        }
    }
}

/// Tunable knobs for a pagination run.
#[derive(Debug, Clone)]
pub struct PaginateOptions {
    /// Edges requested per page (the API caps this at 100).
    pub page_size: u32,
    /// Pause between consecutive requests, to stay polite with the shared
    /// rate-limit budget.
    pub delay: Duration,
    /// Paginate the independent top-level sources concurrently. Each source
    /// still advances its own cursor strictly serially.
    pub concurrent: bool,
    /// Overall deadline for the run, enforced by the caller.
    pub timeout: Option<Duration>,
}

impl Default for PaginateOptions {
    fn default() -> Self {
        Self {
            page_size: 100,
            delay: DEFAULT_COURTESY_DELAY,
            concurrent: false,
            timeout: None,
        }
    }
}

/// Drives one collection to exhaustion and returns every edge, in response
/// order (an approximation of recency, e.g. star order).
///
/// All-or-nothing: if any page fetch fails, the partial accumulation is
/// discarded and the error is returned.
///
/// # Errors
///
/// * `Error::Transport` when a request fails at the client level.
/// * `Error::Shape` when a page is missing the expected collection shape,
///   claims a next page without a cursor, or repeats a cursor.
#[instrument(skip(client, options), fields(source = source.field(), repo = %repo))]
pub async fn paginate<E>(
    client: &dyn GraphqlClient,
    source: Source,
    repo: &RepoId,
    options: &PaginateOptions,
) -> Result<Vec<E>, Error>
where
    E: DeserializeOwned,
{
    let mut edges: Vec<E> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut seen_cursors: HashSet<String> = HashSet::new();
    let mut page = 1u32;

    loop {
        let variables = json!({
            "owner": repo.owner(),
            "name": repo.name(),
            "count": options.page_size,
            "after": cursor,
        });

        let data = client.execute(source.query(), variables).await?;

        let connection = data
            .get("repository")
            .and_then(|repository| repository.get(source.field()))
            .cloned()
            .ok_or_else(|| {
                Error::Shape(format!(
                    "response is missing repository.{}",
                    source.field()
                ))
            })?;
        let connection: Connection<E> = serde_json::from_value(connection).map_err(|e| {
            Error::Shape(format!("unexpected {} page shape: {}", source.field(), e))
        })?;

        let count = connection.edges.len();
        edges.extend(connection.edges);
        debug!(
            page,
            count,
            accumulated = edges.len(),
            total = connection.total_count,
            "Fetched page"
        );

        if !connection.page_info.has_next_page {
            break;
        }

        let next = connection.page_info.end_cursor.ok_or_else(|| {
            Error::Shape(format!(
                "{} page {} claims a next page but has no end cursor",
                source.field(),
                page
            ))
        })?;
        if !seen_cursors.insert(next.clone()) {
            return Err(Error::Shape(format!(
                "{} returned cursor '{}' twice; aborting pagination",
                source.field(),
                next
            )));
        }
        cursor = Some(next);
        page += 1;

        sleep(options.delay).await;
    }

    info!(total = edges.len(), pages = page, "Pagination complete");
    Ok(edges)
}
