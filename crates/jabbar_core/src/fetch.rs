//! Per-source fetch orchestration.
//!
//! Each source is paginated on its own strictly serial cursor chain. The
//! three sources are independent and may run concurrently when the caller
//! opts in; a failed source is fatal to the invocation that needed it, and
//! partial accumulations are discarded with the failing future.

use std::collections::HashSet;

use github_client::GraphqlClient;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

use crate::errors::Error;
use crate::models::{Actor, ForkEdge, RepoId, StargazerEdge, WatcherEdge};
use crate::normalize::{normalize_stargazer, normalize_watcher, resolve_fork_owner};
use crate::paginator::{paginate, PaginateOptions, Source};

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;

/// The forker collection plus a count of entries whose secondary owner
/// lookup failed and were degraded to bare records.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub actors: Vec<Actor>,
    pub enrichment_failures: usize,
}

/// Everything collected for one invocation.
#[derive(Debug, Default)]
pub struct Collected {
    pub watchers: Vec<Actor>,
    pub stargazers: Vec<Actor>,
    pub forkers: Vec<Actor>,
    pub enrichment_failures: usize,
}

/// Fetches and normalizes the full watcher collection.
#[instrument(skip(client, options), fields(repo = %repo))]
pub async fn fetch_watchers(
    client: &dyn GraphqlClient,
    repo: &RepoId,
    options: &PaginateOptions,
) -> Result<Vec<Actor>, Error> {
    let edges: Vec<WatcherEdge> = paginate(client, Source::Watchers, repo, options).await?;
    Ok(edges.into_iter().map(normalize_watcher).collect())
}

/// Fetches and normalizes the full stargazer collection.
#[instrument(skip(client, options), fields(repo = %repo))]
pub async fn fetch_stargazers(
    client: &dyn GraphqlClient,
    repo: &RepoId,
    options: &PaginateOptions,
) -> Result<Vec<Actor>, Error> {
    let edges: Vec<StargazerEdge> = paginate(client, Source::Stargazers, repo, options).await?;
    Ok(edges.into_iter().map(normalize_stargazer).collect())
}

/// Fetches the fork collection and resolves each distinct owner.
///
/// Owner lookups are isolated per entry: a failed classification or profile
/// fetch degrades that one record to a bare login and is counted in
/// [`FetchOutcome::enrichment_failures`]; it never aborts the batch. Owners
/// appearing through several forks are resolved once, keeping the earliest
/// fork's timestamp.
#[instrument(skip(client, options), fields(repo = %repo))]
pub async fn fetch_forkers(
    client: &dyn GraphqlClient,
    repo: &RepoId,
    options: &PaginateOptions,
) -> Result<FetchOutcome, Error> {
    let edges: Vec<ForkEdge> = paginate(client, Source::Forks, repo, options).await?;

    let mut outcome = FetchOutcome::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut first = true;

    for edge in edges {
        let login = edge.node.owner.login;
        if !seen.insert(login.to_lowercase()) {
            continue;
        }
        if !first {
            sleep(options.delay).await;
        }
        first = false;

        match resolve_fork_owner(client, &login, edge.node.created_at, options.delay).await {
            Ok(actor) => outcome.actors.push(actor),
            Err(e) => {
                warn!(login = %login, error = %e, "Fork owner lookup failed; keeping bare record");
                outcome.enrichment_failures += 1;
                outcome.actors.push(Actor::bare(login, edge.node.created_at));
            }
        }
    }

    if outcome.enrichment_failures > 0 {
        info!(
            failures = outcome.enrichment_failures,
            resolved = outcome.actors.len(),
            "Some fork owners could not be enriched"
        );
    }
    Ok(outcome)
}

/// Fetches all three sources, serially by default or concurrently when
/// `options.concurrent` is set. Concurrency is across sources only; each
/// source keeps its own serial cursor chain.
#[instrument(skip(client, options), fields(repo = %repo, concurrent = options.concurrent))]
pub async fn fetch_all(
    client: &dyn GraphqlClient,
    repo: &RepoId,
    options: &PaginateOptions,
) -> Result<Collected, Error> {
    let (watchers, stargazers, forkers) = if options.concurrent {
        tokio::try_join!(
            fetch_watchers(client, repo, options),
            fetch_stargazers(client, repo, options),
            fetch_forkers(client, repo, options),
        )?
    } else {
        let watchers = fetch_watchers(client, repo, options).await?;
        let stargazers = fetch_stargazers(client, repo, options).await?;
        let forkers = fetch_forkers(client, repo, options).await?;
        (watchers, stargazers, forkers)
    };

    Ok(Collected {
        watchers,
        stargazers,
        forkers: forkers.actors,
        enrichment_failures: forkers.enrichment_failures,
    })
}
