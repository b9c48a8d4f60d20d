//! The report command: collect, merge, and render one repository's
//! social-proof signals.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use github_client::{create_token_client, GitHubClient, GraphqlClient};
use jabbar_core::{
    fetch_all, fetch_forkers, fetch_stargazers, fetch_watchers, merge, synthesize, Collected,
    IgnoreSet, PaginateOptions, RepoId,
};
use tracing::{info, instrument, warn};

use crate::errors::Error;
use crate::render;

#[cfg(test)]
#[path = "report_cmd_tests.rs"]
mod tests;

/// Which collection(s) to report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Watchers,
    Stargazers,
    Forkers,
    All,
}

/// Arguments shared by every report subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Repository to report on, in owner/name form
    #[arg(long, short = 'r')]
    pub repo: Option<String>,

    /// Comma-separated logins to leave out of the report
    #[arg(long, short = 'i')]
    pub ignore: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Emit the merged actor records as JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Pause between consecutive API requests, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Paginate the watcher, stargazer, and forker collections concurrently
    #[arg(long)]
    pub concurrent: bool,

    /// Abort the whole run after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl ReportArgs {
    fn paginate_options(&self) -> PaginateOptions {
        PaginateOptions {
            delay: Duration::from_millis(self.delay_ms),
            concurrent: self.concurrent,
            timeout: self.timeout_secs.map(Duration::from_secs),
            ..PaginateOptions::default()
        }
    }
}

/// Executes a report subcommand end to end.
///
/// # Errors
///
/// Returns an error when the token is missing, the repository identifier is
/// malformed, any required collection fetch fails, or the output cannot be
/// written. All validation happens before the first network request.
#[instrument(skip(args))]
pub async fn execute(action: Action, args: &ReportArgs) -> Result<(), Error> {
    let token = env::var("GITHUB_TOKEN").map_err(|_| Error::MissingToken)?;
    let repo = args.repo.as_deref().ok_or_else(|| {
        Error::Core(jabbar_core::Error::Validation(
            "no repository specified; use --repo owner/name".to_string(),
        ))
    })?;
    let repo = RepoId::parse(repo)?;
    let ignore = IgnoreSet::new(repo.owner(), args.ignore.as_deref());

    let octocrab = create_token_client(&token).map_err(|e| Error::Auth(e.to_string()))?;
    let client = GitHubClient::new(octocrab);
    let options = args.paginate_options();

    info!(repo = %repo, ?action, "Collecting repository data");
    let collected = collect(&client, action, &repo, &options).await?;

    if collected.enrichment_failures > 0 {
        warn!(
            failures = collected.enrichment_failures,
            "Some records could not be enriched"
        );
        eprintln!(
            "partial data returned, {} records enrichment failed",
            collected.enrichment_failures
        );
    }

    let merged = merge(
        collected.watchers,
        collected.stargazers,
        collected.forkers,
        &ignore,
    );

    let rendered = if args.json {
        serde_json::to_string_pretty(&merged)?
    } else {
        let report = synthesize(&merged, &ignore);
        render::render_text(&repo, &report)
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered).map_err(Error::Io)?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Fetches the collections the action asks for, honoring the optional
/// overall deadline. On expiry the in-flight futures are dropped, partial
/// accumulations with them.
async fn collect(
    client: &dyn GraphqlClient,
    action: Action,
    repo: &RepoId,
    options: &PaginateOptions,
) -> Result<Collected, Error> {
    let work = async {
        match action {
            Action::Watchers => Ok(Collected {
                watchers: fetch_watchers(client, repo, options).await?,
                ..Collected::default()
            }),
            Action::Stargazers => Ok(Collected {
                stargazers: fetch_stargazers(client, repo, options).await?,
                ..Collected::default()
            }),
            Action::Forkers => {
                let outcome = fetch_forkers(client, repo, options).await?;
                Ok(Collected {
                    forkers: outcome.actors,
                    enrichment_failures: outcome.enrichment_failures,
                    ..Collected::default()
                })
            }
            Action::All => fetch_all(client, repo, options).await,
        }
    };

    let result = match options.timeout {
        Some(limit) => tokio::time::timeout(limit, work)
            .await
            .map_err(|_| jabbar_core::Error::Cancelled)?,
        None => work.await,
    };
    result.map_err(Error::from)
}
