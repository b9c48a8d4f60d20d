use std::io;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the jabbar CLI application.
///
/// The display strings are the user-visible messages, so they keep the three
/// failure families apart: invalid input, authentication problems, and
/// fetch/engine failures.
#[derive(Error, Debug)]
pub enum Error {
    /// Authentication error while constructing the GitHub client.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A failure inside the core engine (transport, response shape,
    /// validation, or cancellation).
    #[error("{0}")]
    Core(#[from] jabbar_core::Error),

    /// Failed to write the report to the requested output file.
    #[error("Failed to write output file: {0}")]
    Io(io::Error),

    /// Failed to serialize the actor records as JSON.
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// No token was found in the `GITHUB_TOKEN` environment variable.
    ///
    /// Surfaced before any network activity; the token needs the `read:org`
    /// and `user:email` scopes to resolve organization memberships.
    #[error(
        "A token is needed to access the GitHub API. \
         Please provide one with the GITHUB_TOKEN environment variable."
    )]
    MissingToken,
}
