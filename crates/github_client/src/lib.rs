//! Crate for interacting with the GitHub GraphQL API.
//!
//! This crate provides a thin client for making authenticated GraphQL
//! requests to GitHub with a personal access token. The query documents and
//! cursor tokens are opaque to this crate; callers own the schema shapes.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::{json, Value};
use tracing::{debug, error, instrument};

pub mod errors;
pub use errors::Error;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// A client that can execute a GraphQL query document against a remote API.
///
/// This is the seam between the pagination engine and the network: the
/// engine only ever calls [`execute`](GraphqlClient::execute), so tests can
/// substitute a scripted implementation and never touch the wire.
#[async_trait]
pub trait GraphqlClient: Send + Sync {
    /// Executes a single GraphQL request.
    ///
    /// # Arguments
    ///
    /// * `query` - The query document. Treated as an opaque string.
    /// * `variables` - A flat mapping of named variables for the document.
    ///
    /// # Returns
    ///
    /// The `data` portion of the GraphQL response on success.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the request could not be transported, was
    /// rejected (authentication, rate limit), carried a GraphQL `errors`
    /// array, or did not contain a `data` envelope.
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, Error>;
}

/// A client for the GitHub GraphQL API, authenticated with a personal token.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` wrapping an existing `Octocrab` instance.
    ///
    /// The instance is expected to carry credentials already; see
    /// [`create_token_client`].
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GraphqlClient for GitHubClient {
    #[instrument(skip(self, query, variables))]
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, Error> {
        let payload = json!({
            "query": query,
            "variables": variables,
        });

        debug!("Sending GraphQL request");
        let response: Value = self.client.graphql(&payload).await.map_err(|e| {
            let mapped = classify_octocrab_error(&e);
            log_octocrab_error("GraphQL request failed", e);
            mapped
        })?;

        // GitHub reports schema-level failures with HTTP 200 and an `errors`
        // array; surface the first message rather than returning bad data.
        if let Some(errors) = response.get("errors").and_then(Value::as_array) {
            let message = errors
                .first()
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("unknown GraphQL error")
                .to_string();
            error!(message = %message, "GraphQL query returned errors");
            return Err(Error::Graphql(message));
        }

        match response.get("data") {
            Some(data) if !data.is_null() => Ok(data.clone()),
            _ => {
                error!("GraphQL response did not contain a data envelope");
                Err(Error::InvalidResponse)
            }
        }
    }
}

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Errors
///
/// Returns an `Error::AuthError` if the client cannot be built with the
/// given token.
#[instrument(skip(token))]
pub fn create_token_client(token: &str) -> Result<Octocrab, Error> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .map_err(|e| Error::AuthError(format!("Failed to build GitHub client: {}", e)))
}

/// Maps an octocrab error to the crate's typed taxonomy.
///
/// GitHub-reported failures carry a message; rate limiting and bad
/// credentials are recognized from it so callers can react differently.
fn classify_octocrab_error(e: &octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let message = source.message.to_lowercase();
            if message.contains("rate limit") {
                Error::RateLimitExceeded
            } else if message.contains("bad credentials") || message.contains("401") {
                Error::AuthError(source.message.clone())
            } else {
                Error::ApiError()
            }
        }
        _ => Error::ApiError(),
    }
}

fn log_octocrab_error(message: &str, e: octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let err = source;
            error!(
                error_message = err.message,
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            )
        }
        octocrab::Error::UriParse { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}, Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidHeaderValue { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. One of the header values was invalid.",
            message
        ),
        octocrab::Error::InvalidUtf8 { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. The message wasn't valid UTF-8.",
            message,
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
