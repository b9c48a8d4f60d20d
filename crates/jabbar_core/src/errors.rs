//! Error types for the jabbar core engine.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while collecting and aggregating repository data.
///
/// The variants separate the failure modes that callers need to tell apart:
/// the API being unreachable or rejecting us, the API answering with a shape
/// the engine does not recognize, invalid caller input, and cancellation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be completed at the transport or protocol level.
    ///
    /// Wraps the client-side taxonomy (network failure, authentication
    /// rejection, rate limiting, GraphQL-level errors). Fatal to the source
    /// collection being paginated; partial pages are discarded.
    #[error("could not reach the GitHub API: {0}")]
    Transport(#[from] github_client::Error),

    /// A response arrived but did not contain the expected structure.
    ///
    /// Covers a missing collection or `pageInfo`, a page that fails typed
    /// deserialization, and a cursor that repeats across pages (which would
    /// otherwise loop forever).
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// Caller-supplied input failed a precondition check.
    ///
    /// Surfaced before any network activity and fatal to the invocation.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The run was cancelled by the caller-supplied deadline.
    ///
    /// In-flight collections are abandoned and their partial accumulations
    /// discarded.
    #[error("operation cancelled before completion")]
    Cancelled,
}
