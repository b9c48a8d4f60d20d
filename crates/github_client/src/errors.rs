//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when talking to the
//! GitHub GraphQL API through the github_client crate. It provides enough
//! context for callers to distinguish "could not reach the API" from
//! "the API answered, but rejected or mangled the request".

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// This enum represents all possible error conditions when working with the
/// GitHub GraphQL endpoint, including authentication failures, transport
/// errors, rate limiting, and malformed responses.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.execute(query, variables).await {
///     Ok(data) => println!("Got data: {}", data),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded, retry later"),
///     Err(Error::AuthError(msg)) => eprintln!("Authentication failed: {}", msg),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic API request failure.
    ///
    /// This error occurs when a GitHub API request fails for reasons that are
    /// not authentication or rate limiting, such as network failures or
    /// server-side errors.
    #[error("API request failed")]
    ApiError(),

    /// Authentication failure or GitHub client initialization failure.
    ///
    /// This error occurs when:
    /// - The supplied token is invalid, expired, or lacks required scopes
    /// - The client could not be constructed with the given credentials
    ///
    /// The contained string provides specific details about the failure.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The GraphQL layer accepted the request but returned errors.
    ///
    /// GitHub answers GraphQL-level problems (unknown fields, missing
    /// resources, insufficient scopes) with HTTP 200 and an `errors` array;
    /// this variant carries the first reported message.
    #[error("GraphQL query failed: {0}")]
    Graphql(String),

    /// The GitHub API returned a response in an unexpected format.
    ///
    /// The response was transported and parsed, but the expected structure
    /// (the `data` envelope) was not present.
    #[error("Invalid response format")]
    InvalidResponse,

    /// GitHub API rate limit has been exceeded.
    ///
    /// Callers should back off and retry later. The paginator's courtesy
    /// delay exists to make this error unlikely in the first place.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
