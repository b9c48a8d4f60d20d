//! Scripted [`GraphqlClient`] implementation for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use github_client::{Error as ClientError, GraphqlClient};
use serde_json::Value;

/// A client that answers each query document from a pre-loaded queue.
///
/// Responses are keyed by the query string, so concurrent sources each
/// consume their own queue in order. Every call is recorded for assertions
/// on the variables sent.
#[derive(Default)]
pub(crate) struct ScriptedClient {
    responses: Mutex<HashMap<String, VecDeque<Result<Value, ClientError>>>>,
    pub calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful `data` payload for the given query document.
    pub fn respond(self, query: &str, data: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(query.to_string())
            .or_default()
            .push_back(Ok(data));
        self
    }

    /// Queues a failure for the given query document.
    pub fn fail(self, query: &str, error: ClientError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(query.to_string())
            .or_default()
            .push_back(Err(error));
        self
    }

    /// Variables of every call made against the given query, in order.
    pub fn variables_for(&self, query: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(q, _)| q == query)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

#[async_trait]
impl GraphqlClient for ScriptedClient {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), variables));
        self.responses
            .lock()
            .unwrap()
            .get_mut(query)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("no scripted response left for query: {}", query))
    }
}
