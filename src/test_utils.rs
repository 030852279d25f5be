//! Test utilities for jobscout.
//!
//! A canned [`SearchTransport`] that records every request, and helpers for
//! building a [`JobBoard`] over an in-memory database. Used by unit tests and
//! by the integration tests under `tests/`.

use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::board::JobBoard;
use crate::core::config_manager::SearchConfig;
use crate::core::Database;
use crate::job_search::{Endpoint, QueryParams, SearchClient, SearchTransport};

/// Key under which account responses are registered
pub const ACCOUNT_KEY: &str = "account";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    pub params: Vec<(String, String)>,
}

impl RecordedCall {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Shared view of the calls a [`StubTransport`] has received
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<RecordedCall>>>);

impl CallLog {
    pub fn snapshot(&self) -> Vec<RecordedCall> {
        self.0.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: RecordedCall) {
        if let Ok(mut calls) = self.0.lock() {
            calls.push(call);
        }
    }
}

/// Serves registered JSON bodies keyed by `engine` (or [`ACCOUNT_KEY`]).
/// Requests with no registered body fail like an unreachable provider.
#[derive(Default)]
pub struct StubTransport {
    responses: HashMap<String, Value>,
    calls: CallLog,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, key: &str, body: Value) -> Self {
        self.responses.insert(key.to_string(), body);
        self
    }

    pub fn call_log(&self) -> CallLog {
        self.calls.clone()
    }
}

#[rocket::async_trait]
impl SearchTransport for StubTransport {
    async fn get_json(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Value> {
        let call = RecordedCall {
            endpoint,
            params: params
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        };

        let key = match endpoint {
            Endpoint::Account => ACCOUNT_KEY.to_string(),
            Endpoint::Search => call.param("engine").unwrap_or_default().to_string(),
        };
        self.calls.record(call);

        match self.responses.get(&key) {
            Some(body) => Ok(body.clone()),
            None => anyhow::bail!("provider unreachable (no stub response for {})", key),
        }
    }
}

pub fn search_config() -> SearchConfig {
    SearchConfig {
        api_key: "test-key".to_string(),
        ..SearchConfig::default()
    }
}

/// A board over `transport` and a fresh in-memory database
pub async fn memory_board(transport: StubTransport) -> Result<JobBoard> {
    let database = Database::connect("sqlite::memory:").await?;
    let client = SearchClient::with_transport(&search_config(), transport);
    Ok(JobBoard::new(client, database))
}
