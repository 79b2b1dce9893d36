//! Mock fetcher for testing.

use std::sync::Mutex;

use super::fetch::{FetchError, Fetcher};

/// Canned reply for URLs matching a rule.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 200 with this body.
    Body(String),
    /// Non-2xx status.
    Status(u16),
    /// Simulated client timeout.
    Timeout,
    /// Simulated connection failure.
    Transport(String),
}

/// Fetcher that answers from a list of URL-substring rules and records
/// every URL it was asked for.
///
/// Rules are checked in insertion order; the first whose pattern occurs in
/// the URL wins. Unmatched URLs get the fallback (404 unless changed).
pub struct MockFetcher {
    rules: Vec<(String, MockResponse)>,
    fallback: MockResponse,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    /// Create a mock with no rules.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: MockResponse::Status(404),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer URLs containing `pattern` with `response`.
    pub fn on(mut self, pattern: impl Into<String>, response: MockResponse) -> Self {
        self.rules.push((pattern.into(), response));
        self
    }

    /// Answer URLs containing `pattern` with a 200 page.
    pub fn with_body(self, pattern: impl Into<String>, body: impl Into<String>) -> Self {
        self.on(pattern, MockResponse::Body(body.into()))
    }

    /// Reply used when no rule matches.
    pub fn with_fallback(mut self, response: MockResponse) -> Self {
        self.fallback = response;
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for MockFetcher {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }

        let response = self
            .rules
            .iter()
            .find(|(pattern, _)| url.contains(pattern.as_str()))
            .map(|(_, response)| response)
            .unwrap_or(&self.fallback);

        match response {
            MockResponse::Body(body) => Ok(body.clone()),
            MockResponse::Status(status) => Err(FetchError::Status {
                status: *status,
                url: url.to_string(),
            }),
            MockResponse::Timeout => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
            MockResponse::Transport(message) => Err(FetchError::Transport(message.clone())),
        }
    }
}
