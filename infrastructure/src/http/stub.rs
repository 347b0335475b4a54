//! Call-recording stub transport for tests
//!
//! Routes by URL substring, records every request, and can delay a response
//! to keep an acquisition in flight while concurrent callers pile up.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{HttpRequest, HttpResponse, HttpTransport, TransportError};

struct Rule {
    url_contains: String,
    responses: VecDeque<Result<HttpResponse, TransportError>>,
    delay: Option<Duration>,
}

/// Test double for [`HttpTransport`]
#[derive(Default)]
pub(crate) struct StubTransport {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to every request whose URL contains `url_contains`. Queued
    /// responses are consumed in order; the last one is sticky and repeats.
    pub fn respond(self, url_contains: &str, responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        self.rules.lock().unwrap().push(Rule {
            url_contains: url_contains.to_string(),
            responses: responses.into_iter().collect(),
            delay: None,
        });
        self
    }

    /// Shorthand for a single sticky JSON response
    pub fn respond_json(self, url_contains: &str, status: u16, body: &str) -> Self {
        self.respond(url_contains, vec![Ok(HttpResponse::new(status, body))])
    }

    /// Add a delay before the most recently added rule responds
    pub fn with_delay(self, duration: Duration) -> Self {
        if let Some(rule) = self.rules.lock().unwrap().last_mut() {
            rule.delay = Some(duration);
        }
        self
    }

    /// Total number of requests issued
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of requests whose URL contains the given fragment
    pub fn calls_to(&self, url_contains: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.contains(url_contains))
            .count()
    }

    /// All recorded requests to URLs containing the fragment
    pub fn requests_to(&self, url_contains: &str) -> Vec<HttpRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.contains(url_contains))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(request.clone());

        let (outcome, delay) = {
            let mut rules = self.rules.lock().unwrap();
            let rule = rules
                .iter_mut()
                .find(|r| request.url.contains(&r.url_contains))
                .unwrap_or_else(|| panic!("no stub rule for URL {}", request.url));

            let outcome = if rule.responses.len() > 1 {
                rule.responses.pop_front().unwrap()
            } else {
                rule.responses
                    .front()
                    .cloned()
                    .unwrap_or_else(|| panic!("stub rule for '{}' is empty", rule.url_contains))
            };
            (outcome, rule.delay)
        };

        if let Some(duration) = delay {
            tokio::time::sleep(duration).await;
        }

        outcome
    }
}
