//! Recording HTTP double.
//!
//! Canned replies are keyed by URL; every call is recorded so tests can
//! inspect what the agent client actually sent.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// One call seen by [`MockHttpClient`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Headers,
    /// Only POST carries a body
    pub body: Option<String>,
}

impl RecordedRequest {
    pub fn json_body(&self) -> Option<serde_json::Value> {
        serde_json::from_str(self.body.as_deref()?).ok()
    }
}

/// What a canned route hands back.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// A response with any status
    Success(Response),
    /// A failure before any response, such as a refused connection
    Error(HttpError),
}

#[derive(Debug, Default)]
struct MockState {
    routes: HashMap<String, VecDeque<MockResponse>>,
    fallback: Option<MockResponse>,
    log: Vec<RecordedRequest>,
}

/// [`HttpClient`] that replays canned responses.
///
/// Routes match the full URL, otherwise the fallback answers. A route with
/// several queued replies hands them out in order and keeps repeating the
/// last one. Clones share state, so a test can keep
/// one handle while the client under test owns another.
///
/// ```ignore
/// let http = MockHttpClient::new();
/// http.set_response(
///     "http://agent.test/api/chat",
///     MockResponse::Success(Response::json_body(
///         200,
///         &json!({"thread_id": "t1", "response": "3"}),
///     )),
/// );
/// let client = AgentClient::new("http://agent.test", Arc::new(http.clone()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the recordings from others.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace whatever `url` had with a single response.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.state()
            .routes
            .insert(url.to_string(), VecDeque::from([response]));
    }

    /// Append a response to `url`'s queue.
    pub fn queue_response(&self, url: &str, response: MockResponse) {
        self.state()
            .routes
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    /// Response for URLs no route matches.
    pub fn set_default_response(&self, response: MockResponse) {
        self.state().fallback = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.state().log.clone()
    }

    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.state()
            .log
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }

    fn next_from(queue: &mut VecDeque<MockResponse>) -> Option<MockResponse> {
        match queue.len() {
            0 | 1 => queue.front().cloned(),
            _ => queue.pop_front(),
        }
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let mut state = self.state();
        match state.routes.get_mut(url) {
            Some(queue) => Self::next_from(queue),
            None => state.fallback.clone(),
        }
    }

    fn handle(
        &self,
        method: &'static str,
        url: &str,
        headers: &Headers,
        body: Option<&str>,
    ) -> Result<Response, HttpError> {
        self.state().log.push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers.clone(),
            body: body.map(str::to_string),
        });

        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "no mock route for {} {}",
                method, url
            ))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.handle("GET", url, headers, None)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.handle("POST", url, headers, Some(body))
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.handle("DELETE", url, headers, None)
    }
}
