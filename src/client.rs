//! Agent API client for backend communication.
//!
//! Wraps the three endpoints the letter counter backend exposes:
//! `POST /api/chat`, `DELETE /api/conversations/{thread_id}` and
//! `GET /api/health`. No retries happen here; callers decide what a failure
//! means.

use std::sync::Arc;

use tracing::debug;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::models::{ChatReply, ChatRequest, ChatResponse, HealthStatus};
use crate::traits::{Headers, HttpClient, Response};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Client for the agent backend.
#[derive(Clone)]
pub struct AgentClient {
    /// Base URL for the agent API, without a trailing slash
    pub base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for AgentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl AgentClient {
    /// Create a client on top of any [`HttpClient`].
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    /// Create a reqwest-backed client from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let http = ReqwestHttpClient::with_timeout(config.request_timeout)?;
        Ok(Self::new(config.base_url.clone(), Arc::new(http)))
    }

    fn json_headers() -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }

    fn ensure_success(response: &Response) -> Result<(), TransportError> {
        if response.is_success() {
            return Ok(());
        }
        let body = response.text().unwrap_or_default();
        Err(TransportError::server(response.status, body))
    }

    /// Send one user turn and wait for the agent's reply.
    pub async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = serde_json::to_string(request)
            .map_err(|e| TransportError::protocol(format!("could not encode request: {}", e)))?;

        debug!(
            "POST {} (thread_id={:?}, {} chars)",
            url,
            request.thread_id,
            request.message.len()
        );
        let response = self.http.post(&url, &body, &Self::json_headers()).await?;
        Self::ensure_success(&response)?;

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| TransportError::protocol(format!("invalid JSON in chat reply: {}", e)))?;
        parsed
            .into_reply()
            .ok_or_else(|| TransportError::protocol("chat reply has no `response` field"))
    }

    /// Ask the backend to forget a thread. The response body is ignored.
    pub async fn delete_thread(&self, thread_id: &str) -> Result<(), TransportError> {
        let url = format!(
            "{}/api/conversations/{}",
            self.base_url,
            urlencoding::encode(thread_id)
        );

        debug!("DELETE {}", url);
        let response = self.http.delete(&url, &Self::json_headers()).await?;
        Self::ensure_success(&response)
    }

    /// Check whether the backend is up.
    pub async fn health_check(&self) -> Result<HealthStatus, TransportError> {
        let url = format!("{}/api/health", self.base_url);

        let response = self.http.get(&url, &Self::json_headers()).await?;
        Self::ensure_success(&response)?;
        response
            .json()
            .map_err(|e| TransportError::protocol(format!("invalid health reply: {}", e)))
    }
}
