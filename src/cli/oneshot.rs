//! Single exchange without the terminal UI.
//!
//! Drives the same state machine as the TUI, but runs the send effect inline.

use thiserror::Error;
use tracing::info;

use crate::client::AgentClient;
use crate::error::SubmitRejected;
use crate::state::{ConversationThread, Effect};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error(transparent)]
    Rejected(#[from] SubmitRejected),
    /// User-facing text of the failed send
    #[error("{0}")]
    Failed(String),
}

/// Ask one question and return the agent's reply.
pub async fn run_prompt(client: &AgentClient, text: &str) -> Result<String, PromptError> {
    let mut thread = ConversationThread::new();

    let Effect::SendMessage {
        generation,
        request,
    } = thread.submit(text)?
    else {
        return Err(PromptError::Failed("Failed to send message.".to_string()));
    };

    let result = client.send_message(&request).await;
    thread.complete_send(generation, result);

    if let Some(error) = thread.last_error() {
        return Err(PromptError::Failed(error.to_string()));
    }

    info!("One-shot reply on thread {:?}", thread.thread_id());
    thread
        .messages()
        .last()
        .map(|m| m.content.clone())
        .ok_or_else(|| PromptError::Failed("Failed to send message.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::traits::{HttpError, Response};
    use serde_json::json;
    use std::sync::Arc;

    fn client(http: &MockHttpClient) -> AgentClient {
        AgentClient::new("http://agent.test", Arc::new(http.clone()))
    }

    #[tokio::test]
    async fn test_prompt_returns_reply() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://agent.test/api/chat",
            MockResponse::Success(Response::json_body(
                200,
                &json!({"thread_id": "t1", "response": "There are 3 r's.", "messages": []}),
            )),
        );

        let reply = run_prompt(&client(&http), "How many r's in strawberry?")
            .await
            .unwrap();
        assert_eq!(reply, "There are 3 r's.");

        let body = http.get_requests()[0].json_body().unwrap();
        assert_eq!(body["thread_id"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_prompt_failure_is_user_message() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Error(HttpError::Timeout(
            "60s".into(),
        )));

        let err = run_prompt(&client(&http), "hi").await.unwrap_err();
        match err {
            PromptError::Failed(message) => assert!(message.starts_with("Failed to send message")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blank_prompt_rejected_without_request() {
        let http = MockHttpClient::new();
        let err = run_prompt(&client(&http), " ").await.unwrap_err();
        assert_eq!(err, PromptError::Rejected(SubmitRejected::Blank));
        assert!(http.get_requests().is_empty());
    }
}
