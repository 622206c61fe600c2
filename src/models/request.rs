use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
///
/// `thread_id` is always serialized, as `null` until the backend has assigned
/// one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// The user's text, exactly as typed
    pub message: String,
    /// Thread to continue, `None` to let the backend start one
    pub thread_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, thread_id: Option<String>) -> Self {
        Self {
            message: message.into(),
            thread_id,
        }
    }
}

/// Raw body of a `POST /api/chat` reply.
///
/// Both fields are optional on the wire so a malformed reply can be reported
/// as a protocol error instead of a JSON error. The backend also echoes a
/// `messages` transcript, which is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
}

/// A validated agent reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// Thread the backend filed the exchange under, if it said
    pub thread_id: Option<String>,
    /// The agent's answer
    pub content: String,
}

impl ChatResponse {
    /// Validate the wire body into a [`ChatReply`].
    ///
    /// Returns `None` when the reply content is missing. An empty `thread_id`
    /// is treated as absent.
    pub fn into_reply(self) -> Option<ChatReply> {
        let content = self.response?;
        let thread_id = self.thread_id.filter(|id| !id.trim().is_empty());
        Some(ChatReply { thread_id, content })
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}
