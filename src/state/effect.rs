//! Effects produced by conversation transitions

use crate::models::ChatRequest;

use super::conversation::Generation;

/// Side effects the owner of a [`ConversationThread`](super::ConversationThread)
/// must run after a transition. The state machine itself never does I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a user turn; feed the outcome back through `complete_send` with
    /// the same generation.
    SendMessage {
        generation: Generation,
        request: ChatRequest,
    },

    /// Best-effort deletion of a discarded backend thread. Nothing is fed back.
    DeleteThread { thread_id: String },
}

impl Effect {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Effect::SendMessage { .. } => "send_message",
            Effect::DeleteThread { .. } => "delete_thread",
        }
    }
}
