//! Error types.
//!
//! | Type | Raised by | Handling |
//! |------|-----------|----------|
//! | [`SubmitRejected`] | `ConversationThread::submit` | local no-op |
//! | [`TransportError`] | `AgentClient` | error banner + rollback on send, logged on delete |
//!
//! Stale completions are not errors; they come back as
//! `Applied::Stale` from the state machine.

mod transport;

pub use transport::TransportError;

use thiserror::Error;

/// Why `submit` refused to start a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    /// The text was empty or whitespace only.
    #[error("message is blank")]
    Blank,
    /// A send is already in flight.
    #[error("a message is already being sent")]
    InFlight,
}
