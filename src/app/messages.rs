//! AppMessage enum for async communication within the application.

use crate::error::TransportError;
use crate::models::{ChatReply, HealthStatus};
use crate::state::Generation;

/// Results posted back by spawned network tasks
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A `SendMessage` effect finished
    SendCompleted {
        generation: Generation,
        result: Result<ChatReply, TransportError>,
    },
    /// A `DeleteThread` effect finished
    ThreadDeleted {
        thread_id: String,
        result: Result<(), TransportError>,
    },
    /// Startup health probe finished
    HealthChecked(Result<HealthStatus, TransportError>),
}
