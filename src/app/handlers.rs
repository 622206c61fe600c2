//! Message handling for the App.

use tracing::{debug, info, warn};

use crate::state::Applied;

use super::{App, AppMessage, BackendHealth};

impl App {
    /// Handle an incoming async message
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::SendCompleted { generation, result } => {
                if let Ok(reply) = &result {
                    info!("Reply received ({} chars)", reply.content.len());
                }
                match self.conversation.complete_send(generation, result) {
                    Applied::Applied => {
                        self.reset_scroll();
                        self.mark_dirty();
                    }
                    Applied::Stale => {
                        debug!("Dropped reply for generation {}", generation.value());
                    }
                }
            }
            AppMessage::ThreadDeleted { thread_id, result } => match result {
                Ok(()) => debug!("Backend thread {} deleted", thread_id),
                // The local thread is already gone; nothing to show the user.
                Err(e) => warn!(
                    "Failed to delete backend thread {} [{}]: {}",
                    thread_id,
                    e.error_code(),
                    e
                ),
            },
            AppMessage::HealthChecked(result) => {
                self.backend = match result {
                    Ok(status) if status.is_healthy() => BackendHealth::Connected,
                    Ok(status) => {
                        warn!("Backend reports status {:?}", status.status);
                        BackendHealth::Unreachable(format!("status {}", status.status))
                    }
                    Err(e) => {
                        warn!("Health check failed: {}", e);
                        BackendHealth::Unreachable(e.to_string())
                    }
                };
                self.mark_dirty();
            }
        }
    }
}
