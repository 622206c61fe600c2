//! Effect execution: network work spawned onto the runtime.

use std::sync::Arc;

use tracing::{debug, info};

use crate::state::Effect;

use super::{App, AppMessage};

impl App {
    /// Run an effect in a background task. The outcome arrives as an
    /// [`AppMessage`] on the app's channel.
    pub fn run_effect(&self, effect: Effect) {
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        debug!("Running effect {}", effect.name());

        match effect {
            Effect::SendMessage {
                generation,
                request,
            } => {
                info!(
                    "Sending message (thread {:?}, generation {})",
                    request.thread_id,
                    generation.value()
                );
                tokio::spawn(async move {
                    let result = client.send_message(&request).await;
                    // Receiver gone means the app is shutting down.
                    let _ = tx.send(AppMessage::SendCompleted { generation, result });
                });
            }
            Effect::DeleteThread { thread_id } => {
                tokio::spawn(async move {
                    let result = client.delete_thread(&thread_id).await;
                    let _ = tx.send(AppMessage::ThreadDeleted { thread_id, result });
                });
            }
        }
    }

    /// Probe `GET /api/health` without blocking startup.
    pub fn spawn_health_check(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();

        tokio::spawn(async move {
            let result = client.health_check().await;
            let _ = tx.send(AppMessage::HealthChecked(result));
        });
    }
}
