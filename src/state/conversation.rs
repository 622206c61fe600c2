//! Conversation state machine.
//!
//! `Idle -> Sending -> (Idle | Error)`, with `clear` allowed from anywhere.
//! The user turn is appended optimistically when a send starts and removed
//! again if the send fails, so the log only ever holds turns the backend
//! accepted (plus, while sending, the one pending turn).
//!
//! Every send is tagged with the thread's current [`Generation`]. `clear`
//! advances the generation, which turns any reply still in flight into a
//! stale one that is dropped on arrival.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::error::{SubmitRejected, TransportError};
use crate::models::{ChatReply, ChatRequest, Message};

use super::effect::Effect;

pub const PLACEHOLDER_IDLE: &str = "Ask me to count letters in a word...";
pub const PLACEHOLDER_SENDING: &str = "Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadStatus {
    #[default]
    Idle,
    Sending,
    Error,
}

/// Identifies one incarnation of a thread; advanced by every `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

/// What `complete_send` did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The result belonged to a send this thread no longer waits for.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSend {
    generation: Generation,
    /// Log length before the optimistic append
    rollback_len: usize,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationSnapshot<'a> {
    pub messages: &'a [Message],
    pub status: ThreadStatus,
    pub last_error: Option<&'a str>,
    pub thread_id: Option<&'a str>,
    pub input_disabled: bool,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct ConversationThread {
    thread_id: Option<String>,
    messages: Vec<Message>,
    status: ThreadStatus,
    last_error: Option<String>,
    generation: Generation,
    pending: Option<PendingSend>,
}

impl ConversationThread {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn status(&self) -> ThreadStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_sending(&self) -> bool {
        self.status == ThreadStatus::Sending
    }

    pub fn snapshot(&self) -> ConversationSnapshot<'_> {
        let sending = self.is_sending();
        ConversationSnapshot {
            messages: &self.messages,
            status: self.status,
            last_error: self.last_error(),
            thread_id: self.thread_id(),
            input_disabled: sending,
            placeholder: if sending {
                PLACEHOLDER_SENDING
            } else {
                PLACEHOLDER_IDLE
            },
        }
    }

    /// Wall-clock time, clamped so timestamps never go backwards in the log.
    fn next_timestamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.messages.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        }
    }

    /// Start sending `text`.
    pub fn submit(&mut self, text: &str) -> Result<Effect, SubmitRejected> {
        self.submit_at(text, Utc::now())
    }

    pub fn submit_at(&mut self, text: &str, now: DateTime<Utc>) -> Result<Effect, SubmitRejected> {
        if text.trim().is_empty() {
            return Err(SubmitRejected::Blank);
        }
        if self.is_sending() {
            return Err(SubmitRejected::InFlight);
        }

        let rollback_len = self.messages.len();
        let timestamp = self.next_timestamp(now);
        self.messages.push(Message::user(text, timestamp));
        self.status = ThreadStatus::Sending;
        self.last_error = None;
        self.pending = Some(PendingSend {
            generation: self.generation,
            rollback_len,
        });

        debug!(
            "submit: generation={} thread_id={:?}",
            self.generation.value(),
            self.thread_id
        );

        Ok(Effect::SendMessage {
            generation: self.generation,
            request: ChatRequest::new(text, self.thread_id.clone()),
        })
    }

    /// Apply the outcome of a `SendMessage` effect.
    pub fn complete_send(
        &mut self,
        generation: Generation,
        result: Result<ChatReply, TransportError>,
    ) -> Applied {
        self.complete_send_at(generation, result, Utc::now())
    }

    pub fn complete_send_at(
        &mut self,
        generation: Generation,
        result: Result<ChatReply, TransportError>,
        now: DateTime<Utc>,
    ) -> Applied {
        let pending = match self.pending {
            Some(pending) if pending.generation == generation && generation == self.generation => {
                pending
            }
            _ => {
                debug!(
                    "Discarding stale send result (generation={}, current={})",
                    generation.value(),
                    self.generation.value()
                );
                return Applied::Stale;
            }
        };
        self.pending = None;

        match result {
            Ok(reply) => {
                match (&self.thread_id, reply.thread_id) {
                    (None, Some(assigned)) => {
                        info!("Backend assigned thread {}", assigned);
                        self.thread_id = Some(assigned);
                    }
                    (Some(current), Some(other)) if *current != other => {
                        debug!("Ignoring thread id {} (thread is {})", other, current);
                    }
                    _ => {}
                }
                let timestamp = self.next_timestamp(now);
                self.messages.push(Message::agent(reply.content, timestamp));
                self.status = ThreadStatus::Idle;
            }
            Err(err) => {
                error!("Send failed [{}]: {}", err.error_code(), err);
                self.messages.truncate(pending.rollback_len);
                self.last_error = Some(err.user_message());
                self.status = ThreadStatus::Error;
            }
        }

        Applied::Applied
    }

    /// Leave the error state. Returns false when there was nothing to dismiss.
    pub fn dismiss_error(&mut self) -> bool {
        if self.status != ThreadStatus::Error {
            return false;
        }
        self.last_error = None;
        self.status = ThreadStatus::Idle;
        true
    }

    /// Reset to an empty thread.
    ///
    /// Returns a `DeleteThread` effect when the backend knew this thread.
    pub fn clear(&mut self) -> Option<Effect> {
        let previous = self.thread_id.take();
        if self.pending.take().is_some() {
            debug!("Clearing with a send in flight; its reply will be dropped");
        }
        self.messages.clear();
        self.last_error = None;
        self.status = ThreadStatus::Idle;
        self.generation = self.generation.next();

        info!(
            "Conversation cleared (previous thread {:?}, generation now {})",
            previous,
            self.generation.value()
        );

        previous.map(|thread_id| Effect::DeleteThread { thread_id })
    }
}
