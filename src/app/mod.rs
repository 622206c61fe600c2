//! Application state and logic.
//!
//! [`App`] owns the conversation thread and everything the terminal UI needs
//! around it. Network work runs in spawned tasks that report back through
//! [`AppMessage`]s; only the event loop mutates the app.

mod actions;
mod handlers;
mod keys;
mod messages;

pub use messages::AppMessage;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::client::AgentClient;
use crate::error::SubmitRejected;
use crate::input::InputBuffer;
use crate::state::{ConversationSnapshot, ConversationThread};
use crate::ui::RenderOutputs;

/// What the health probe last reported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendHealth {
    #[default]
    Checking,
    Connected,
    Unreachable(String),
}

impl BackendHealth {
    pub fn label(&self) -> &str {
        match self {
            BackendHealth::Checking => "checking…",
            BackendHealth::Connected => "connected",
            BackendHealth::Unreachable(_) => "unreachable",
        }
    }
}

/// User requests against the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Submit(String),
    Clear,
    DismissError,
}

/// Main application state
pub struct App {
    pub conversation: ConversationThread,
    pub input: InputBuffer,
    pub client: Arc<AgentClient>,
    pub backend: BackendHealth,
    /// Flag to track if the app should quit
    pub should_quit: bool,
    /// Set on state mutations, cleared after each draw.
    pub needs_redraw: bool,
    /// Animation counter for the spinner
    pub tick_count: u64,
    /// Lines scrolled up from the bottom of the message log
    pub scroll_offset: u16,
    /// Largest useful `scroll_offset`, as of the last draw
    pub max_scroll: u16,
    /// Receiver for async messages; taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (clone this to pass to async tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
}

impl App {
    pub fn new(client: Arc<AgentClient>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        Self {
            conversation: ConversationThread::new(),
            input: InputBuffer::new(),
            client,
            backend: BackendHealth::default(),
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            scroll_offset: 0,
            max_scroll: 0,
            message_rx: Some(message_rx),
            message_tx,
        }
    }

    pub fn snapshot(&self) -> ConversationSnapshot<'_> {
        self.conversation.snapshot()
    }

    /// Apply an intent and start whatever effect it produced.
    ///
    /// Must run inside a tokio runtime when the intent leads to network work.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), SubmitRejected> {
        self.mark_dirty();
        match intent {
            Intent::Submit(text) => {
                let effect = self.conversation.submit(&text)?;
                self.reset_scroll();
                self.run_effect(effect);
            }
            Intent::Clear => {
                self.reset_scroll();
                if let Some(effect) = self.conversation.clear() {
                    self.run_effect(effect);
                }
            }
            Intent::DismissError => {
                self.conversation.dismiss_error();
            }
        }
        Ok(())
    }

    /// Submit the input line. The line is only consumed when the send starts.
    pub fn submit_input(&mut self) -> Result<(), SubmitRejected> {
        let text = self.input.text().to_string();
        match self.dispatch(Intent::Submit(text)) {
            Ok(()) => {
                self.input.clear();
                Ok(())
            }
            Err(rejected) => {
                debug!("Submit rejected: {}", rejected);
                Err(rejected)
            }
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// True while something on screen animates between state changes.
    pub fn is_animating(&self) -> bool {
        self.conversation.is_sending() || self.backend == BackendHealth::Checking
    }

    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(self.max_scroll);
        self.mark_dirty();
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
        self.mark_dirty();
    }

    /// Snap the message view back to the newest message.
    pub fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
    }

    /// Keep what the last frame measured; the log may have shrunk under the
    /// current offset.
    pub fn apply_render_outputs(&mut self, outputs: RenderOutputs) {
        self.max_scroll = outputs.max_scroll;
        self.scroll_offset = self.scroll_offset.min(outputs.max_scroll);
    }
}
