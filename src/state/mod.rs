//! Conversation state
//!
//! Pure transitions over [`ConversationThread`]; I/O is requested through
//! [`Effect`] values and run by the app.

pub mod conversation;
mod effect;

#[cfg(test)]
mod proptests;

pub use conversation::{
    Applied, ConversationSnapshot, ConversationThread, Generation, ThreadStatus,
    PLACEHOLDER_IDLE, PLACEHOLDER_SENDING,
};
pub use effect::Effect;
