mod message;
mod request;

pub use message::{Message, MessageRole};
pub use request::{ChatReply, ChatRequest, ChatResponse, HealthStatus};
