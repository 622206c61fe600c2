//! Errors produced while talking to the agent backend.

use thiserror::Error;

use crate::traits::HttpError;

/// Why a backend call failed.
///
/// `Clone` so failures can travel back to the event loop inside an
/// `AppMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response (connect failure, timeout, bad URL).
    #[error("network error: {message}")]
    Network { message: String },

    /// The backend answered with a non-success status.
    #[error("server error ({status}){}", body_suffix(.body))]
    Server { status: u16, body: Option<String> },

    /// The backend answered 2xx but the body was not what the contract promises.
    #[error("protocol error: {message}")]
    Protocol { message: String },
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(": {}", body),
        None => String::new(),
    }
}

impl TransportError {
    /// Build a `Server` error, dropping an empty diagnostic body.
    pub fn server(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let body = body.trim();
        TransportError::Server {
            status,
            body: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        TransportError::Protocol {
            message: message.into(),
        }
    }

    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Network { .. } => {
                "Failed to send message: the agent is unreachable. Please try again.".to_string()
            }
            TransportError::Server { status, .. } => match *status {
                404 => "Failed to send message: the agent endpoint was not found.".to_string(),
                500..=599 => {
                    "Failed to send message: the agent is having trouble. Please try again."
                        .to_string()
                }
                _ => format!(
                    "Failed to send message (HTTP {}). Please try again.",
                    status
                ),
            },
            TransportError::Protocol { .. } => {
                "Failed to send message: the agent sent an unexpected reply. Please try again."
                    .to_string()
            }
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::Network { .. } => "E_NET",
            TransportError::Server { .. } => "E_SERVER",
            TransportError::Protocol { .. } => "E_PROTOCOL",
        }
    }
}

impl From<HttpError> for TransportError {
    fn from(err: HttpError) -> Self {
        TransportError::Network {
            message: err.to_string(),
        }
    }
}
