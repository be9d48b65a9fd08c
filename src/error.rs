// src/error.rs
use thiserror::Error;

/// Failure to deliver a frame at the transport layer.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no active connection for session {0}")]
    UnknownSession(String),
    #[error("connection channel closed for session {0}")]
    ChannelClosed(String),
}

/// Everything that can go wrong while handling one session's event.
///
/// No variant is fatal: the engine converts each into a best-effort `error`
/// event to the originating session and keeps running.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid message format: {0}")]
    Validation(String),
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl RelayError {
    /// The `type` string carried on the wire in `error` events.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Validation(_) => "validation_error",
            RelayError::Transport(_) => "server_error",
            RelayError::Unexpected(_) => "unexpected_error",
        }
    }

    /// The human-readable message shown to the client, never internal detail.
    pub fn client_message(&self) -> String {
        match self {
            RelayError::Validation(_) => {
                "Invalid message format. Expected {'text': 'your message'}".to_string()
            }
            RelayError::Transport(_) => {
                "A server error occurred while processing your message.".to_string()
            }
            RelayError::Unexpected(_) => "An unexpected server error occurred.".to_string(),
        }
    }
}
