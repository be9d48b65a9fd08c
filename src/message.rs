// src/message.rs
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Reserved sender id for automated replies; never present in the registry.
pub const RESPONDER_SID: &str = "AI_ASSISTANT_SID";

pub const EVENT_REGISTERED: &str = "server_registered_sid";
pub const EVENT_STATUS: &str = "message";
pub const EVENT_NEW_MESSAGE: &str = "new_message";
pub const EVENT_CHAT_MESSAGE: &str = "chat_message";
pub const EVENT_ERROR: &str = "error";

/// Inbound `chat_message` payload. Anything that fails to decode into this
/// shape is a validation error.
#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    pub text: String,
}

/// A single chat utterance on the broadcast path, user or automated.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage {
    pub sender_sid: String,
    pub text: String,
    #[serde(serialize_with = "utc_millis_z")]
    pub timestamp: DateTime<Utc>,
    pub is_ai: bool,
}

impl OutboundMessage {
    /// A message as typed by a connected user, timestamped at acceptance.
    pub fn from_user(sender_sid: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender_sid: sender_sid.into(),
            text: text.into(),
            timestamp: Utc::now(),
            is_ai: false,
        }
    }

    /// A message attributed to the automated responder.
    pub fn automated(text: impl Into<String>) -> Self {
        Self {
            sender_sid: RESPONDER_SID.to_string(),
            text: text.into(),
            timestamp: Utc::now(),
            is_ai: true,
        }
    }
}

// Clients expect RFC 3339 with a "Z" suffix and millisecond precision.
fn utc_millis_z<S: Serializer>(dt: &DateTime<Utc>, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Debug, Serialize)]
pub struct RegisteredPayload {
    pub sid: String,
}

#[derive(Debug, Serialize)]
pub struct StatusPayload {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: String,
}

impl StatusPayload {
    pub fn status(data: impl Into<String>) -> Self {
        Self {
            kind: "status",
            data: data.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
}

/// JSON envelope carried on the raw WebSocket, both directions.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    pub data: serde_json::Value,
}
