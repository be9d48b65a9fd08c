// src/services/broadcast.rs
use std::{future::Future, sync::Arc};

use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::error::RelayError;
use crate::message::{
    ChatMessage, ErrorPayload, EVENT_ERROR, EVENT_NEW_MESSAGE, EVENT_REGISTERED, EVENT_STATUS,
    OutboundMessage, RegisteredPayload, StatusPayload,
};
use crate::services::responder::Responder;
use crate::services::session_registry::SessionRegistry;
use crate::services::transport::{SendTarget, Transport};

const GREETING_TEXT: &str = "Hello! I am your friendly AI assistant. Ask me anything!";

/// Connection lifecycle and message fan-out. One instance per process; clone
/// handles freely, all clones share the same registry.
#[derive(Clone)]
pub struct BroadcastEngine {
    registry: SessionRegistry,
    responder: Arc<dyn Responder>,
    transport: Arc<dyn Transport>,
}

impl BroadcastEngine {
    pub fn new(transport: Arc<dyn Transport>, responder: Arc<dyn Responder>) -> Self {
        Self {
            registry: SessionRegistry::new(),
            responder,
            transport,
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Register the session and greet it: its assigned sid, a welcome status,
    /// and an automated greeting. A failed send is logged and does not
    /// unregister the session or skip the remaining sends.
    pub async fn on_connect(&self, sid: &str) {
        self.guarded(sid, "connect", async {
            self.registry.register(sid).await;
            let total = self.registry.count().await;
            info!(%sid, total, "client connected");

            let greetings: [(&str, Value); 3] = [
                (
                    EVENT_REGISTERED,
                    json!(RegisteredPayload { sid: sid.to_string() }),
                ),
                (
                    EVENT_STATUS,
                    json!(StatusPayload::status(format!("Welcome {sid}!"))),
                ),
                (
                    EVENT_NEW_MESSAGE,
                    json!(OutboundMessage::automated(GREETING_TEXT)),
                ),
            ];
            for (event, payload) in greetings {
                if let Err(err) = self
                    .transport
                    .send(SendTarget::One(sid.to_string()), event, payload)
                    .await
                {
                    warn!(%sid, event, %err, "connect send failed");
                }
            }
            Ok(())
        })
        .await;
    }

    /// Drop the session from the registry, then tell everyone else it left.
    /// The departure notice fires even for a sid that was never registered.
    pub async fn on_disconnect(&self, sid: &str) {
        self.guarded(sid, "disconnect", async {
            self.registry.unregister(sid).await;
            let total = self.registry.count().await;
            info!(%sid, total, "client disconnected");

            self.transport
                .send(
                    SendTarget::AllExcept(sid.to_string()),
                    EVENT_STATUS,
                    json!(StatusPayload::status(format!("User {sid} has left."))),
                )
                .await?;
            Ok(())
        })
        .await;
    }

    /// The message-acceptance pipeline: validate, echo to the room, then ask
    /// the responder and broadcast its reply. Only this message's task
    /// suspends during the responder delay.
    pub async fn on_message(&self, sid: &str, raw: Value) {
        self.guarded(sid, "chat_message", async {
            let chat: ChatMessage = serde_json::from_value(raw)
                .map_err(|err| RelayError::Validation(err.to_string()))?;
            if chat.text.is_empty() {
                return Err(RelayError::Validation("empty text".to_string()));
            }

            let user_message = OutboundMessage::from_user(sid, chat.text);
            info!(%sid, text = %user_message.text, "broadcasting user message");
            self.transport
                .send(SendTarget::All, EVENT_NEW_MESSAGE, json!(user_message))
                .await?;

            let reply = self.responder.respond(&user_message.text, sid).await;
            // Membership may have changed during the delay; the reply goes to
            // whoever is in the room now, sender included or not.
            self.transport
                .send(SendTarget::All, EVENT_NEW_MESSAGE, json!(reply))
                .await?;
            Ok(())
        })
        .await;
    }

    /// Uniform per-handler boundary: any error escaping an event handler is
    /// logged and turned into a best-effort `error` event to the originating
    /// session. Nothing propagates to the transport loop or other sessions.
    async fn guarded<F>(&self, sid: &str, handler: &'static str, fut: F)
    where
        F: Future<Output = Result<(), RelayError>>,
    {
        if let Err(err) = fut.await {
            warn!(%sid, handler, %err, kind = err.kind(), "event handler failed");
            let notice = ErrorPayload {
                kind: err.kind(),
                message: err.client_message(),
            };
            if let Err(send_err) = self
                .transport
                .send(SendTarget::One(sid.to_string()), EVENT_ERROR, json!(notice))
                .await
            {
                error!(%sid, %send_err, "failed to deliver error notice");
            }
        }
    }
}
