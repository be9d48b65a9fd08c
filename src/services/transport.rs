// src/services/transport.rs
use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::{RwLock, mpsc};
use tracing::debug;

use crate::error::TransportError;

/// Who a frame is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendTarget {
    One(String),
    All,
    AllExcept(String),
}

/// Outbound primitive the engine depends on. Delivery is fire-and-forget:
/// fan-out targets are best-effort, only a direct send to a missing session
/// surfaces an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, target: SendTarget, event: &str, payload: Value)
    -> Result<(), TransportError>;
}

/// WebSocket-backed transport: one unbounded queue per connected socket,
/// drained by that socket's writer task.
#[derive(Clone, Default)]
pub struct WsTransport {
    peers: Arc<RwLock<HashMap<String, mpsc::UnboundedSender<String>>>>,
}

impl WsTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire up a freshly accepted socket's outbound queue.
    pub async fn attach(&self, sid: &str, tx: mpsc::UnboundedSender<String>) {
        let mut guard = self.peers.write().await;
        guard.insert(sid.to_string(), tx);
    }

    /// Tear down after the socket closes. Absent sids are a no-op.
    pub async fn detach(&self, sid: &str) {
        let mut guard = self.peers.write().await;
        guard.remove(sid);
    }

    fn frame(event: &str, payload: Value) -> String {
        json!({ "event": event, "data": payload }).to_string()
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn send(
        &self,
        target: SendTarget,
        event: &str,
        payload: Value,
    ) -> Result<(), TransportError> {
        let frame = Self::frame(event, payload);
        let guard = self.peers.read().await;
        match target {
            SendTarget::One(sid) => {
                let tx = guard
                    .get(&sid)
                    .ok_or_else(|| TransportError::UnknownSession(sid.clone()))?;
                tx.send(frame)
                    .map_err(|_| TransportError::ChannelClosed(sid))
            }
            SendTarget::All => {
                for (sid, tx) in guard.iter() {
                    if tx.send(frame.clone()).is_err() {
                        debug!(%sid, "dropping frame for closed connection");
                    }
                }
                Ok(())
            }
            SendTarget::AllExcept(skip) => {
                for (sid, tx) in guard.iter().filter(|(sid, _)| **sid != skip) {
                    if tx.send(frame.clone()).is_err() {
                        debug!(%sid, "dropping frame for closed connection");
                    }
                }
                Ok(())
            }
        }
    }
}
