// src/state.rs
use std::sync::Arc;

use crate::services::broadcast::BroadcastEngine;
use crate::services::responder::AutoResponder;
use crate::services::transport::WsTransport;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub engine: BroadcastEngine,
    pub transport: WsTransport,
}

impl AppState {
    pub fn new() -> Self {
        let transport = WsTransport::new();
        let engine = BroadcastEngine::new(
            Arc::new(transport.clone()),
            Arc::new(AutoResponder::default()),
        );
        Self { engine, transport }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
