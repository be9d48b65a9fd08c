// src/routes/mod.rs
pub mod ws;

use axum::{
    Json, Router,
    routing::get,
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use ws::ws_handler;

use crate::state::SharedState;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route(
            "/",
            get(|| async { Json(json!({"message": "AI Chat App Backend"})) }),
        )
        .route("/health", get(|| async { "OK" }))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
}
