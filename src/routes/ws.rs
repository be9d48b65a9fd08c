// src/routes/ws.rs
use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::message::{EVENT_CHAT_MESSAGE, Envelope};
use crate::state::SharedState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Pump one client connection: a writer task drains this session's outbound
/// queue while the read loop spawns one engine task per inbound event, so a
/// slow responder never stalls the socket.
async fn handle_socket(socket: WebSocket, state: SharedState) {
    let sid = Uuid::new_v4().to_string();
    info!(%sid, "websocket accepted");

    let (mut ws_tx, mut ws_rx) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    state.transport.attach(&sid, tx).await;

    let writer = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    state.engine.on_connect(&sid).await;

    while let Some(frame) = ws_rx.next().await {
        match frame {
            Ok(Message::Text(raw)) => dispatch(&state, &sid, raw.as_str()),
            Ok(Message::Close(_)) | Err(_) => break,
            // Axum answers pings itself; binary frames are not part of the
            // protocol.
            Ok(_) => {}
        }
    }

    state.engine.on_disconnect(&sid).await;
    state.transport.detach(&sid).await;
    writer.abort();
}

fn dispatch(state: &SharedState, sid: &str, raw: &str) {
    let Ok(envelope) = serde_json::from_str::<Envelope>(raw) else {
        debug!(%sid, raw, "unparseable frame");
        return;
    };
    match envelope.event.as_str() {
        EVENT_CHAT_MESSAGE => {
            let engine = state.engine.clone();
            let sid = sid.to_string();
            // One task per event: the responder delay suspends this message's
            // handling only, and a disconnect does not cancel the reply.
            tokio::spawn(async move {
                engine.on_message(&sid, envelope.data).await;
            });
        }
        other => debug!(%sid, event = other, "unhandled event"),
    }
}
