use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing::info;

use chat_relay_backend::routes;
use chat_relay_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let state = Arc::new(AppState::new());

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router().with_state(state).layer(cors);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
    info!("chat relay listening at http://localhost:8000 (ws at /ws)");
    axum::serve(listener, app).await?;
    Ok(())
}
