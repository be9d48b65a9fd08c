use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chat_relay_backend::routes::create_router;
use chat_relay_backend::state::AppState;
use tower::util::ServiceExt;

fn app() -> axum::Router {
    create_router().with_state(Arc::new(AppState::new()))
}

#[tokio::test]
async fn test_root_endpoint() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["message"], "AI Chat App Backend");
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body_bytes[..], b"OK");
}

#[tokio::test]
async fn test_ws_route_requires_upgrade() {
    // A plain GET without the upgrade handshake must not be served as HTTP.
    let response = app()
        .oneshot(Request::builder().uri("/ws").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
