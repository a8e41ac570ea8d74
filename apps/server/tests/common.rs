#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use finpulse_server::{api::app_router, build_state, config::Config};
use tower::ServiceExt;

/// Router over a synthetic-mode feed with no artificial latency.
pub fn synthetic_router() -> Router {
    let config = Config::from_lookup(|key| match key {
        "FINPULSE_USE_LIVE_PROVIDERS" => Some("false".to_string()),
        "FINPULSE_SYNTHETIC_LATENCY_MS" => Some("0".to_string()),
        _ => None,
    })
    .unwrap();
    let state = build_state(&config);
    app_router(state, &config).unwrap()
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}
