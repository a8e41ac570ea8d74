mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn healthz_returns_ok() {
    let app = common::synthetic_router();
    let (status, body) = common::get(&app, "/api/v1/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn config_summary_hides_key() {
    let app = common::synthetic_router();
    let (status, json) = common::get_json(&app, "/api/v1/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["useLiveProviders"], false);
    assert_eq!(json["tavilyKeyConfigured"], false);
    assert_eq!(json["akshareUrl"], "http://localhost:8000");
    assert!(json.get("tavilyApiKey").is_none());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = common::synthetic_router();
    let (status, _) = common::get(&app, "/api/v1/portfolio").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
