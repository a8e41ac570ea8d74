use std::sync::Arc;

use anyhow::Context;
use axum::{extract::State, http::HeaderValue, routing::get, Json, Router};
use finpulse_market_feed::ConfigSummary;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, main_lib::AppState};

mod market;
mod news;

pub async fn healthz() -> &'static str {
    "ok"
}

/// Startup configuration as the presentation layer may see it.
async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigSummary> {
    Json(state.feed.config_summary())
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid FINPULSE_CORS_ALLOW_ORIGINS")?;
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/config", get(get_config))
        .merge(news::router())
        .merge(market::router());

    Ok(Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http()))
}
