use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use finpulse_market_feed::{HotSector, HotStock};

use crate::main_lib::AppState;

async fn get_hot_stocks(State(state): State<Arc<AppState>>) -> Json<Vec<HotStock>> {
    Json(state.feed.fetch_hot_stocks().await)
}

async fn get_hot_sectors(State(state): State<Arc<AppState>>) -> Json<Vec<HotSector>> {
    Json(state.feed.fetch_hot_sectors().await)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/market/hot-stocks", get(get_hot_stocks))
        .route("/market/hot-sectors", get(get_hot_sectors))
}
