use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use finpulse_market_feed::{Category, NewsItem, NewsSource};
use serde::{Deserialize, Serialize};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct NewsQuery {
    category: Option<String>,
}

#[derive(Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

#[derive(Serialize)]
struct CategoryInfo {
    id: Category,
    label: &'static str,
    icon: &'static str,
}

#[derive(Serialize)]
struct SourceInfo {
    id: NewsSource,
    label: &'static str,
    color: &'static str,
}

/// News for one category; a missing category is the wildcard feed.
async fn get_news(
    State(state): State<Arc<AppState>>,
    Query(q): Query<NewsQuery>,
) -> ApiResult<Json<Vec<NewsItem>>> {
    let category = match q.category.as_deref() {
        Some(raw) if !raw.trim().is_empty() => raw.parse::<Category>()?,
        _ => Category::All,
    };
    Ok(Json(state.feed.fetch_news(category).await))
}

async fn search_news(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> Json<Vec<NewsItem>> {
    let text = q.q.unwrap_or_default();
    Json(state.feed.search_news(&text).await)
}

async fn list_categories() -> Json<Vec<CategoryInfo>> {
    Json(
        Category::ALL
            .into_iter()
            .map(|id| CategoryInfo {
                id,
                label: id.label(),
                icon: id.icon(),
            })
            .collect(),
    )
}

async fn list_sources(State(state): State<Arc<AppState>>) -> Json<Vec<SourceInfo>> {
    Json(
        state
            .feed
            .sources()
            .into_iter()
            .map(|id| SourceInfo {
                id,
                label: id.label(),
                color: id.color(),
            })
            .collect(),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/news", get(get_news))
        .route("/news/search", get(search_news))
        .route("/categories", get(list_categories))
        .route("/sources", get(list_sources))
}
