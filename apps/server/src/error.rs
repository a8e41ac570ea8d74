use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finpulse_market_feed::{ErrorClass, FeedError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Feed(#[from] FeedError),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Feed(e) => match e.class() {
                ErrorClass::Input => (StatusCode::BAD_REQUEST, e.to_string()),
                _ => (StatusCode::BAD_GATEWAY, e.to_string()),
            },
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
