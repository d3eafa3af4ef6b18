use crate::limiter::RESET_HINT;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub const RATE_LIMIT_MESSAGE: &str = "Daily request limit reached";

/// Errors a route can answer with. Messages are fixed user-facing strings;
/// underlying causes are logged, never returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(&'static str),
    RateLimited { limit: u32 },
    Internal(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            ApiError::RateLimited { limit } => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "error": RATE_LIMIT_MESSAGE, "limit": limit, "reset": RESET_HINT }),
            ),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
        };
        (status, Json(body)).into_response()
    }
}
