use crate::limiter::{client_id, Admission};
use crate::models::{ClaimVerification, VerifiedArticleResponse};
use crate::pipeline::ChatMessage;
use crate::server::error::ApiError;
use crate::server::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use std::net::SocketAddr;
use tracing::{debug, error, info_span, warn, Instrument};
use uuid::Uuid;

pub const HEALTH_MESSAGE: &str = "claimcheck is running";

pub fn router(state: AppState) -> Router {
    let limited = Router::new()
        .route("/check", post(check_article))
        .route("/verify-claim", post(verify_claim))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            enforce_daily_limit,
        ));

    Router::new()
        .route("/", get(health))
        .route("/test-openai", get(test_openai))
        .merge(limited)
        .layer(middleware::from_fn(trace_request))
        .with_state(state)
}

async fn trace_request(request: Request, next: Next) -> Response {
    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        path = %request.uri().path(),
    );
    async move {
        let response = next.run(request).await;
        debug!(status = response.status().as_u16(), "request finished");
        response
    }
    .instrument(span)
    .await
}

async fn enforce_daily_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok());
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let client = client_id(forwarded, peer);

    match state.limiter.check(&client) {
        Admission::Admitted { used, remaining } => {
            debug!(%client, used, remaining, "request admitted");
            next.run(request).await
        }
        Admission::Rejected { limit } => {
            warn!(%client, limit, "daily limit reached");
            ApiError::RateLimited { limit }.into_response()
        }
    }
}

/// Pulls a non-blank string field out of a JSON body. Unparseable bodies
/// count as missing the field.
fn required_text(body: Result<Json<Value>, JsonRejection>, field: &str) -> Option<String> {
    let Json(value) = body.ok()?;
    let text = value.get(field)?.as_str()?;
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

async fn health() -> &'static str {
    HEALTH_MESSAGE
}

#[derive(Debug, Serialize)]
struct DiagnosticResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn test_openai(State(state): State<AppState>) -> (StatusCode, Json<DiagnosticResponse>) {
    let messages = [ChatMessage::user(
        "Reply with the JSON object {\"status\": \"ok\"} and nothing else.",
    )];
    match state.completion.complete(&messages).await {
        Ok(output) => (
            StatusCode::OK,
            Json(DiagnosticResponse {
                ok: true,
                output: Some(output.unwrap_or_default()),
                error: None,
            }),
        ),
        Err(err) => {
            error!(error = %err, "completion diagnostic failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(DiagnosticResponse {
                    ok: false,
                    output: None,
                    error: Some(err.to_string()),
                }),
            )
        }
    }
}

async fn check_article(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<VerifiedArticleResponse>, ApiError> {
    let text = required_text(body, "text").ok_or(ApiError::BadRequest("No text provided"))?;
    let response = state.pipeline.check_article(&text).await.map_err(|err| {
        error!(error = %err, "article analysis failed");
        ApiError::Internal("Failed to analyze article")
    })?;
    Ok(Json(response))
}

async fn verify_claim(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ClaimVerification>, ApiError> {
    let claim = required_text(body, "claim").ok_or(ApiError::BadRequest("No claim provided"))?;
    Ok(Json(state.pipeline.verify_claim(&claim).await))
}
