//! HTTP API gateway for groundwork.
//!
//! Exposes the grounded-answer pipeline over REST: a health check and
//! `POST /v1/answer`. The answer response body carries exactly one of
//! `reply` or `error`, never both and never a partial mix.
//!
//! Built on Axum.

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use groundwork_core::error::Error;
use groundwork_pipeline::Pipeline;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use uuid::Uuid;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub pipeline: Pipeline,
    pub start_time: DateTime<Utc>,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    // No credentials flow through this API, so any origin may call it.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/answer", post(answer_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Builds the store, provider, and extractor registry once; the pipeline
/// is shared across all requests.
pub async fn start(
    config: groundwork_config::AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let store = groundwork_storage::build_store(&config)?;
    let provider = groundwork_providers::build_provider(&config)?;
    let registry = Arc::new(groundwork_extract::default_registry());
    let pipeline = Pipeline::new(store, provider, registry, &config);

    let state = Arc::new(GatewayState {
        pipeline,
        start_time: Utc::now(),
    });
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_seconds: i64,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: (Utc::now() - state.start_time).num_seconds(),
    })
}

#[derive(Deserialize)]
struct AnswerRequest {
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
struct AnswerResponse {
    reply: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

async fn answer_handler(
    State(state): State<SharedState>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, (StatusCode, Json<ErrorResponse>)> {
    if payload.message.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Missing or invalid 'message'.",
        ));
    }

    let request_id = Uuid::new_v4();
    info!(
        request_id = %request_id,
        message_chars = payload.message.chars().count(),
        "Answer request received"
    );

    match state.pipeline.answer(&payload.message).await {
        Ok(reply) => Ok(Json(AnswerResponse { reply })),
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Answer request failed");
            Err(error_response(status_for(&e), e.to_string()))
        }
    }
}

/// Completion-service failures are the upstream's fault; everything else
/// that reaches the handler is ours.
fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::Completion(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}
