use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{middleware, BoxError, Json, Router};
use tower::buffer::BufferLayer;
use tower::limit::RateLimitLayer;
use tower::load_shed::LoadShedLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{AudioNormalizer, TranscriptionEngine};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    health_handler, info_handler, ready_handler, stats_handler, transcribe_handler, ErrorResponse,
};
use crate::presentation::state::AppState;

pub fn create_router<E, N>(state: AppState<E, N>) -> Router
where
    E: TranscriptionEngine + 'static,
    N: AudioNormalizer + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Multipart bodies carry whole audio files; leave headroom above the
    // validated payload limit for the multipart framing.
    let body_limit = (state.settings.transcription.max_file_size_mb + 1) * 1024 * 1024;

    // Transcription is the expensive route and gets a global request
    // budget. Excess requests are shed immediately as 429 rather than
    // queued; probes and info stay unlimited.
    let rate_limit = state.settings.server.rate_limit_per_minute.max(1);
    let transcribe_route = Router::new()
        .route("/api/v1/transcribe", post(transcribe_handler::<E, N>))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(rate_limit_error))
                .layer(BufferLayer::new(64))
                .layer(LoadShedLayer::new())
                .layer(RateLimitLayer::new(rate_limit, Duration::from_secs(60))),
        );

    Router::new()
        .route("/health", get(health_handler::<E, N>))
        .route("/ready", get(ready_handler::<E, N>))
        .route("/api/v1/info", get(info_handler::<E, N>))
        .route("/api/v1/stats", get(stats_handler::<E, N>))
        .merge(transcribe_route)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

async fn rate_limit_error(err: BoxError) -> (StatusCode, Json<ErrorResponse>) {
    if err.is::<tower::load_shed::error::Overloaded>() {
        tracing::warn!("Transcription request shed: rate limit exhausted");
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse {
                error: "Rate limit exceeded, retry later".to_string(),
            }),
        )
    } else {
        tracing::error!(error = %err, "Request middleware failure");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Internal error: {}", err),
            }),
        )
    }
}
