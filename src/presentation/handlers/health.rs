use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{AudioNormalizer, TranscriptionEngine};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub engine_ready: bool,
    pub cache_entries: usize,
    pub timestamp: String,
    pub service: String,
}

/// Health probe. Also the opportunistic trigger for the cache sweep;
/// there is no background timer evicting expired entries.
pub async fn health_handler<E, N>(State(state): State<AppState<E, N>>) -> impl IntoResponse
where
    E: TranscriptionEngine + 'static,
    N: AudioNormalizer + 'static,
{
    let engine_ready = state.engine.is_ready();
    let cache_entries = state.cache.len();
    state.cache.sweep();

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: if engine_ready {
                "healthy".to_string()
            } else {
                "unhealthy".to_string()
            },
            engine_ready,
            cache_entries,
            timestamp: chrono::Utc::now().to_rfc3339(),
            service: "skriba".to_string(),
        }),
    )
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
}

/// Readiness probe. Unlike `/health` this reports through the status
/// code, so orchestrators can gate traffic on it without parsing the
/// body.
pub async fn ready_handler<E, N>(State(state): State<AppState<E, N>>) -> impl IntoResponse
where
    E: TranscriptionEngine + 'static,
    N: AudioNormalizer + 'static,
{
    if state.engine.is_ready() {
        (StatusCode::OK, Json(ReadyResponse { ready: true }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyResponse { ready: false }),
        )
    }
}
