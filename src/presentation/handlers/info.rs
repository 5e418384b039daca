use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{AudioNormalizer, TranscriptionEngine};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct InfoResponse {
    pub service: String,
    pub version: String,
    pub engine_ready: bool,
    pub model: String,
    pub max_file_size_mb: usize,
    pub window_minutes: u64,
    pub max_audio_duration_hours: u64,
    pub cache_ttl_secs: u64,
    pub rate_limit_per_minute: u64,
    pub features: Vec<String>,
}

pub async fn info_handler<E, N>(State(state): State<AppState<E, N>>) -> impl IntoResponse
where
    E: TranscriptionEngine + 'static,
    N: AudioNormalizer + 'static,
{
    let t = &state.settings.transcription;
    (
        StatusCode::OK,
        Json(InfoResponse {
            service: "skriba".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            engine_ready: state.engine.is_ready(),
            model: state.settings.engine.model.clone(),
            max_file_size_mb: t.max_file_size_mb,
            window_minutes: t.window_ms / 1000 / 60,
            max_audio_duration_hours: t.max_duration_secs / 60 / 60,
            cache_ttl_secs: state.settings.cache.ttl_secs,
            rate_limit_per_minute: state.settings.server.rate_limit_per_minute,
            features: vec![
                "unlimited_audio".to_string(),
                "chunked_processing".to_string(),
                "caching".to_string(),
            ],
        }),
    )
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub cache_entries: usize,
    pub cache_ttl_secs: u64,
    pub model: String,
    pub rate_limit_per_minute: u64,
}

/// Runtime counters, mainly cache occupancy. Read-only: no sweep is
/// triggered here, so repeated polling does not disturb TTL behavior
/// observed through `/health`.
pub async fn stats_handler<E, N>(State(state): State<AppState<E, N>>) -> impl IntoResponse
where
    E: TranscriptionEngine + 'static,
    N: AudioNormalizer + 'static,
{
    (
        StatusCode::OK,
        Json(StatsResponse {
            cache_entries: state.cache.len(),
            cache_ttl_secs: state.settings.cache.ttl_secs,
            model: state.settings.engine.model.clone(),
            rate_limit_per_minute: state.settings.server.rate_limit_per_minute,
        }),
    )
}
