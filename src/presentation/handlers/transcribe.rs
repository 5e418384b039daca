use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AudioNormalizer, TranscriptionEngine};
use crate::application::services::TranscribeError;
use crate::domain::{Fingerprint, Transcript, TranscriptionTask};
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TranscribeParams {
    pub language: Option<String>,
    #[serde(default)]
    pub task: TranscriptionTask,
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

fn default_use_cache() -> bool {
    true
}

#[derive(Serialize)]
pub struct TranscriptionResponse {
    pub text: String,
    pub language: Option<String>,
    pub duration_seconds: f64,
    pub chunked_processing: bool,
    pub segments: Vec<SegmentResponse>,
    pub metadata: ResponseMetadata,
}

#[derive(Serialize)]
pub struct SegmentResponse {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Serialize)]
pub struct ResponseMetadata {
    pub filename: String,
    pub model: String,
    pub file_size_mb: f64,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<E, N>(
    State(state): State<AppState<E, N>>,
    Query(params): Query<TranscribeParams>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    E: TranscriptionEngine + 'static,
    N: AudioNormalizer + 'static,
{
    if !state.engine.is_ready() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Service unavailable: engine not ready".to_string(),
            }),
        )
            .into_response();
    }

    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Transcribe request with no file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No file uploaded".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response();
        }
    };

    let filename = match field.file_name() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No filename provided".to_string(),
                }),
            )
                .into_response();
        }
    };
    let format_hint = filename.rsplit_once('.').map(|(_, ext)| ext.to_lowercase());

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file bytes");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read file: {}", e),
                }),
            )
                .into_response();
        }
    };

    let max_bytes = state.settings.transcription.max_file_size_mb * 1024 * 1024;
    if data.len() > max_bytes {
        tracing::warn!(bytes = data.len(), "Upload exceeds size limit");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!(
                    "File too large: limit is {} MB",
                    state.settings.transcription.max_file_size_mb
                ),
            }),
        )
            .into_response();
    }

    let file_size_mb = data.len() as f64 / 1024.0 / 1024.0;

    // Fingerprint the raw upload bytes, not the normalized audio, so
    // re-uploads of the same file always hit.
    let fingerprint = Fingerprint::of_bytes(&data);

    if params.use_cache {
        if let Some(cached) = state.cache.lookup(&fingerprint) {
            tracing::info!(fingerprint = %fingerprint, "Returning cached transcription");
            return (
                StatusCode::OK,
                Json(build_response(
                    &cached,
                    &filename,
                    state.settings.engine.model.clone(),
                    file_size_mb,
                )),
            )
                .into_response();
        }
    }

    let audio = match state
        .normalizer
        .normalize(&data, format_hint.as_deref())
        .await
    {
        Ok(a) => a,
        Err(e) => {
            tracing::warn!(error = %e, filename = %filename, "Audio normalization failed");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to process audio file: {}", e),
                }),
            )
                .into_response();
        }
    };

    tracing::info!(
        filename = %filename,
        duration_sec = audio.duration_ms() as f64 / 1000.0,
        "Starting transcription"
    );

    let transcript = match state
        .transcription_service
        .transcribe(audio.as_ref(), params.language.as_deref(), params.task)
        .await
    {
        Ok(t) => t,
        Err(e) => return transcribe_error_response(e),
    };

    tracing::info!(
        chunked = transcript.chunked,
        segments = transcript.segments.len(),
        "Transcription completed"
    );

    if params.use_cache {
        state.cache.store(fingerprint, transcript.clone());
    }

    (
        StatusCode::OK,
        Json(build_response(
            &transcript,
            &filename,
            state.settings.engine.model.clone(),
            file_size_mb,
        )),
    )
        .into_response()
}

fn build_response(
    transcript: &Transcript,
    filename: &str,
    model: String,
    file_size_mb: f64,
) -> TranscriptionResponse {
    TranscriptionResponse {
        text: transcript.text.clone(),
        language: transcript.detected_language.clone(),
        duration_seconds: transcript.duration_sec,
        chunked_processing: transcript.chunked,
        segments: transcript
            .segments
            .iter()
            .map(|s| SegmentResponse {
                start: s.start_sec,
                end: s.end_sec,
                text: s.text.clone(),
            })
            .collect(),
        metadata: ResponseMetadata {
            filename: filename.to_string(),
            model,
            file_size_mb: (file_size_mb * 100.0).round() / 100.0,
        },
    }
}

fn transcribe_error_response(err: TranscribeError) -> axum::response::Response {
    let (status, message) = match &err {
        TranscribeError::InputTooLong { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        TranscribeError::EngineUnavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Service unavailable: engine not ready".to_string(),
        ),
        TranscribeError::EngineCallFailed { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    };

    tracing::error!(error = %err, "Transcription request failed");
    (status, Json(ErrorResponse { error: message })).into_response()
}
