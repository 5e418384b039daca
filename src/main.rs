use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use skriba::application::services::{ChunkingConfig, ResultCache, TranscriptionService};
use skriba::infrastructure::audio::PcmNormalizer;
use skriba::infrastructure::engine::RemoteWhisperEngine;
use skriba::infrastructure::observability::{init_tracing, TracingConfig};
use skriba::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    settings.validate().map_err(anyhow::Error::msg)?;

    init_tracing(TracingConfig::default(), settings.server.port);

    if settings.engine.api_key.is_empty() {
        tracing::warn!("No engine API key configured; transcription requests will be rejected");
    }

    let engine = Arc::new(RemoteWhisperEngine::new(
        settings.engine.api_key.clone(),
        settings.engine.base_url.clone(),
        Some(settings.engine.model.clone()),
    ));
    let normalizer = Arc::new(PcmNormalizer);
    let cache = Arc::new(ResultCache::new(Duration::from_secs(
        settings.cache.ttl_secs,
    )));

    let chunking = ChunkingConfig {
        single_call_threshold_sec: settings.transcription.single_call_threshold_secs,
        window_ms: settings.transcription.window_ms,
        overlap_ms: settings.transcription.overlap_ms,
        max_duration_sec: settings.transcription.max_duration_secs,
    };
    let transcription_service = Arc::new(TranscriptionService::new(
        Arc::clone(&engine),
        chunking,
        settings.engine.concurrency,
    ));

    let host: std::net::IpAddr = settings.server.host.parse()?;
    let addr = SocketAddr::new(host, settings.server.port);

    let state = AppState {
        engine,
        normalizer,
        transcription_service,
        cache,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
