mod helpers;

use std::sync::Arc;

use skriba::application::services::{ChunkingConfig, TranscribeError, TranscriptionService};
use skriba::domain::TranscriptionTask;

use helpers::{StubAudio, StubEngine};

fn service(engine: Arc<StubEngine>) -> TranscriptionService<StubEngine> {
    TranscriptionService::new(engine, ChunkingConfig::default(), 1)
}

#[tokio::test]
async fn short_audio_takes_the_single_call_path() {
    let engine = Arc::new(StubEngine::new());
    let audio = StubAudio::new(60_000);

    let transcript = service(Arc::clone(&engine))
        .transcribe(&audio, None, TranscriptionTask::Transcribe)
        .await
        .unwrap();

    assert_eq!(engine.calls(), 1);
    assert!(!transcript.chunked);
    assert_eq!(transcript.text, "window 0");
    assert_eq!(transcript.segments.len(), 1);
    // Engine output passes through unmodified: no offset applied.
    assert_eq!(transcript.segments[0].start_sec, 0.0);
    assert_eq!(transcript.segments[0].end_sec, 60.0);
    assert_eq!(transcript.detected_language.as_deref(), Some("en"));
    assert_eq!(transcript.duration_sec, 60.0);
    assert_eq!(audio.outstanding_slices(), 0);
}

#[tokio::test]
async fn long_audio_is_windowed_and_merged_with_stride_offsets() {
    let engine = Arc::new(StubEngine::new());
    // 20 minutes and change: windows [0,600s) [599s,1199s) [1198s,1205s)
    let audio = StubAudio::new(1_205_000);

    let transcript = service(Arc::clone(&engine))
        .transcribe(&audio, None, TranscriptionTask::Transcribe)
        .await
        .unwrap();

    assert_eq!(engine.calls(), 3);
    assert!(transcript.chunked);
    assert_eq!(transcript.text, "window 0 window 1 window 2");
    assert_eq!(transcript.segments.len(), 3);

    // Each window's segments shift by index * stride (599 s), not by the
    // window's raw start.
    let stride = 599.0;
    for (i, segment) in transcript.segments.iter().enumerate() {
        assert_eq!(segment.start_sec, i as f64 * stride, "window {i}");
    }
    assert_eq!(transcript.segments[0].end_sec, 600.0);
    assert_eq!(transcript.segments[1].end_sec, 599.0 + 600.0);
    assert_eq!(transcript.segments[2].end_sec, 1198.0 + 7.0);

    assert_eq!(audio.outstanding_slices(), 0);
}

#[tokio::test]
async fn segment_order_follows_window_order() {
    let engine = Arc::new(StubEngine::new());
    let audio = StubAudio::new(1_800_000);

    let transcript = service(engine)
        .transcribe(&audio, None, TranscriptionTask::Transcribe)
        .await
        .unwrap();

    for pair in transcript.segments.windows(2) {
        assert!(pair[0].start_sec <= pair[1].start_sec);
    }
}

#[tokio::test]
async fn one_failed_window_aborts_without_leaking_slices() {
    let engine = Arc::new(StubEngine::failing_at(1));
    let audio = StubAudio::new(1_205_000);

    let err = service(Arc::clone(&engine))
        .transcribe(&audio, None, TranscriptionTask::Transcribe)
        .await
        .unwrap_err();

    match err {
        TranscribeError::EngineCallFailed { window, .. } => assert_eq!(window, 1),
        other => panic!("expected EngineCallFailed, got {other:?}"),
    }
    // Windows 0 and 1 were attempted, window 2 never reached.
    assert_eq!(engine.calls(), 2);
    assert_eq!(audio.outstanding_slices(), 0);
}

#[tokio::test]
async fn audio_over_the_ceiling_is_rejected_before_any_engine_call() {
    let engine = Arc::new(StubEngine::new());
    // Five hours, over the four-hour ceiling.
    let audio = StubAudio::new(5 * 60 * 60 * 1000);

    let err = service(Arc::clone(&engine))
        .transcribe(&audio, None, TranscriptionTask::Transcribe)
        .await
        .unwrap_err();

    assert!(matches!(err, TranscribeError::InputTooLong { .. }));
    assert_eq!(engine.calls(), 0);
    assert_eq!(audio.outstanding_slices(), 0);
}

#[tokio::test]
async fn unready_engine_is_reported_as_unavailable() {
    let engine = Arc::new(StubEngine::not_ready());
    let audio = StubAudio::new(60_000);

    let err = service(Arc::clone(&engine))
        .transcribe(&audio, None, TranscriptionTask::Transcribe)
        .await
        .unwrap_err();

    assert!(matches!(err, TranscribeError::EngineUnavailable));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn detected_language_is_the_majority_across_windows() {
    let engine = Arc::new(StubEngine::with_languages(&["en", "es", "es"]));
    let audio = StubAudio::new(1_205_000);

    let transcript = service(engine)
        .transcribe(&audio, None, TranscriptionTask::Transcribe)
        .await
        .unwrap();

    assert_eq!(transcript.detected_language.as_deref(), Some("es"));
}

#[tokio::test]
async fn language_ties_resolve_to_the_first_seen() {
    let engine = Arc::new(StubEngine::with_languages(&["de", "fr"]));
    // Two windows: just over the nominal window length.
    let audio = StubAudio::new(700_000);

    let transcript = service(engine)
        .transcribe(&audio, None, TranscriptionTask::Transcribe)
        .await
        .unwrap();

    assert_eq!(transcript.detected_language.as_deref(), Some("de"));
}
