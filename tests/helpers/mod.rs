#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use skriba::application::ports::{
    AudioNormalizer, AudioSlice, EngineError, EngineOptions, EngineOutput, NormalizeError,
    NormalizedAudio, SliceLease, TranscriptionEngine,
};
use skriba::domain::Segment;

/// Engine stub that echoes one clip-local segment `[0, slice_duration)`
/// per call and reports a configurable language sequence.
pub struct StubEngine {
    ready: bool,
    fail_on_call: Option<usize>,
    languages: Vec<String>,
    calls: AtomicUsize,
}

impl StubEngine {
    pub fn new() -> Self {
        Self {
            ready: true,
            fail_on_call: None,
            languages: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn not_ready() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    /// Fail the call with the given 0-based index.
    pub fn failing_at(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::new()
        }
    }

    pub fn with_languages(languages: &[&str]) -> Self {
        Self {
            languages: languages.iter().map(|s| s.to_string()).collect(),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptionEngine for StubEngine {
    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn transcribe(
        &self,
        audio: AudioSlice,
        _options: &EngineOptions,
    ) -> Result<EngineOutput, EngineError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_call == Some(call) {
            return Err(EngineError::TranscriptionFailed(format!(
                "stub failure on call {}",
                call
            )));
        }

        let text = format!("window {}", call);
        let language = self
            .languages
            .get(call)
            .cloned()
            .or_else(|| Some("en".to_string()));

        Ok(EngineOutput {
            text: text.clone(),
            segments: vec![Segment::new(0.0, audio.duration_sec(), text)],
            detected_language: language,
        })
    }
}

/// Normalized-audio stub at 1000 samples per second, so one sample maps
/// to one millisecond and slice durations stay exact. Every slice carries
/// a lease so tests can assert none outlive their engine call.
pub struct StubAudio {
    duration_ms: u64,
    outstanding: Arc<AtomicUsize>,
}

impl StubAudio {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            outstanding: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn outstanding_slices(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }
}

impl NormalizedAudio for StubAudio {
    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    fn slice(&self, start_ms: u64, end_ms: u64) -> AudioSlice {
        let samples = vec![0.0; (end_ms - start_ms) as usize];
        AudioSlice::with_lease(samples, 1000, SliceLease::new(Arc::clone(&self.outstanding)))
    }
}

pub struct StubNormalizer {
    pub duration_ms: u64,
    pub fail: bool,
}

impl StubNormalizer {
    pub fn with_duration(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            duration_ms: 0,
            fail: true,
        }
    }
}

#[async_trait]
impl AudioNormalizer for StubNormalizer {
    async fn normalize(
        &self,
        _raw_bytes: &[u8],
        _format_hint: Option<&str>,
    ) -> Result<Box<dyn NormalizedAudio>, NormalizeError> {
        if self.fail {
            return Err(NormalizeError::DecodingFailed("stub decode failure".to_string()));
        }
        Ok(Box::new(StubAudio::new(self.duration_ms)))
    }
}
