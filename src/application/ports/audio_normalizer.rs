use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

/// Decodes an arbitrary container/codec into a canonical PCM handle
/// suitable for slicing. Pure transformation, no state.
#[async_trait]
pub trait AudioNormalizer: Send + Sync {
    async fn normalize(
        &self,
        raw_bytes: &[u8],
        format_hint: Option<&str>,
    ) -> Result<Box<dyn NormalizedAudio>, NormalizeError>;
}

/// Canonical decoded audio: fixed sample rate, mono.
pub trait NormalizedAudio: Send + Sync {
    fn duration_ms(&self) -> u64;

    /// Materialize the samples for `[start_ms, end_ms)`. The returned
    /// slice owns its data and is released when dropped, so per-window
    /// slices never accumulate across a chunked run.
    fn slice(&self, start_ms: u64, end_ms: u64) -> AudioSlice;
}

/// An owned run of PCM samples handed to the engine for one call.
pub struct AudioSlice {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    _lease: Option<SliceLease>,
}

impl AudioSlice {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            _lease: None,
        }
    }

    /// Attach a lease so the producer can account for outstanding slices.
    pub fn with_lease(samples: Vec<f32>, sample_rate: u32, lease: SliceLease) -> Self {
        Self {
            samples,
            sample_rate,
            _lease: Some(lease),
        }
    }

    pub fn duration_sec(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Accounting handle for one outstanding [`AudioSlice`]. The shared count
/// goes up on creation and back down when the slice is dropped, on every
/// exit path.
pub struct SliceLease {
    outstanding: Arc<AtomicUsize>,
}

impl SliceLease {
    pub fn new(outstanding: Arc<AtomicUsize>) -> Self {
        outstanding.fetch_add(1, Ordering::SeqCst);
        Self { outstanding }
    }
}

impl Drop for SliceLease {
    fn drop(&mut self) {
        self.outstanding.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
}
