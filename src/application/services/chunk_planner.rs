use crate::domain::AudioWindow;

/// Split `[0, total_duration_ms)` into overlapping windows.
///
/// Consecutive windows advance by the stride `window_ms - overlap_ms`;
/// the loop condition is evaluated on the advance so the final partial
/// window is emitted exactly once. A zero total duration yields an empty
/// plan, which callers treat as "nothing to transcribe".
pub fn plan(total_duration_ms: u64, window_ms: u64, overlap_ms: u64) -> Vec<AudioWindow> {
    assert!(
        window_ms > overlap_ms,
        "window ({window_ms}ms) must exceed overlap ({overlap_ms}ms)"
    );

    let stride_ms = window_ms - overlap_ms;
    let mut windows = Vec::new();
    let mut position = 0u64;

    while position < total_duration_ms {
        let end = (position + window_ms).min(total_duration_ms);
        windows.push(AudioWindow {
            index: windows.len(),
            start_ms: position,
            end_ms: end,
        });
        position += stride_ms;
    }

    windows
}

/// The non-overlapping advance between consecutive windows, in seconds.
/// This is the per-window timestamp offset basis: overlapped audio is
/// transcribed twice but only advances global time once.
pub fn stride_sec(window_ms: u64, overlap_ms: u64) -> f64 {
    (window_ms - overlap_ms) as f64 / 1000.0
}
