use serde::Serialize;

/// One timestamped utterance span within a transcript.
///
/// The engine emits segments in window-local time; the orchestrator
/// rewrites `start_sec`/`end_sec` into global time before the segment
/// reaches a [`Transcript`](super::Transcript).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub start_sec: f64,
    pub end_sec: f64,
    pub text: String,
}

impl Segment {
    pub fn new(start_sec: f64, end_sec: f64, text: impl Into<String>) -> Self {
        Self {
            start_sec,
            end_sec,
            text: text.into(),
        }
    }

    /// Returns a copy shifted forward by `offset_sec` global seconds.
    pub fn offset_by(&self, offset_sec: f64) -> Self {
        Self {
            start_sec: self.start_sec + offset_sec,
            end_sec: self.end_sec + offset_sec,
            text: self.text.clone(),
        }
    }
}
