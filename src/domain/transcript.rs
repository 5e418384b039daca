use super::Segment;

/// The final result of one transcription request. Immutable once returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    /// Space-joined trimmed per-window texts, in window order.
    pub text: String,
    /// Segments in global time, ordered by window processing order.
    pub segments: Vec<Segment>,
    pub detected_language: Option<String>,
    pub duration_sec: f64,
    /// Which code path produced this transcript.
    pub chunked: bool,
}
