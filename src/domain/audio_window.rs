/// A planned slice of the source audio, half-open `[start_ms, end_ms)`.
///
/// Windows are produced in strictly increasing `index` order and adjacent
/// windows overlap by the configured overlap duration; only the final
/// window may be shorter than the nominal window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioWindow {
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl AudioWindow {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}
