mod audio_window;
mod fingerprint;
mod segment;
mod task;
mod transcript;

pub use audio_window::AudioWindow;
pub use fingerprint::Fingerprint;
pub use segment::Segment;
pub use task::TranscriptionTask;
pub use transcript::Transcript;
