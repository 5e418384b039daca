mod audio_normalizer;
mod transcription_engine;

pub use audio_normalizer::{
    AudioNormalizer, AudioSlice, NormalizeError, NormalizedAudio, SliceLease,
};
pub use transcription_engine::{EngineError, EngineOptions, EngineOutput, TranscriptionEngine};
