mod pcm_normalizer;

pub use pcm_normalizer::{PcmAudio, PcmNormalizer, TARGET_SAMPLE_RATE};
