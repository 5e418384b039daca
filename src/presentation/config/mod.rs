mod settings;

pub use settings::{
    CacheSettings, EngineSettings, ServerSettings, Settings, TranscriptionSettings,
};
