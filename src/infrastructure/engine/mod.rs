mod remote_whisper_engine;

pub use remote_whisper_engine::RemoteWhisperEngine;
