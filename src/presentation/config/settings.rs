use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub engine: EngineSettings,
    pub transcription: TranscriptionSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Transcription requests admitted per minute, shared across all
    /// clients. Requests beyond the budget are rejected with 429.
    pub rate_limit_per_minute: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
    /// Engine invocations known to be safe concurrently. One unless the
    /// concrete engine is verified otherwise.
    pub concurrency: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub single_call_threshold_secs: u64,
    pub window_ms: u64,
    pub overlap_ms: u64,
    pub max_duration_secs: u64,
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub ttl_secs: u64,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: env_or("HOST", "0.0.0.0"),
                port: env_parse_or("PORT", 8082),
                rate_limit_per_minute: env_parse_or("RATE_LIMIT_PER_MINUTE", 10),
            },
            engine: EngineSettings {
                api_key: std::env::var("WHISPER_API_KEY")
                    .or_else(|_| std::env::var("OPENAI_API_KEY"))
                    .unwrap_or_default(),
                base_url: std::env::var("WHISPER_BASE_URL").ok(),
                model: env_or("WHISPER_MODEL", "whisper-1"),
                concurrency: env_parse_or("ENGINE_CONCURRENCY", 1),
            },
            transcription: TranscriptionSettings {
                single_call_threshold_secs: env_parse_or("SINGLE_CALL_THRESHOLD_SECS", 5 * 60),
                window_ms: env_parse_or("WINDOW_MS", 10 * 60 * 1000),
                overlap_ms: env_parse_or("OVERLAP_MS", 1000),
                max_duration_secs: env_parse_or("MAX_DURATION_SECS", 4 * 60 * 60),
                max_file_size_mb: env_parse_or("MAX_FILE_SIZE_MB", 100),
            },
            cache: CacheSettings {
                ttl_secs: env_parse_or("CACHE_TTL_SECS", 3600),
            },
        }
    }

    /// Reject inconsistent configuration up front, at startup, instead of
    /// letting a bad window/overlap pair surface per-request inside the
    /// orchestrator.
    pub fn validate(&self) -> Result<(), String> {
        let t = &self.transcription;
        if t.window_ms == 0 {
            return Err("window duration must be positive".to_string());
        }
        if t.overlap_ms >= t.window_ms {
            return Err(format!(
                "overlap ({}ms) must be smaller than the window ({}ms)",
                t.overlap_ms, t.window_ms
            ));
        }
        if t.single_call_threshold_secs > t.max_duration_secs {
            return Err(format!(
                "single-call threshold ({}s) exceeds the duration ceiling ({}s)",
                t.single_call_threshold_secs, t.max_duration_secs
            ));
        }
        if self.server.rate_limit_per_minute == 0 {
            return Err("rate limit must admit at least one request per minute".to_string());
        }
        Ok(())
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
