/// Knobs for subscriber setup, all sourced from the environment.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Filter applied when `RUST_LOG` is unset.
    pub default_directives: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            default_directives: "info,skriba=debug,tower_http=info".to_string(),
        }
    }
}
