use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use super::TracingConfig;

/// Install the global subscriber. `RUST_LOG` overrides the configured
/// default directives. JSON output flattens event fields for log
/// collectors; the plain format stays compact for local runs.
pub fn init_tracing(config: TracingConfig, port: u16) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_directives));

    if config.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().flatten_event(true).with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(true))
            .init();
    }

    tracing::info!(
        port,
        environment = %config.environment,
        json = config.json_format,
        "Logging initialized"
    );
}
