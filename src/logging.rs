//! Logging setup
//!
//! Fetch failures and discarded responses are reported as `tracing` events;
//! this installs the subscriber that prints them. Output goes to stderr so
//! rendered tables and JSON on stdout stay clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("energy_dashboard={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Run `f` with a temporary stderr subscriber at the default level
///
/// For work that has to happen before the configured subscriber can be
/// built, such as loading the config file itself.
pub fn with_bootstrap_logging<T>(f: impl FnOnce() -> T) -> T {
    let defaults = LoggingConfig::default();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("energy_dashboard={}", defaults.level)));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_logging_returns_result() {
        let config = with_bootstrap_logging(|| {
            tracing::warn!("emitted under the bootstrap subscriber");
            LoggingConfig::default()
        });
        assert_eq!(config.level, "info");
    }
}
