//! Subscriber setup
//!
//! Log lines go to stderr so that command output on stdout stays
//! machine-readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::LoggingConfig;
use super::errors::{LoggingError, LoggingResult};

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG`, when set and valid, replaces the configured level.
pub fn init_logging(config: &LoggingConfig) -> LoggingResult<()> {
    let env_filter = build_env_filter(config)?;
    let subscriber = tracing_subscriber::registry().with(env_filter);

    let result = if config.json {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| LoggingError::Install(e.to_string()))
}

/// Filter from `RUST_LOG`, falling back to the configured level for this
/// crate and `tower_http`
pub fn build_env_filter(config: &LoggingConfig) -> LoggingResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(format!(
        "docpager={level},tower_http={level}",
        level = config.level
    ))
    .map_err(|e| LoggingError::InvalidLevel {
        level: config.level.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_rejected() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let err = build_env_filter(&LoggingConfig::with_level("not a level!")).unwrap_err();
        assert!(matches!(err, LoggingError::InvalidLevel { .. }));
    }

    #[test]
    fn test_known_levels_accepted() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(build_env_filter(&LoggingConfig::with_level(level)).is_ok());
        }
    }
}
