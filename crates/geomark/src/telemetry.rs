use crate::config::{LogConfig, LogFormat};
use std::io;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Environment variable holding an `EnvFilter` directive; overrides both
/// the configured level and `-v`.
pub const LOG_ENV_VAR: &str = "GEOMARK_LOG";

/// Install the global subscriber, logging to stderr.
pub fn init(config: &LogConfig, verbosity: u8) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(directive(&config.level, verbosity)));

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init(),
    }
}

// Each -v raises the global level to debug, then trace. A configured plain
// level that is already more verbose wins; per-target directives are replaced.
fn directive(level: &str, verbosity: u8) -> &str {
    let raised = match verbosity {
        0 => return level,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    match level.trim().parse::<LevelFilter>() {
        Ok(configured) if configured >= raised => level,
        _ if raised == LevelFilter::TRACE => "trace",
        _ => "debug",
    }
}
