//! Logging setup

use fanout_events::LoggingConfig;
use tracing::Level;

/// Map a level name to a tracing level, falling back to `INFO`
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the stderr subscriber
///
/// `override_level` (from the command line) wins over the configured level.
pub fn init_logging(config: &LoggingConfig, override_level: Option<&str>) -> anyhow::Result<()> {
    let level = parse_level(override_level.unwrap_or(config.level.as_str()));
    let verbose = level >= Level::DEBUG;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(verbose)
        .with_file(verbose)
        .with_line_number(verbose)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
