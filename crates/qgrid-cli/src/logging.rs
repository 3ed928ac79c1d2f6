//! Log subscriber setup. Everything goes to stderr; stdout carries only command output.

use tracing_subscriber::EnvFilter;

use qgrid_core::config::LoggingConfig;

/// Install the global subscriber.
///
/// `-v` flags take precedence over the configured level.
pub fn init(verbose: u8, config: &LoggingConfig) {
    let filter = match verbose {
        0 => config.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr);

    if config.format == "json" {
        builder.json().with_current_span(true).init();
    } else {
        builder.with_target(false).init();
    }
}
