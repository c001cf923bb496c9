use ferrous_arpwatch_domain::Config;
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr; stdout carries only the event stream.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
