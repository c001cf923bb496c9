mod logging;

pub use logging::init_logging;

use ferrous_arpwatch_domain::{CliOverrides, Config, ConfigError};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> Result<Config, ConfigError> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn log_startup(config: &Config) {
    info!(
        gateway = ?config.monitor.gateway,
        interval_secs = config.monitor.interval_secs,
        expect = ?config.monitor.expect,
        auto_detect = config.monitor.auto_detect,
        active_enabled = config.resolver.active_enabled,
        event_log = ?config.logging.file,
        "Starting Ferrous ARP Watch v{}",
        env!("CARGO_PKG_VERSION")
    );
}
