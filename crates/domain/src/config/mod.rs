pub mod errors;
pub mod logging;
pub mod monitor;
pub mod resolver;
pub mod root;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use monitor::MonitorConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
