pub mod gateway_watch;

pub use gateway_watch::{GatewayWatchJob, WatchReport};
