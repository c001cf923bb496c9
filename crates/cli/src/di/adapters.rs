use ferrous_arpwatch_application::ports::{EventSink, GatewayLocator, MacResolver};
use ferrous_arpwatch_domain::{Config, Platform};
use ferrous_arpwatch_infrastructure::logging::LogFileEventSink;
use ferrous_arpwatch_infrastructure::system::{
    ActiveArpResolver, PassiveArpResolver, SystemCommandRunner, SystemGatewayLocator,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct Adapters {
    pub active: Option<Arc<dyn MacResolver>>,
    pub passive: Arc<dyn MacResolver>,
    pub locator: Arc<dyn GatewayLocator>,
    pub sink: Arc<dyn EventSink>,
}

impl Adapters {
    pub fn new(config: &Config) -> Self {
        let platform = Platform::current();
        let runner = Arc::new(SystemCommandRunner::new(Duration::from_millis(
            config.resolver.command_timeout_ms,
        )));

        let active: Option<Arc<dyn MacResolver>> = if config.resolver.active_enabled {
            match ActiveArpResolver::probe(
                config.resolver.interface.as_deref(),
                config.resolver.active_retries,
            ) {
                Ok(resolver) => {
                    info!("Active ARP resolution available");
                    Some(Arc::new(resolver))
                }
                Err(e) => {
                    warn!(error = %e, "Active ARP unavailable, using the OS ARP cache only");
                    None
                }
            }
        } else {
            info!("Active ARP resolution disabled");
            None
        };

        Self {
            active,
            passive: Arc::new(PassiveArpResolver::new(platform, runner.clone())),
            locator: Arc::new(SystemGatewayLocator::new(platform, runner)),
            sink: Arc::new(LogFileEventSink::new(
                config.logging.file.as_ref().map(PathBuf::from),
            )),
        }
    }
}
