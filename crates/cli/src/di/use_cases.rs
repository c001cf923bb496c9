use super::Adapters;
use ferrous_arpwatch_application::use_cases::{
    EstablishBaselineUseCase, PollGatewayUseCase, ResolveGatewayMacUseCase,
};
use ferrous_arpwatch_domain::Config;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct UseCases {
    pub establish_baseline: Arc<EstablishBaselineUseCase>,
    pub poll_gateway: Arc<PollGatewayUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, adapters: &Adapters) -> Self {
        let resolve = Arc::new(ResolveGatewayMacUseCase::new(
            adapters.active.clone(),
            adapters.passive.clone(),
            Duration::from_millis(config.resolver.timeout_ms),
        ));
        info!(
            active_arp = resolve.has_active(),
            timeout_ms = config.resolver.timeout_ms,
            "Resolution chain ready"
        );

        Self {
            establish_baseline: Arc::new(EstablishBaselineUseCase::new(
                resolve.clone(),
                adapters.locator.clone(),
                adapters.sink.clone(),
            )),
            poll_gateway: Arc::new(PollGatewayUseCase::new(resolve, adapters.sink.clone())),
        }
    }
}
