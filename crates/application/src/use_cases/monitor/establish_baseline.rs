use crate::ports::{EventSink, GatewayLocator};
use crate::use_cases::resolution::ResolveGatewayMacUseCase;
use ferrous_arpwatch_domain::{
    DomainError, MacAddress, MonitorEvent, MonitorState, ResolutionResult,
};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct BaselineRequest {
    pub gateway: Option<Ipv4Addr>,
    pub expected: Option<MacAddress>,
    pub auto_detect: bool,
}

/// Use case: pick the gateway and record its MAC as the monitoring baseline.
///
/// Fails only with initialization errors (`NoGatewayAddress`,
/// `GatewayMacUnresolved`); there is nothing to monitor in either case.
pub struct EstablishBaselineUseCase {
    resolve: Arc<ResolveGatewayMacUseCase>,
    locator: Arc<dyn GatewayLocator>,
    sink: Arc<dyn EventSink>,
}

impl EstablishBaselineUseCase {
    pub fn new(
        resolve: Arc<ResolveGatewayMacUseCase>,
        locator: Arc<dyn GatewayLocator>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            resolve,
            locator,
            sink,
        }
    }

    pub async fn execute(&self, request: BaselineRequest) -> Result<MonitorState, DomainError> {
        let mut gateway_ip = match request.gateway {
            Some(ip) => ip,
            None if request.auto_detect => {
                let ip = self
                    .locator
                    .detect_default_gateway()
                    .await
                    .ok_or(DomainError::NoGatewayAddress)?;
                self.sink.emit(&MonitorEvent::GatewayAutoDetected { ip }).await;
                ip
            }
            None => return Err(DomainError::NoGatewayAddress),
        };

        let mut result = self.resolve.execute(gateway_ip).await;

        if !result.is_resolved() && request.auto_detect {
            match self.locator.detect_default_gateway().await {
                Some(detected) if detected != gateway_ip => {
                    self.sink
                        .emit(&MonitorEvent::RetryingWithDetectedGateway { ip: detected })
                        .await;
                    gateway_ip = detected;
                    result = self.resolve.execute(gateway_ip).await;
                }
                _ => {}
            }
        }

        let baseline = match result {
            ResolutionResult::Resolved(mac) => mac,
            ResolutionResult::Unresolved => {
                self.sink
                    .emit(&MonitorEvent::BaselineUnresolved { ip: gateway_ip })
                    .await;
                return Err(DomainError::GatewayMacUnresolved(gateway_ip));
            }
        };

        let state = MonitorState::established(gateway_ip, baseline, request.expected);
        info!(gateway = %gateway_ip, baseline = %baseline, "Baseline established");

        self.sink
            .emit(&MonitorEvent::BaselineEstablished {
                ip: gateway_ip,
                mac: baseline,
            })
            .await;

        if let Some(alert) = state.initial_alert() {
            warn!(gateway = %gateway_ip, "Gateway MAC differs from expected value");
            self.sink.emit(&alert).await;
        }

        Ok(state)
    }
}
