use crate::ports::MacResolver;
use ferrous_arpwatch_domain::ResolutionResult;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Use case: resolve the MAC currently bound to an IP.
///
/// The active resolver (live ARP request) is asked first when it passed its
/// startup probe; the passive resolver (OS cache) is consulted only when the
/// active one comes back empty. No retries happen here.
pub struct ResolveGatewayMacUseCase {
    active: Option<Arc<dyn MacResolver>>,
    passive: Arc<dyn MacResolver>,
    timeout: Duration,
}

impl ResolveGatewayMacUseCase {
    pub fn new(
        active: Option<Arc<dyn MacResolver>>,
        passive: Arc<dyn MacResolver>,
        timeout: Duration,
    ) -> Self {
        Self {
            active,
            passive,
            timeout,
        }
    }

    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    pub async fn execute(&self, ip: Ipv4Addr) -> ResolutionResult {
        if let Some(active) = &self.active {
            let result = active.resolve(ip, self.timeout).await;
            if let ResolutionResult::Resolved(mac) = result {
                debug!(ip = %ip, mac = %mac, resolver = active.name(), "MAC resolved");
                return result;
            }
            debug!(ip = %ip, resolver = active.name(), "No answer, falling back");
        }

        let result = self.passive.resolve(ip, self.timeout).await;
        match result {
            ResolutionResult::Resolved(mac) => {
                debug!(ip = %ip, mac = %mac, resolver = self.passive.name(), "MAC resolved");
            }
            ResolutionResult::Unresolved => {
                debug!(ip = %ip, "MAC unresolved by every strategy");
            }
        }
        result
    }
}
