use async_trait::async_trait;
use ferrous_arpwatch_domain::ResolutionResult;
use std::net::Ipv4Addr;
use std::time::Duration;

/// A strategy that maps an IPv4 address to the hardware address claiming it.
///
/// Implementations never fail: command errors, missing binaries, timeouts and
/// parse failures are all reported as `ResolutionResult::Unresolved`.
#[async_trait]
pub trait MacResolver: Send + Sync {
    fn name(&self) -> &'static str;

    async fn resolve(&self, ip: Ipv4Addr, timeout: Duration) -> ResolutionResult;
}
