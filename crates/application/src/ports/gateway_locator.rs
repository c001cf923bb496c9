use async_trait::async_trait;
use std::net::Ipv4Addr;

#[async_trait]
pub trait GatewayLocator: Send + Sync {
    /// Best effort: `None` on any failure.
    async fn detect_default_gateway(&self) -> Option<Ipv4Addr>;
}
