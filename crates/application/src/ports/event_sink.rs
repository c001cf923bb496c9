use async_trait::async_trait;
use ferrous_arpwatch_domain::MonitorEvent;

#[async_trait]
pub trait EventSink: Send + Sync {
    /// Record one event as a single complete line. Write failures are the
    /// sink's own concern and never reach the monitor.
    async fn emit(&self, event: &MonitorEvent);
}
