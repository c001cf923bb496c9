use ferrous_arpwatch_application::use_cases::PollGatewayUseCase;
use ferrous_arpwatch_domain::{MonitorEvent, MonitorState};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// What the watch loop hands back on shutdown. The tallies are only reported,
/// never fed back into a decision.
#[derive(Debug, Clone)]
pub struct WatchReport {
    pub state: MonitorState,
    pub cycles: u64,
    pub alerts: u64,
    pub misses: u64,
}

impl WatchReport {
    fn new(state: MonitorState) -> Self {
        Self {
            state,
            cycles: 0,
            alerts: 0,
            misses: 0,
        }
    }

    fn tally(&mut self, event: Option<&MonitorEvent>) {
        self.cycles += 1;
        match event {
            Some(MonitorEvent::ObservationMissed { .. }) => self.misses += 1,
            Some(event) if event.is_alert() => self.alerts += 1,
            _ => {}
        }
    }
}

/// Re-checks the gateway MAC every `interval` until cancelled.
///
/// The first poll happens one interval after start; the baseline read
/// covers time zero.
pub struct GatewayWatchJob {
    poll: Arc<PollGatewayUseCase>,
    state: MonitorState,
    interval: Duration,
    shutdown: CancellationToken,
}

impl GatewayWatchJob {
    pub fn new(poll: Arc<PollGatewayUseCase>, state: MonitorState) -> Self {
        Self {
            poll,
            state,
            interval: Duration::from_secs(5),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self) -> tokio::task::JoinHandle<WatchReport> {
        tokio::spawn(self.run())
    }

    /// Runs the watch loop on the current task until cancelled.
    pub async fn run(self) -> WatchReport {
        info!(
            gateway = %self.state.gateway_ip(),
            baseline = %self.state.baseline_mac(),
            interval_ms = self.interval.as_millis() as u64,
            "Starting gateway watch job"
        );

        let mut report = WatchReport::new(self.state);

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }

            // Only the network read is abandoned on shutdown; once an
            // observation exists it is recorded and emitted in full.
            let observation = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                observation = self.poll.resolve_current(&report.state) => observation,
            };

            let event = self.poll.record(&mut report.state, observation).await;
            report.tally(event.as_ref());
        }

        info!(
            cycles = report.cycles,
            alerts = report.alerts,
            misses = report.misses,
            last_observation = ?report.state.last_observation(),
            "GatewayWatchJob: shutting down"
        );
        report
    }
}
