use crate::ports::EventSink;
use crate::use_cases::resolution::ResolveGatewayMacUseCase;
use ferrous_arpwatch_domain::{MonitorEvent, MonitorState, ResolutionResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// Use case: one poll cycle of the gateway monitor.
///
/// A cycle has two halves. `resolve_current` only reads the network and may
/// be abandoned at any point; `record` folds the result into the state and
/// emits the event, and is meant to run to completion.
pub struct PollGatewayUseCase {
    resolve: Arc<ResolveGatewayMacUseCase>,
    sink: Arc<dyn EventSink>,
}

impl PollGatewayUseCase {
    pub fn new(resolve: Arc<ResolveGatewayMacUseCase>, sink: Arc<dyn EventSink>) -> Self {
        Self { resolve, sink }
    }

    pub async fn execute(&self, state: &mut MonitorState) -> Option<MonitorEvent> {
        let observation = self.resolve_current(state).await;
        self.record(state, observation).await
    }

    pub async fn resolve_current(&self, state: &MonitorState) -> ResolutionResult {
        self.resolve.execute(state.gateway_ip()).await
    }

    pub async fn record(
        &self,
        state: &mut MonitorState,
        observation: ResolutionResult,
    ) -> Option<MonitorEvent> {
        let event = state.observe(observation);

        match &event {
            Some(event) if event.is_alert() => {
                warn!(gateway = %state.gateway_ip(), "Gateway MAC mismatch");
                self.sink.emit(event).await;
            }
            Some(event) => {
                debug!(gateway = %state.gateway_ip(), "Poll cycle missed");
                self.sink.emit(event).await;
            }
            None => {
                debug!(gateway = %state.gateway_ip(), "Gateway MAC unchanged");
            }
        }

        event
    }
}
