use crate::di::{Adapters, UseCases};
use anyhow::Context;
use ferrous_arpwatch_application::use_cases::BaselineRequest;
use ferrous_arpwatch_domain::Config;
use ferrous_arpwatch_jobs::GatewayWatchJob;
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Everything after configuration: establish the baseline, then watch until
/// `shutdown` fires. With `once` the baseline is recorded and nothing else.
///
/// Initialization failures come back as `Err`; an interrupt at any point is
/// a clean exit.
pub async fn run(
    config: &Config,
    adapters: &Adapters,
    shutdown: CancellationToken,
    once: bool,
) -> anyhow::Result<ExitCode> {
    let use_cases = UseCases::new(config, adapters);

    let request = BaselineRequest {
        gateway: config.monitor.gateway,
        expected: config.monitor.expect,
        auto_detect: config.monitor.auto_detect,
    };

    let state = tokio::select! {
        biased;
        _ = shutdown.cancelled() => return Ok(ExitCode::SUCCESS),
        result = use_cases.establish_baseline.execute(request) => {
            result.context("Failed to establish the gateway baseline")?
        }
    };

    if once {
        return Ok(ExitCode::SUCCESS);
    }

    let report = GatewayWatchJob::new(use_cases.poll_gateway.clone(), state)
        .with_interval(Duration::from_secs(config.monitor.interval_secs))
        .with_cancellation(shutdown)
        .run()
        .await;

    info!(
        gateway = %report.state.gateway_ip(),
        cycles = report.cycles,
        alerts = report.alerts,
        "Monitor stopped"
    );
    Ok(ExitCode::SUCCESS)
}
