use clap::Parser;
use ferrous_arpwatch_domain::{CliOverrides, MacAddress};
use std::net::Ipv4Addr;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod app;
mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "ferrous-arpwatch")]
#[command(version)]
#[command(about = "Ferrous ARP Watch - alert when the default gateway's MAC address changes")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Gateway IPv4 address to monitor
    #[arg(long, value_name = "IP")]
    gateway: Option<Ipv4Addr>,

    /// Seconds between checks (default 5)
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// Expected gateway MAC; any other observation raises an alert
    #[arg(long, value_name = "MAC")]
    expect: Option<MacAddress>,

    /// Append events to this file as well as stdout
    #[arg(long, value_name = "PATH")]
    log: Option<String>,

    /// Record the baseline and exit
    #[arg(long)]
    once: bool,

    /// Detect the default gateway when --gateway is not given
    #[arg(long)]
    auto_detect: bool,

    /// Interface used for live ARP requests
    #[arg(long, value_name = "NAME")]
    interface: Option<String>,

    /// Only read the OS ARP cache, never send ARP requests
    #[arg(long)]
    passive_only: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        gateway: cli.gateway,
        interval_secs: cli.interval,
        expect: cli.expect,
        auto_detect: cli.auto_detect,
        interface: cli.interface.clone(),
        passive_only: cli.passive_only,
        log_file: cli.log.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = match bootstrap::load_config(cli.config.as_deref(), cli_overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    bootstrap::init_logging(&config);
    bootstrap::log_startup(&config);

    let adapters = di::Adapters::new(&config);

    let shutdown = CancellationToken::new();
    let interrupt = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down");
            interrupt.cancel();
        }
    });

    app::run(&config, &adapters, shutdown, cli.once).await
}
