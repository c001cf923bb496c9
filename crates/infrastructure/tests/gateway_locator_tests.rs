use ferrous_arpwatch_application::ports::GatewayLocator;
use ferrous_arpwatch_domain::Platform;
use ferrous_arpwatch_infrastructure::system::SystemGatewayLocator;
use std::io::Write;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tempfile::NamedTempFile;

mod helpers;
use helpers::ScriptedCommandRunner;

#[tokio::test]
async fn test_linux_default_route() {
    let runner = Arc::new(
        ScriptedCommandRunner::new()
            .on(
                "ip route show default",
                "default via 192.168.1.1 dev wlan0 proto dhcp metric 600\n",
            )
            .await,
    );
    let locator = SystemGatewayLocator::new(Platform::Linux, runner)
        .with_route_table_path("/nonexistent/proc/net/route");

    assert_eq!(
        locator.detect_default_gateway().await,
        Some(Ipv4Addr::new(192, 168, 1, 1))
    );
}

#[tokio::test]
async fn test_linux_falls_back_to_route_table() {
    let mut table = NamedTempFile::new().unwrap();
    // The kernel prints the gateway word in host byte order.
    let gateway = u32::from_ne_bytes([10, 0, 0, 1]);
    write!(
        table,
        "Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT\n\
         eth0\t00000000\t{:08X}\t0003\t0\t0\t0\t00000000\t0\t0\t0\n",
        gateway
    )
    .unwrap();
    table.flush().unwrap();

    let runner = Arc::new(ScriptedCommandRunner::new());
    let locator =
        SystemGatewayLocator::new(Platform::Linux, runner).with_route_table_path(table.path());

    assert_eq!(
        locator.detect_default_gateway().await,
        Some(Ipv4Addr::new(10, 0, 0, 1))
    );
}

#[tokio::test]
async fn test_linux_nothing_found() {
    let runner = Arc::new(ScriptedCommandRunner::new().on("ip route show default", "").await);
    let locator = SystemGatewayLocator::new(Platform::Linux, runner)
        .with_route_table_path("/nonexistent/proc/net/route");

    assert_eq!(locator.detect_default_gateway().await, None);
}

#[tokio::test]
async fn test_macos_route_get_default() {
    let runner = Arc::new(
        ScriptedCommandRunner::new()
            .on(
                "/usr/sbin/route -n get default",
                "   route to: default\ndestination: default\n       mask: default\n    gateway: 10.0.0.138\n  interface: en0\n",
            )
            .await,
    );
    let locator = SystemGatewayLocator::new(Platform::MacOs, runner);

    assert_eq!(
        locator.detect_default_gateway().await,
        Some(Ipv4Addr::new(10, 0, 0, 138))
    );
}

#[tokio::test]
async fn test_windows_next_hop() {
    let runner = ScriptedCommandRunner::new()
        .on(
            "powershell -NoProfile -Command (Get-NetIPConfiguration | Where-Object { $_.IPv4DefaultGateway } | Select-Object -First 1).IPv4DefaultGateway.NextHop",
            "192.168.0.1\r\n",
        )
        .await;
    let locator = SystemGatewayLocator::new(Platform::Windows, Arc::new(runner));

    assert_eq!(
        locator.detect_default_gateway().await,
        Some(Ipv4Addr::new(192, 168, 0, 1))
    );
}

#[tokio::test]
async fn test_windows_garbage_output_is_none() {
    let runner = Arc::new(ScriptedCommandRunner::new());
    let locator = SystemGatewayLocator::new(Platform::Windows, runner);

    assert_eq!(locator.detect_default_gateway().await, None);
}
