use embassy_net::Stack;
use log::{error, info};
use wifi_led_core::{ConnectionStatus, HttpProbe, ResponseSink};

use crate::config;
use crate::infrastructure::services::{ConsoleSink, StackProbeNetwork};

/// One-shot HTTP GET, issued once the station first gets an address.
#[embassy_executor::task]
pub async fn http_probe_task(stack: Stack<'static>, status: &'static ConnectionStatus) {
    let Some(mut subscriber) = status.subscribe() else {
        error!("probe: no connection status subscriber left");
        return;
    };

    info!("probe: waiting for Wi-Fi");
    subscriber.wait_connected().await;
    drop(subscriber);

    let mut network = StackProbeNetwork::new(stack);
    let mut console = ConsoleSink;
    // failures are logged by the probe itself
    if let Ok(report) = HttpProbe::new(config::HTTP_TARGET)
        .run(&mut network, &mut console)
        .await
    {
        console.write_chunk(b"\r\n");
        info!(
            "probe: done, status {:?}, {} bytes, {}",
            report.status,
            report.bytes_received,
            if report.closed_by_peer {
                "closed by peer"
            } else {
                "read aborted"
            }
        );
    }
}
