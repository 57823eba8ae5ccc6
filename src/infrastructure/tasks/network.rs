use embassy_futures::select::{Either, select};
use embassy_net::{Runner, Stack};
use esp_radio::wifi::{ModeConfig, WifiController, WifiDevice, WifiError, WifiEvent};
use log::{error, info, warn};
use wifi_led_core::{
    ConnectionState, ConnectionStatus, LinkAction, LinkCoordinator, LinkEvent, reconnect_pause,
};

use crate::config;
use crate::infrastructure::drivers::client_config;

/// Background task for connecting to the `WiFi` network
///
/// Every radio event goes through one [`LinkCoordinator`]: a dropped link is
/// retried immediately and without limit, the station counts as connected
/// once DHCP hands out an address.
#[embassy_executor::task]
pub async fn wifi_connection_task(
    mut controller: WifiController<'static>,
    stack: Stack<'static>,
    status: &'static ConnectionStatus,
) {
    let mut coordinator = LinkCoordinator::new(status);

    if let Err(e) = start_station(&mut controller).await {
        error!("wifi: failed to start station: {:?}", e);
        return;
    }

    let mut event = LinkEvent::StationStarted;
    loop {
        if let Some(LinkAction::Connect) = coordinator.dispatch(event) {
            if let Err(e) = controller.connect_async().await {
                warn!("wifi: connect failed: {:?}", e);
                reconnect_pause().await;
                event = LinkEvent::LinkDropped;
                continue;
            }
        }

        if event == LinkEvent::AddressAcquired {
            if let Some(v4) = stack.config_v4() {
                info!("wifi: got IP {}", v4.address);
            }
        }

        event = next_event(&mut controller, stack, coordinator.state()).await;
    }
}

async fn start_station(controller: &mut WifiController<'static>) -> Result<(), WifiError> {
    info!("wifi: starting station for {}", config::WIFI.ssid);
    let mode_config = ModeConfig::Client(client_config(&config::WIFI));
    controller.set_config(&mode_config)?;
    controller.start_async().await
}

/// Wait for the radio or the stack to report the next link change.
async fn next_event(
    controller: &mut WifiController<'static>,
    stack: Stack<'static>,
    state: ConnectionState,
) -> LinkEvent {
    match state {
        ConnectionState::Connected => {
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            LinkEvent::LinkDropped
        }
        ConnectionState::Disconnected => {
            match select(
                controller.wait_for_event(WifiEvent::StaDisconnected),
                stack.wait_config_up(),
            )
            .await
            {
                Either::First(()) => LinkEvent::LinkDropped,
                Either::Second(()) => LinkEvent::AddressAcquired,
            }
        }
    }
}

/// Background task for running the network stack
#[embassy_executor::task]
pub async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}
