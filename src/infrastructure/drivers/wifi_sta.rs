use embassy_executor::Spawner;
use embassy_net::Stack;
use esp_hal::peripherals::WIFI;
use esp_radio::wifi::{AuthMethod, ClientConfig};
use wifi_led_core::ConnectionStatus;

use super::network::{NetworkInitError, init_network_stack};
use crate::config::WifiConfig;
use crate::infrastructure::tasks::{network_runner_task, wifi_connection_task};

/// Station credentials for the radio driver.
///
/// An empty password selects an open network. Otherwise the driver default
/// applies, which accepts WPA2-Personal and stronger.
pub fn client_config(wifi: &WifiConfig) -> ClientConfig {
    if wifi.password.is_empty() {
        ClientConfig::default()
            .with_ssid(wifi.ssid.into())
            .with_auth_method(AuthMethod::None)
    } else {
        ClientConfig::default()
            .with_ssid(wifi.ssid.into())
            .with_password(wifi.password.into())
    }
}

/// Start the Wi-Fi STA (Station) mode
///
/// Spawns the connection and stack runner tasks and returns right away; the
/// link state is reported through `status`.
pub fn start_wifi_sta(
    spawner: Spawner,
    wifi_device: WIFI<'static>,
    status: &'static ConnectionStatus,
) -> Result<Stack<'static>, NetworkInitError> {
    let (stack, runner, controller) = init_network_stack(wifi_device)?;

    spawner
        .spawn(wifi_connection_task(controller, stack, status))
        .ok();
    spawner.spawn(network_runner_task(runner)).ok();

    Ok(stack)
}
