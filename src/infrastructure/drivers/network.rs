use core::str::FromStr;

use embassy_net::{DhcpConfig, IpAddress, Runner, Stack, StackResources, dns::DnsQueryType};
use esp_hal::peripherals::WIFI;
use esp_radio::InitializationError;
use esp_radio::wifi::{Config as RadioConfig, WifiController, WifiDevice, WifiError};
use heapless::String;
use log::warn;

use super::random::get_seed;
use crate::config;

/// DHCP, DNS and one TCP socket, with headroom.
const MAX_CONNECTIONS: usize = 6;

#[derive(Debug)]
pub enum NetworkInitError {
    /// Radio driver failed to come up
    Radio(InitializationError),
    /// Wi-Fi driver rejected the station interface
    Wifi(WifiError),
}

impl From<InitializationError> for NetworkInitError {
    fn from(error: InitializationError) -> Self {
        NetworkInitError::Radio(error)
    }
}

impl From<WifiError> for NetworkInitError {
    fn from(error: WifiError) -> Self {
        NetworkInitError::Wifi(error)
    }
}

/// Bring up the radio and an embassy-net stack on the station interface.
///
/// The stack is configured for DHCPv4 and announces the device hostname.
pub fn init_network_stack(
    wifi_device: WIFI<'static>,
) -> Result<
    (
        Stack<'static>,
        Runner<'static, WifiDevice<'static>>,
        WifiController<'static>,
    ),
    NetworkInitError,
> {
    let radio = &*crate::mk_static!(esp_radio::Controller<'static>, esp_radio::init()?);
    let (controller, interfaces) = esp_radio::wifi::new(radio, wifi_device, RadioConfig::default())?;

    let mut dhcp_config = DhcpConfig::default();
    dhcp_config.hostname = String::from_str(config::DEVICE.hostname).ok();
    if dhcp_config.hostname.is_none() {
        warn!("network: hostname {} is too long, not announced", config::DEVICE.hostname);
    }
    let net_config = embassy_net::Config::dhcpv4(dhcp_config);

    let resources = crate::mk_static!(
        StackResources<MAX_CONNECTIONS>,
        StackResources::<MAX_CONNECTIONS>::new()
    );
    let (stack, runner) = embassy_net::new(interfaces.sta, net_config, resources, get_seed());

    Ok((stack, runner, controller))
}

/// Resolves a hostname to an IP address
pub async fn resolve_host(stack: Stack<'static>, host: &str) -> Result<IpAddress, ()> {
    if let Ok(ip) = host.parse::<embassy_net::Ipv4Address>() {
        return Ok(IpAddress::Ipv4(ip));
    }

    let addresses = match stack.dns_query(host, DnsQueryType::A).await {
        Ok(addresses) => addresses,
        Err(e) => {
            warn!("network: DNS query for {} failed: {:?}", host, e);
            return Err(());
        }
    };

    addresses.first().copied().ok_or(())
}
