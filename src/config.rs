#![allow(clippy::unreadable_literal)]

use embassy_time::Duration;
use wifi_led_core::indicator::legacy_ticks;
use wifi_led_core::{BlinkTiming, ProbeTarget};

pub struct WifiConfig {
    pub ssid: &'static str,
    pub password: &'static str,
}

pub struct DeviceConfig {
    pub name: &'static str,
    pub hostname: &'static str,
}

pub struct StorageConfig {
    /// Flash offset of the record region, the default `nvs` partition
    pub offset: u32,
}

pub struct FirmwareConfig {
    pub version: &'static str,
}

pub const WIFI: WifiConfig = WifiConfig {
    ssid: match option_env!("WIFI_SSID") {
        Some(ssid) => ssid,
        None => "your_ssid",
    },
    password: match option_env!("WIFI_PASSWORD") {
        Some(password) => password,
        None => "your_password",
    },
};

pub const DEVICE: DeviceConfig = DeviceConfig {
    name: "wifi_led_example",
    hostname: "wifi-led",
};

pub const STORAGE: StorageConfig = StorageConfig { offset: 0x9000 };

pub const FIRMWARE: FirmwareConfig = FirmwareConfig {
    version: env!("BUILD_VERSION"),
};

/// Indicator delays of the blink-only firmware.
pub const BLINK_TIMING: BlinkTiming =
    BlinkTiming::new(Duration::from_millis(500), Duration::from_secs(1));

/// Indicator delays of the probe firmware.
///
/// Its blink delay was written as a raw `1000` scheduler ticks, which is 10 s
/// at the default 100 Hz tick rate, not the 1 s the other delays use.
pub const PROBE_BLINK_TIMING: BlinkTiming =
    BlinkTiming::new(legacy_ticks(1000), Duration::from_secs(1));

pub const HTTP_TARGET: ProbeTarget = ProbeTarget::new("example.com", 80, "/");

#[macro_export]
macro_rules! led_gpio {
    ($p:expr) => {
        $p.GPIO2
    };
}
