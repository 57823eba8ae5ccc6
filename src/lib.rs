#![no_std]

#[macro_export]
// Create a static cell for a given type and value
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}

pub mod config;
pub mod infrastructure;

use wifi_led_core::ConnectionStatus;

/// Station link status shared by the Wi-Fi, indicator and probe tasks.
pub static CONNECTION_STATUS: ConnectionStatus = ConnectionStatus::new();
