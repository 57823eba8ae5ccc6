mod flash_storage;
mod led;
mod network;
mod random;
mod wifi_sta;

pub use flash_storage::{BLOCK_SIZE, FlashRegionDriver};
pub use led::configure_led;
pub use network::{NetworkInitError, init_network_stack, resolve_host};
pub use wifi_sta::{client_config, start_wifi_sta};
