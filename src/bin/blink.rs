//! Blink Firmware
//!
//! Joins the configured Wi-Fi network as a station:
//! - Blinks the status LED every 500 ms while the station has no address
//! - Keeps the LED off once DHCP has assigned one
//! - Reconnects immediately whenever the link drops

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};
use esp_println::println;

use wifi_led_station::{
    CONNECTION_STATUS, config,
    infrastructure::{
        drivers::{configure_led, start_wifi_sta},
        services::init_boot_record,
        tasks::run_indicator,
    },
};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    println!("=================================");
    println!("  Wi-Fi LED Station {}", config::FIRMWARE.version);
    println!("=================================");

    // Initialize hardware
    let hal_config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(hal_config);

    // Allocate heap memory (64 + 32 KB)
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Start RTOS
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    if let Err(e) = init_boot_record(peripherals.FLASH).await {
        panic!("storage: initialization failed: {:?}", e);
    }

    let led = configure_led(wifi_led_station::led_gpio!(peripherals));

    if let Err(e) = start_wifi_sta(spawner, peripherals.WIFI, &CONNECTION_STATUS) {
        panic!("network: initialization failed: {:?}", e);
    }

    run_indicator(led, &CONNECTION_STATUS, config::BLINK_TIMING).await
}
