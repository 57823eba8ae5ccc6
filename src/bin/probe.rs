//! Probe Firmware
//!
//! Same station behaviour as the blink firmware, plus:
//! - Sends a single `GET /` to the configured host once connected
//! - Echoes the response to the serial console
//!
//! The LED blink delay of this build is 10 s.

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
        tasks::{http_probe_task, run_indicator},
    },
};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    println!("=================================");
    println!("  Wi-Fi LED Probe {}", config::FIRMWARE.version);
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

    let stack = match start_wifi_sta(spawner, peripherals.WIFI, &CONNECTION_STATUS) {
        Ok(stack) => stack,
        Err(e) => panic!("network: initialization failed: {:?}", e),
    };
    spawner
        .spawn(http_probe_task(stack, &CONNECTION_STATUS))
        .ok();

    run_indicator(led, &CONNECTION_STATUS, config::PROBE_BLINK_TIMING).await
}
