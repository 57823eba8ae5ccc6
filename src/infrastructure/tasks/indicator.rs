use embassy_time::Timer;
use esp_hal::gpio::Output;
use wifi_led_core::{BlinkTiming, ConnectionStatus, Indicator};

/// Drive the status LED forever.
///
/// Runs on the main task: the LED blinks with `timing.disconnected_period`
/// while the station has no address, and stays off once it does.
pub async fn run_indicator(
    led: Output<'static>,
    status: &'static ConnectionStatus,
    timing: BlinkTiming,
) -> ! {
    let Ok(mut indicator) = Indicator::new(led, timing);

    loop {
        let Ok(delay) = indicator.update(status.state());
        Timer::after(delay).await;
    }
}
