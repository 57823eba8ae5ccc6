use esp_hal::gpio::{Level, Output, OutputConfig, OutputPin};
use log::info;

/// Configure the indicator LED as a push-pull output, initially off.
pub fn configure_led(pin: impl OutputPin + 'static) -> Output<'static> {
    let led = Output::new(pin, Level::Low, OutputConfig::default());
    info!("led: output configured");
    led
}
