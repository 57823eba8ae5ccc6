use esp_println::Printer;
use wifi_led_core::ResponseSink;

/// Echoes response bytes to the serial console as they arrive.
pub struct ConsoleSink;

impl ResponseSink for ConsoleSink {
    fn write_chunk(&mut self, chunk: &[u8]) {
        Printer::write_bytes(chunk);
    }
}
