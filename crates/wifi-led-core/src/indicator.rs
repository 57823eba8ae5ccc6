//! Connection indicator LED.
//!
//! Blinks while the station is disconnected and stays dark once connected.

use embassy_time::Duration;
use embedded_hal::digital::{OutputPin, PinState};
use log::{debug, info};

use crate::connection::ConnectionState;

/// Tick rate of the scheduler that raw tick delays are counted in.
pub const LEGACY_TICK_RATE_HZ: u64 = 100;

/// Convert a raw scheduler tick count into a duration.
pub const fn legacy_ticks(ticks: u64) -> Duration {
    Duration::from_millis(ticks * 1000 / LEGACY_TICK_RATE_HZ)
}

/// Delays used by the indicator loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkTiming {
    /// Half period of the blink while disconnected
    pub disconnected_period: Duration,
    /// Re-check interval while connected
    pub connected_recheck: Duration,
}

impl BlinkTiming {
    pub const fn new(disconnected_period: Duration, connected_recheck: Duration) -> Self {
        Self {
            disconnected_period,
            connected_recheck,
        }
    }
}

/// LED driver for the connection indicator.
pub struct Indicator<P: OutputPin> {
    pin: P,
    lit: bool,
    timing: BlinkTiming,
    last_state: Option<ConnectionState>,
}

impl<P: OutputPin> Indicator<P> {
    /// Take ownership of the pin and drive it low.
    pub fn new(mut pin: P, timing: BlinkTiming) -> Result<Self, P::Error> {
        pin.set_low()?;
        Ok(Self {
            pin,
            lit: false,
            timing,
            last_state: None,
        })
    }

    pub const fn is_lit(&self) -> bool {
        self.lit
    }

    pub const fn timing(&self) -> BlinkTiming {
        self.timing
    }

    /// Run one loop iteration for `state`.
    ///
    /// Returns how long the caller should sleep before the next iteration.
    pub fn update(&mut self, state: ConnectionState) -> Result<Duration, P::Error> {
        if self.last_state != Some(state) {
            match state {
                ConnectionState::Disconnected => {
                    info!("led: flashing, Wi-Fi is not connected");
                }
                ConnectionState::Connected => info!("led: connected, stopped flashing"),
            }
            self.last_state = Some(state);
        }

        match state {
            ConnectionState::Disconnected => {
                self.lit = !self.lit;
                self.pin.set_state(PinState::from(self.lit))?;
                debug!("led: {}", if self.lit { "on" } else { "off" });
                Ok(self.timing.disconnected_period)
            }
            ConnectionState::Connected => {
                self.lit = false;
                self.pin.set_low()?;
                Ok(self.timing.connected_recheck)
            }
        }
    }

    /// Release the pin.
    pub fn release(self) -> P {
        self.pin
    }
}
