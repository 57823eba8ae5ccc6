//! Infrastructure layer
//!
//! Board bindings for the platform independent pieces of `wifi-led-core`:
//! radio and network stack drivers, flash and console services, and the
//! embassy tasks that tie them to the shared connection status.

pub mod drivers;
pub mod services;
pub mod tasks;
