#![cfg_attr(not(test), no_std)]

//! Board-independent logic of the Wi-Fi LED station firmware.
//!
//! - `connection` - link state machine, coordinator and shared status
//! - `indicator` - LED blink policy over any [`embedded_hal::digital::OutputPin`]
//! - `http` - request writer and status line parser
//! - `probe` - one-shot HTTP GET over an abstract network
//! - `storage` - versioned record store with erase-and-retry bring-up
//!
//! Nothing here touches the radio or the HAL directly, so the crate builds and
//! tests on the host.

pub mod connection;
pub mod http;
pub mod indicator;
pub mod probe;
pub mod storage;

pub use connection::{
    ConnectionMachine, ConnectionState, ConnectionStatus, LinkAction, LinkCoordinator,
    LinkEvent, StatusSubscriber, Transition, reconnect_pause,
};
pub use indicator::{BlinkTiming, Indicator};
pub use probe::{
    HttpProbe, ProbeError, ProbeNetwork, ProbeReport, ProbeSocket, ProbeTarget, ResponseSink,
};
pub use storage::{BootRecord, Record, RecordStore, StorageDriver, StorageError};
