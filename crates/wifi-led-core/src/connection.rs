//! Station link state machine and the process-wide connection status.
//!
//! The radio driver reports link changes as [`LinkEvent`]s. A single
//! [`LinkCoordinator`] feeds them into the [`ConnectionMachine`], publishes the
//! resulting [`ConnectionState`] to a [`ConnectionStatus`] and tells the caller
//! when to start an association attempt.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::watch::{Receiver, Watch};
use log::{debug, info, warn};

/// Maximum number of concurrent [`StatusSubscriber`]s.
pub const MAX_STATUS_SUBSCRIBERS: usize = 2;

/// Link state as seen by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

impl ConnectionState {
    pub const fn is_connected(self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

/// Link event delivered by the radio driver or the network stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// Station interface is up, no association yet
    StationStarted,
    /// Association lost, or an association attempt failed
    LinkDropped,
    /// DHCP lease obtained on the associated link
    AddressAcquired,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    /// Start an association attempt right away
    Connect,
}

/// Result of feeding one event into the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub previous: ConnectionState,
    pub state: ConnectionState,
    pub action: Option<LinkAction>,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.previous != self.state
    }
}

/// Two-state link machine with an unbounded, immediate retry policy.
#[derive(Debug)]
pub struct ConnectionMachine {
    state: ConnectionState,
    reconnects: u32,
}

impl ConnectionMachine {
    pub const fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            reconnects: 0,
        }
    }

    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    /// Number of reconnection attempts triggered by dropped links.
    pub const fn reconnects(&self) -> u32 {
        self.reconnects
    }

    pub fn handle(&mut self, event: LinkEvent) -> Transition {
        let previous = self.state;
        let (state, action) = match event {
            LinkEvent::StationStarted => (ConnectionState::Disconnected, Some(LinkAction::Connect)),
            LinkEvent::LinkDropped => {
                self.reconnects = self.reconnects.wrapping_add(1);
                (ConnectionState::Disconnected, Some(LinkAction::Connect))
            }
            LinkEvent::AddressAcquired => (ConnectionState::Connected, None),
        };
        self.state = state;

        Transition {
            previous,
            state,
            action,
        }
    }
}

impl Default for ConnectionMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide connection status.
///
/// Readers get the latest state with [`ConnectionStatus::state`]; tasks that
/// need to block until the link is up take a [`StatusSubscriber`].
pub struct ConnectionStatus {
    connected: AtomicBool,
    watch: Watch<CriticalSectionRawMutex, ConnectionState, MAX_STATUS_SUBSCRIBERS>,
}

impl ConnectionStatus {
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            watch: Watch::new(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        if self.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Store a new state and wake every subscriber.
    pub fn publish(&self, state: ConnectionState) {
        self.connected.store(state.is_connected(), Ordering::Release);
        self.watch.sender().send(state);
    }

    /// Returns `None` once [`MAX_STATUS_SUBSCRIBERS`] are alive.
    pub fn subscribe(&self) -> Option<StatusSubscriber<'_>> {
        self.watch
            .receiver()
            .map(|receiver| StatusSubscriber { receiver })
    }
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Blocking view of a [`ConnectionStatus`].
pub struct StatusSubscriber<'a> {
    receiver: Receiver<'a, CriticalSectionRawMutex, ConnectionState, MAX_STATUS_SUBSCRIBERS>,
}

impl StatusSubscriber<'_> {
    /// Suspend until the published state is [`ConnectionState::Connected`].
    pub async fn wait_connected(&mut self) {
        self.receiver.get_and(|state| state.is_connected()).await;
    }

    /// Suspend until the next published state and return it.
    pub async fn changed(&mut self) -> ConnectionState {
        self.receiver.changed().await
    }
}

/// Owns the [`ConnectionMachine`] and mirrors its state into a status.
pub struct LinkCoordinator<'a> {
    machine: ConnectionMachine,
    status: &'a ConnectionStatus,
}

impl<'a> LinkCoordinator<'a> {
    pub fn new(status: &'a ConnectionStatus) -> Self {
        status.publish(ConnectionState::Disconnected);
        Self {
            machine: ConnectionMachine::new(),
            status,
        }
    }

    pub const fn state(&self) -> ConnectionState {
        self.machine.state()
    }

    pub const fn reconnects(&self) -> u32 {
        self.machine.reconnects()
    }

    /// Apply one event and return the action the caller has to perform.
    pub fn dispatch(&mut self, event: LinkEvent) -> Option<LinkAction> {
        let transition = self.machine.handle(event);
        self.status.publish(transition.state);

        match event {
            LinkEvent::StationStarted => info!("wifi: station started, connecting"),
            LinkEvent::LinkDropped => warn!(
                "wifi: disconnected, reconnecting (attempt {})",
                self.machine.reconnects()
            ),
            LinkEvent::AddressAcquired if transition.changed() => {
                info!("wifi: connected with IP address");
            }
            LinkEvent::AddressAcquired => debug!("wifi: address renewed"),
        }

        transition.action
    }
}

/// Pause between a failed association attempt and the next one.
///
/// Retries stay immediate, but a driver error that completes without ever
/// suspending must not keep the executor from running the other tasks.
pub async fn reconnect_pause() {
    embassy_futures::yield_now().await;
}
