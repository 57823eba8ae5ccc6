//! embassy-net binding of the probe network.

use embassy_net::IpAddress;
use embassy_net::Stack;
use embassy_net::tcp::{self, TcpSocket};
use embedded_io_async::{ErrorType, Read, Write};
use log::warn;
use wifi_led_core::{ProbeError, ProbeNetwork, ProbeSocket};

use crate::infrastructure::drivers::resolve_host;

const SOCKET_BUFFER_SIZE: usize = 1024;

/// Probe network over the station stack with one set of socket buffers.
pub struct StackProbeNetwork {
    stack: Stack<'static>,
    rx_buffer: [u8; SOCKET_BUFFER_SIZE],
    tx_buffer: [u8; SOCKET_BUFFER_SIZE],
}

impl StackProbeNetwork {
    pub fn new(stack: Stack<'static>) -> Self {
        Self {
            stack,
            rx_buffer: [0; SOCKET_BUFFER_SIZE],
            tx_buffer: [0; SOCKET_BUFFER_SIZE],
        }
    }
}

impl ProbeNetwork for StackProbeNetwork {
    type Address = IpAddress;
    type Socket<'a> = TcpConnection<'a>;

    async fn resolve(&self, host: &str) -> Result<IpAddress, ProbeError> {
        resolve_host(self.stack, host)
            .await
            .map_err(|()| ProbeError::Resolve)
    }

    fn open(&mut self) -> Result<TcpConnection<'_>, ProbeError> {
        Ok(TcpConnection {
            socket: TcpSocket::new(self.stack, &mut self.rx_buffer, &mut self.tx_buffer),
        })
    }
}

/// TCP socket handed to the probe.
pub struct TcpConnection<'a> {
    socket: TcpSocket<'a>,
}

impl ErrorType for TcpConnection<'_> {
    type Error = tcp::Error;
}

impl Read for TcpConnection<'_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, tcp::Error> {
        self.socket.read(buf).await
    }
}

impl Write for TcpConnection<'_> {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, tcp::Error> {
        self.socket.write(buf).await
    }

    async fn flush(&mut self) -> Result<(), tcp::Error> {
        self.socket.flush().await
    }
}

impl ProbeSocket for TcpConnection<'_> {
    type Address = IpAddress;

    async fn connect(&mut self, address: IpAddress, port: u16) -> Result<(), ProbeError> {
        self.socket.connect((address, port)).await.map_err(|e| {
            warn!("probe: connect to {:?}:{} failed: {:?}", address, port, e);
            ProbeError::Connect
        })
    }

    async fn close(&mut self) -> Result<(), tcp::Error> {
        self.socket.close();
        // flush waits until the FIN went out
        self.socket.flush().await
    }
}
