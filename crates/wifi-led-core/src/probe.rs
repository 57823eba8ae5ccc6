//! One-shot HTTP reachability probe.
//!
//! Resolves a fixed host, sends a single `GET` with `Connection: close` and
//! echoes the response to a [`ResponseSink`] until the peer closes the
//! connection. The network is abstracted by [`ProbeNetwork`] so the sequence
//! can run against the embassy stack on the device and against fakes in tests.

use core::fmt::Debug;

use embedded_io_async::{Read, Write};
use log::{debug, error, info, warn};

use crate::http::{self, RequestHeaders, StatusCode, parse_status_line};

/// Size of a single response read.
pub const RESPONSE_CHUNK_SIZE: usize = 64;

/// Where the probe goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTarget {
    pub host: &'static str,
    pub port: u16,
    pub path: &'static str,
}

impl ProbeTarget {
    pub const fn new(host: &'static str, port: u16, path: &'static str) -> Self {
        Self { host, port, path }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeError {
    /// Request head could not be rendered
    Request,
    /// Host name lookup failed
    Resolve,
    /// No socket could be allocated
    Socket,
    /// TCP connect failed
    Connect,
    /// Writing the request failed
    Send,
}

impl From<http::Error> for ProbeError {
    fn from(_error: http::Error) -> Self {
        ProbeError::Request
    }
}

/// Outcome of a completed probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    pub bytes_received: usize,
    pub status: Option<StatusCode>,
    /// `false` when reading stopped on an error instead of a peer close
    pub closed_by_peer: bool,
}

/// Network access needed by the probe.
#[allow(async_fn_in_trait)]
pub trait ProbeNetwork {
    type Address: Copy + Debug;
    type Socket<'a>: ProbeSocket<Address = Self::Address>
    where
        Self: 'a;

    async fn resolve(&self, host: &str) -> Result<Self::Address, ProbeError>;

    fn open(&mut self) -> Result<Self::Socket<'_>, ProbeError>;
}

/// Stream socket opened by a [`ProbeNetwork`].
#[allow(async_fn_in_trait)]
pub trait ProbeSocket: Read + Write {
    type Address;

    async fn connect(&mut self, address: Self::Address, port: u16) -> Result<(), ProbeError>;

    /// Shut the connection down and wait for the close to be sent.
    async fn close(&mut self) -> Result<(), Self::Error>;
}

/// Diagnostic output for raw response bytes.
pub trait ResponseSink {
    fn write_chunk(&mut self, chunk: &[u8]);
}

pub struct HttpProbe {
    target: ProbeTarget,
}

impl HttpProbe {
    pub const fn new(target: ProbeTarget) -> Self {
        Self { target }
    }

    pub const fn target(&self) -> ProbeTarget {
        self.target
    }

    /// Run the probe once.
    ///
    /// Every failure before the request is written is logged and returned;
    /// nothing is retried.
    pub async fn run<N, S>(&self, network: &mut N, sink: &mut S) -> Result<ProbeReport, ProbeError>
    where
        N: ProbeNetwork,
        S: ResponseSink,
    {
        let target = self.target;
        let request = RequestHeaders::get(target.host, target.path)
            .render()
            .map_err(|e| fail(ProbeError::from(e)))?;

        info!("probe: resolving {}", target.host);
        let address = network.resolve(target.host).await.map_err(fail)?;
        info!("probe: {} is {:?}", target.host, address);

        let mut socket = network.open().map_err(fail)?;

        if let Err(e) = socket.connect(address, target.port).await {
            shutdown(&mut socket).await;
            return Err(fail(e));
        }
        info!("probe: connected to {:?}:{}", address, target.port);

        if socket.write_all(request.as_bytes()).await.is_err() || socket.flush().await.is_err() {
            shutdown(&mut socket).await;
            return Err(fail(ProbeError::Send));
        }
        info!("probe: request sent, reading response");

        let report = drain(&mut socket, sink).await;
        shutdown(&mut socket).await;

        Ok(report)
    }
}

async fn drain<T: Read, S: ResponseSink>(socket: &mut T, sink: &mut S) -> ProbeReport {
    let mut buffer = [0u8; RESPONSE_CHUNK_SIZE];
    let mut report = ProbeReport {
        bytes_received: 0,
        status: None,
        closed_by_peer: true,
    };

    loop {
        match socket.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => {
                let chunk = &buffer[..n];
                if report.bytes_received == 0 {
                    report.status = parse_status_line(chunk);
                }
                report.bytes_received += n;
                sink.write_chunk(chunk);
            }
            Err(e) => {
                warn!("probe: read failed: {:?}", e);
                report.closed_by_peer = false;
                break;
            }
        }
    }

    report
}

async fn shutdown<T: ProbeSocket>(socket: &mut T) {
    if let Err(e) = socket.close().await {
        debug!("probe: close failed: {:?}", e);
    }
}

fn fail(error: ProbeError) -> ProbeError {
    match error {
        ProbeError::Request => error!("probe: request does not fit the buffer"),
        ProbeError::Resolve => error!("probe: DNS lookup failed"),
        ProbeError::Socket => error!("probe: failed to allocate socket"),
        ProbeError::Connect => error!("probe: socket connect failed"),
        ProbeError::Send => error!("probe: socket send failed"),
    }
    error
}
