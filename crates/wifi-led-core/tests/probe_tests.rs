//! Integration tests for the one-shot HTTP probe against a scripted network.

use std::collections::VecDeque;

use embassy_futures::block_on;
use embedded_io_async::{ErrorKind, ErrorType, Read, Write};
use wifi_led_core::{
    HttpProbe, ProbeError, ProbeNetwork, ProbeReport, ProbeSocket, ProbeTarget, ResponseSink,
};

const TARGET: ProbeTarget = ProbeTarget::new("example.com", 80, "/");
const ADDRESS: [u8; 4] = [93, 184, 215, 14];

// -----------------------------------------------------------------------------
// Scripted network
// -----------------------------------------------------------------------------

#[derive(Default)]
struct Script {
    resolve_fails: bool,
    open_fails: bool,
    connect_fails: bool,
    send_fails: bool,
    close_fails: bool,
    /// Chunks handed out by `read`, `Err` entries fail the read
    response: VecDeque<Result<Vec<u8>, ErrorKind>>,
}

#[derive(Default)]
struct Journal {
    opened: usize,
    connected_to: Option<([u8; 4], u16)>,
    sent: Vec<u8>,
    closed: bool,
}

#[derive(Default)]
struct FakeNetwork {
    script: Script,
    journal: Journal,
}

struct FakeSocket<'a> {
    script: &'a mut Script,
    journal: &'a mut Journal,
}

impl ProbeNetwork for FakeNetwork {
    type Address = [u8; 4];
    type Socket<'a> = FakeSocket<'a>;

    async fn resolve(&self, host: &str) -> Result<[u8; 4], ProbeError> {
        if self.script.resolve_fails {
            Err(ProbeError::Resolve)
        } else {
            assert_eq!(host, "example.com");
            Ok(ADDRESS)
        }
    }

    fn open(&mut self) -> Result<FakeSocket<'_>, ProbeError> {
        if self.script.open_fails {
            return Err(ProbeError::Socket);
        }
        self.journal.opened += 1;
        Ok(FakeSocket {
            script: &mut self.script,
            journal: &mut self.journal,
        })
    }
}

impl FakeNetwork {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            journal: Journal::default(),
        }
    }
}

impl ErrorType for FakeSocket<'_> {
    type Error = ErrorKind;
}

impl Read for FakeSocket<'_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        match self.script.response.pop_front() {
            None => Ok(0),
            Some(Err(e)) => Err(e),
            Some(Ok(mut chunk)) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                if n < chunk.len() {
                    let rest = chunk.split_off(n);
                    self.script.response.push_front(Ok(rest));
                }
                Ok(n)
            }
        }
    }
}

impl Write for FakeSocket<'_> {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
        if self.script.send_fails {
            return Err(ErrorKind::ConnectionReset);
        }
        self.journal.sent.extend_from_slice(buf);
        Ok(buf.len())
    }
}

impl ProbeSocket for FakeSocket<'_> {
    type Address = [u8; 4];

    async fn connect(&mut self, address: [u8; 4], port: u16) -> Result<(), ProbeError> {
        if self.script.connect_fails {
            return Err(ProbeError::Connect);
        }
        self.journal.connected_to = Some((address, port));
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ErrorKind> {
        self.journal.closed = true;
        if self.script.close_fails {
            return Err(ErrorKind::TimedOut);
        }
        Ok(())
    }
}

#[derive(Default)]
struct CapturedOutput {
    chunks: Vec<Vec<u8>>,
}

impl ResponseSink for CapturedOutput {
    fn write_chunk(&mut self, chunk: &[u8]) {
        self.chunks.push(chunk.to_vec());
    }
}

fn run(network: &mut FakeNetwork, sink: &mut CapturedOutput) -> Result<ProbeReport, ProbeError> {
    block_on(HttpProbe::new(TARGET).run(network, sink))
}

// -----------------------------------------------------------------------------
// Successful exchange
// -----------------------------------------------------------------------------

#[test]
fn sends_fixed_request_and_echoes_response() {
    let body = b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello";
    let mut script = Script::default();
    script.response.push_back(Ok(body.to_vec()));
    let mut network = FakeNetwork::with_script(script);
    let mut sink = CapturedOutput::default();

    let report = run(&mut network, &mut sink).unwrap();

    let sent = String::from_utf8(network.journal.sent.clone()).unwrap();
    assert!(sent.starts_with("GET / HTTP/1.1\r\nHost: example.com\r\n"));
    assert!(sent.ends_with("Connection: close\r\n\r\n"));
    assert_eq!(network.journal.connected_to, Some((ADDRESS, 80)));
    assert!(network.journal.closed);

    assert_eq!(report.status, Some(200));
    assert_eq!(report.bytes_received, body.len());
    assert!(report.closed_by_peer);
    assert_eq!(sink.chunks.concat(), body.to_vec());
}

#[test]
fn response_is_read_in_fixed_chunks() {
    let body = vec![b'x'; 150];
    let mut script = Script::default();
    script.response.push_back(Ok(body));
    let mut network = FakeNetwork::with_script(script);
    let mut sink = CapturedOutput::default();

    let report = run(&mut network, &mut sink).unwrap();

    let sizes: Vec<usize> = sink.chunks.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![64, 64, 22]);
    assert_eq!(report.bytes_received, 150);
    assert_eq!(report.status, None);
}

#[test]
fn read_error_ends_response_and_closes() {
    let mut script = Script::default();
    script.response.push_back(Ok(b"HTTP/1.1 503 Busy\r\n".to_vec()));
    script.response.push_back(Err(ErrorKind::ConnectionReset));
    script.response.push_back(Ok(b"never read".to_vec()));
    let mut network = FakeNetwork::with_script(script);
    let mut sink = CapturedOutput::default();

    let report = run(&mut network, &mut sink).unwrap();

    assert_eq!(report.status, Some(503));
    assert!(!report.closed_by_peer);
    assert_eq!(sink.chunks.len(), 1);
    assert!(network.journal.closed);
}

#[test]
fn close_error_keeps_received_response() {
    let body = b"HTTP/1.1 204 No Content\r\n\r\n";
    let mut script = Script {
        close_fails: true,
        ..Script::default()
    };
    script.response.push_back(Ok(body.to_vec()));
    let mut network = FakeNetwork::with_script(script);
    let mut sink = CapturedOutput::default();

    let report = run(&mut network, &mut sink).unwrap();

    assert!(network.journal.closed);
    assert_eq!(report.status, Some(204));
    assert_eq!(report.bytes_received, body.len());
}

#[test]
fn close_error_after_connect_failure_keeps_connect_error() {
    let mut network = FakeNetwork::with_script(Script {
        connect_fails: true,
        close_fails: true,
        ..Script::default()
    });
    let mut sink = CapturedOutput::default();

    assert_eq!(run(&mut network, &mut sink), Err(ProbeError::Connect));
    assert!(network.journal.closed);
}

// -----------------------------------------------------------------------------
// Failures
// -----------------------------------------------------------------------------

#[test]
fn dns_failure_sends_nothing() {
    let mut network = FakeNetwork::with_script(Script {
        resolve_fails: true,
        ..Script::default()
    });
    let mut sink = CapturedOutput::default();

    assert_eq!(run(&mut network, &mut sink), Err(ProbeError::Resolve));
    assert_eq!(network.journal.opened, 0);
    assert!(network.journal.sent.is_empty());
    assert!(sink.chunks.is_empty());
}

#[test]
fn socket_failure_stops_before_connect() {
    let mut network = FakeNetwork::with_script(Script {
        open_fails: true,
        ..Script::default()
    });
    let mut sink = CapturedOutput::default();

    assert_eq!(run(&mut network, &mut sink), Err(ProbeError::Socket));
    assert_eq!(network.journal.connected_to, None);
}

#[test]
fn connect_failure_closes_socket_without_sending() {
    let mut network = FakeNetwork::with_script(Script {
        connect_fails: true,
        ..Script::default()
    });
    let mut sink = CapturedOutput::default();

    assert_eq!(run(&mut network, &mut sink), Err(ProbeError::Connect));
    assert!(network.journal.sent.is_empty());
    assert!(network.journal.closed);
}

#[test]
fn send_failure_closes_socket_without_reading() {
    let mut script = Script {
        send_fails: true,
        ..Script::default()
    };
    script.response.push_back(Ok(b"HTTP/1.1 200 OK\r\n".to_vec()));
    let mut network = FakeNetwork::with_script(script);
    let mut sink = CapturedOutput::default();

    assert_eq!(run(&mut network, &mut sink), Err(ProbeError::Send));
    assert!(network.journal.closed);
    assert!(sink.chunks.is_empty());
}
