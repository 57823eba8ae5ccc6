use core::fmt::Write;

use super::{Error, RequestBuffer};

const USER_AGENT: &str = concat!("wifi-led/", env!("CARGO_PKG_VERSION"), " esp32");

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// HTTP socket connection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPolicy {
    Close,
}

impl ConnectionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionPolicy::Close => "close",
        }
    }
}

pub trait TargetWriter {
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error>;
}

/// Request line and headers of an HTTP/1.1 request without a body.
#[derive(Debug, Clone, Copy)]
pub struct RequestHeaders<'a> {
    method: HttpMethod,
    path: &'a str,
    host: &'a str,
    user_agent: &'a str,
    connection: ConnectionPolicy,
}

impl<'a> RequestHeaders<'a> {
    pub const fn get(host: &'a str, path: &'a str) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            host,
            user_agent: USER_AGENT,
            connection: ConnectionPolicy::Close,
        }
    }

    #[must_use]
    pub const fn with_user_agent(mut self, user_agent: &'a str) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Render the request head into a fixed-size buffer.
    pub fn render(&self) -> Result<RequestBuffer, Error> {
        let mut buffer = RequestBuffer::new();
        self.write_to(&mut buffer)?;
        Ok(buffer)
    }
}

impl TargetWriter for RequestHeaders<'_> {
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error> {
        write!(writer, "{} {} HTTP/1.1\r\n", self.method.as_str(), self.path)?;
        write!(writer, "Host: {}\r\n", self.host)?;
        if !self.user_agent.is_empty() {
            write!(writer, "User-Agent: {}\r\n", self.user_agent)?;
        }
        write!(writer, "Connection: {}\r\n", self.connection.as_str())?;
        write!(writer, "\r\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_get_with_close() {
        let head = RequestHeaders::get("example.com", "/")
            .with_user_agent("")
            .render()
            .unwrap();

        assert_eq!(
            head.as_str(),
            "GET / HTTP/1.1\r\nHost: example.com\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn default_user_agent_is_sent() {
        let head = RequestHeaders::get("example.com", "/").render().unwrap();
        assert!(head.contains("\r\nUser-Agent: wifi-led/"));
        assert!(head.ends_with("Connection: close\r\n\r\n"));
    }

    #[test]
    fn overflowing_head_is_an_error() {
        let long_path = core::str::from_utf8(&[b'a'; 300]).unwrap();
        let result = RequestHeaders::get("example.com", long_path).render();
        assert_eq!(result, Err(Error::FormatRequest));
    }
}
