mod request;
mod response;

pub use request::{ConnectionPolicy, HttpMethod, RequestHeaders, TargetWriter};
pub use response::{StatusCode, parse_status_line};

/// Capacity of the buffer the request head is rendered into.
pub const REQUEST_BUFFER_SIZE: usize = 256;

/// Request head rendered into a fixed buffer.
pub type RequestBuffer = heapless::String<REQUEST_BUFFER_SIZE>;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Request head does not fit in [`REQUEST_BUFFER_SIZE`]
    FormatRequest,
}

impl From<core::fmt::Error> for Error {
    fn from(_error: core::fmt::Error) -> Self {
        Error::FormatRequest
    }
}
