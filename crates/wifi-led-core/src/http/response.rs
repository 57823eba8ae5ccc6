pub type StatusCode = u16;

/// Parse the status code out of the beginning of a response.
///
/// Only the first line is looked at, and it must be complete.
pub fn parse_status_line(head: &[u8]) -> Option<StatusCode> {
    let line_end = head.windows(2).position(|w| w == b"\r\n")?;
    let line = core::str::from_utf8(&head[..line_end]).ok()?;

    let mut parts = line.splitn(3, ' ');
    let version = parts.next()?;
    if !version.starts_with("HTTP/1.") {
        return None;
    }
    let code = parts.next()?;
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}
