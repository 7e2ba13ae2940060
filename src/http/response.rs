//! Response composition.
//!
//! A response is described once as an [`HttpMessage`] and then turned
//! into its final wire bytes in a single pass. The composer owns the
//! `content-length` header: it is always derived from the actual body,
//! so a handler cannot desynchronize the framing.

use crate::http::types::StatusCode;

/// One response, built by a handler and consumed by [`compose`].
///
/// [`compose`]: HttpMessage::compose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpMessage {
    status: StatusCode,
    extra_headers: Vec<String>,
    body: Vec<u8>,
}

impl HttpMessage {
    /// Starts an empty message with the given status.
    #[inline]
    pub fn new(status: StatusCode) -> Self {
        HttpMessage {
            status,
            extra_headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Appends one header line (without the trailing `CRLF`).
    ///
    /// Lines are emitted in insertion order. A `content-length` line
    /// added here is silently dropped at composition time; the composer
    /// always writes its own.
    #[inline]
    pub fn header(mut self, line: impl Into<String>) -> Self {
        self.extra_headers.push(line.into());
        self
    }

    /// Sets the message body.
    #[inline]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    #[inline(always)]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Serializes the message into its final wire bytes:
    ///
    /// ```text
    /// HTTP/1.1 <code> <reason> CRLF
    /// content-length: <body length> CRLF
    /// <extra header lines, insertion order, CRLF each>
    /// CRLF
    /// <body, verbatim>
    /// ```
    pub fn compose(self) -> Vec<u8> {
        let first_line = self.status.to_first_line();
        let length_line = format!("content-length: {}\r\n", self.body.len());

        let headers_len: usize = self.extra_headers.iter().map(|h| h.len() + 2).sum();
        let mut wire = Vec::with_capacity(
            first_line.len() + length_line.len() + headers_len + 2 + self.body.len(),
        );

        wire.extend_from_slice(first_line);
        wire.extend_from_slice(length_line.as_bytes());
        for line in &self.extra_headers {
            if is_content_length(line) {
                continue;
            }
            wire.extend_from_slice(line.as_bytes());
            wire.extend_from_slice(b"\r\n");
        }
        wire.extend_from_slice(b"\r\n");
        wire.extend_from_slice(&self.body);
        wire
    }
}

#[inline]
fn is_content_length(line: &str) -> bool {
    line.len() > 14
        && line.as_bytes()[..14].eq_ignore_ascii_case(b"content-length")
        && line.as_bytes()[14] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_wire(wire: &[u8]) -> (Vec<&str>, &[u8]) {
        let marker = memchr::memmem::find(wire, b"\r\n\r\n").expect("no blank line");
        let head = std::str::from_utf8(&wire[..marker]).unwrap();
        (head.split("\r\n").collect(), &wire[marker + 4..])
    }

    #[test]
    fn empty_message() {
        let wire = HttpMessage::new(StatusCode::NotFound).compose();
        assert_eq!(wire, b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\n\r\n");
    }

    #[test]
    fn content_length_precedes_extra_headers() {
        let wire = HttpMessage::new(StatusCode::Ok)
            .header("content-type: text/html")
            .header("x-second: 2")
            .body(&b"hello"[..])
            .compose();

        let (lines, body) = split_wire(&wire);
        assert_eq!(
            lines,
            [
                "HTTP/1.1 200 OK",
                "content-length: 5",
                "content-type: text/html",
                "x-second: 2",
            ],
        );
        assert_eq!(body, b"hello");
    }

    #[test]
    fn caller_supplied_content_length_is_discarded() {
        let wire = HttpMessage::new(StatusCode::Ok)
            .header("Content-Length: 9999")
            .header("content-length: 1")
            .body(&b"ab"[..])
            .compose();

        let (lines, body) = split_wire(&wire);
        assert_eq!(lines, ["HTTP/1.1 200 OK", "content-length: 2"]);
        assert_eq!(body, b"ab");
    }

    #[test]
    fn body_bytes_are_verbatim() {
        // Binary bodies must survive untouched, blank lines included.
        let payload: Vec<u8> = vec![0, 159, 146, 150, b'\r', b'\n', b'\r', b'\n', 7];
        let wire = HttpMessage::new(StatusCode::PartialContent)
            .body(payload.clone())
            .compose();

        let (lines, body) = split_wire(&wire);
        assert_eq!(lines[0], "HTTP/1.1 206 Partial Content");
        assert_eq!(body, payload.as_slice());
    }

    #[test]
    fn composed_status_line_reparses() {
        // Reading the status line back out of the wire bytes must
        // recover the original code and reason phrase.
        let statuses = [
            StatusCode::Ok,
            StatusCode::PartialContent,
            StatusCode::MovedPermanently,
            StatusCode::NotFound,
        ];

        for status in statuses {
            let message = HttpMessage::new(status)
                .header("Location: https://example.com/dir/file");
            assert_eq!(message.status(), status);

            let wire = message.compose();

            let (lines, body) = split_wire(&wire);
            let (version, rest) = lines[0].split_once(' ').unwrap();
            let (code, reason) = rest.split_once(' ').unwrap();

            assert_eq!(version, "HTTP/1.1");
            assert_eq!(code.parse::<u16>().unwrap(), status.code());
            assert_eq!(reason, status.reason());
            assert_eq!(lines[1], "content-length: 0");
            assert_eq!(lines[2], "Location: https://example.com/dir/file");
            assert!(body.is_empty());
        }
    }
}
