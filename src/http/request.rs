//! Request-head parsing.
//!
//! The parser is deliberately token-oriented rather than line-oriented:
//! it locates the handful of markers this server cares about (`" /"`,
//! `"HTTP/"`, `"Host: "`, `"Range: bytes="`) and borrows the spans
//! between them straight out of the inbound buffer. Everything else in
//! the header block is preserved but ignored.
//!
//! # Input data requirements
//!
//! The whole head must be `UTF-8` and lines must end with exactly
//! `CRLF`. Header names are matched case-sensitively in their canonical
//! spelling (`Host`, `Range`); this parser does not aim for full RFC
//! 9112 header handling.

use crate::{errors::RequestError, http::range::RangeSpec};
use memchr::{memchr, memmem};

/// One parsed request head, zero-copy referenced from the input buffer.
///
/// Produced at most once per connection and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest<'a> {
    method: &'a str,
    path: &'a str,
    host: &'a str,
    range: Option<RangeSpec>,
}

impl<'a> ParsedRequest<'a> {
    /// Parses a complete request head out of `buffer`.
    ///
    /// Expects the spans below, in order; anything missing is a
    /// [`RequestError`], never a panic:
    ///
    /// ```text
    /// [METHOD] SP "/" [PATH] SP "HTTP/" ...
    /// ...
    /// "Host: " [HOST] CR ...
    /// ```
    ///
    /// The path is taken verbatim (query string included, no percent
    /// decoding) and excludes the leading slash. A well-formed
    /// `Range: bytes=` header populates [`range`](Self::range);
    /// anything else leaves it `None`.
    pub fn parse(buffer: &'a [u8]) -> Result<Self, RequestError> {
        let text = match simdutf8::basic::from_utf8(buffer) {
            Ok(text) => text,
            Err(_) => return Err(RequestError::InvalidEncoding),
        };
        let bytes = text.as_bytes();

        if memmem::find(bytes, b"HTTP/").is_none() {
            return Err(RequestError::MissingVersion);
        }

        let method_end = memmem::find(bytes, b" /").ok_or(RequestError::MissingRequestLine)?;
        let method = &text[..method_end];

        // Skip the space and the slash: the stored path is relative.
        let path_start = method_end + 2;
        let path_end = memchr(b' ', &bytes[path_start..])
            .map(|offset| path_start + offset)
            .ok_or(RequestError::UnterminatedPath)?;
        let path = &text[path_start..path_end];

        let host_start = memmem::find(bytes, b"Host: ")
            .map(|pos| pos + b"Host: ".len())
            .ok_or(RequestError::MissingHost)?;
        let host_end = memchr(b'\r', &bytes[host_start..])
            .map(|offset| host_start + offset)
            .ok_or(RequestError::MissingHost)?;
        let host = &text[host_start..host_end];

        let range = memmem::find(bytes, b"Range: bytes=")
            .and_then(|pos| RangeSpec::parse(&bytes[pos + b"Range: bytes=".len()..]));

        Ok(ParsedRequest {
            method,
            path,
            host,
            range,
        })
    }

    /// Request method, verbatim (e.g. `"GET"`).
    #[inline(always)]
    pub const fn method(&self) -> &'a str {
        self.method
    }

    /// Request path without its leading slash, query string included.
    #[inline(always)]
    pub const fn path(&self) -> &'a str {
        self.path
    }

    /// Value of the `Host` header, verbatim.
    #[inline(always)]
    pub const fn host(&self) -> &'a str {
        self.host
    }

    /// The byte range requested, if a well-formed one was sent.
    #[inline(always)]
    pub const fn range(&self) -> Option<RangeSpec> {
        self.range
    }

    #[inline(always)]
    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }
}
