use std::{error, fmt, io, path::PathBuf};

/// Why an inbound request could not be turned into a [`ParsedRequest`].
///
/// Every variant maps to a canned client-error response; none of them
/// is allowed to take the process down.
///
/// [`ParsedRequest`]: crate::http::request::ParsedRequest
#[derive(Debug, PartialEq, Eq)]
pub enum RequestError {
    /// The buffer never contained `"HTTP/"`.
    MissingVersion,
    /// No `" /"` separator, so no method/path split exists.
    MissingRequestLine,
    /// The path token was not terminated by a space.
    UnterminatedPath,
    /// No `Host:` header, or one without a terminating carriage return.
    MissingHost,
    /// The header region was not valid UTF-8.
    InvalidEncoding,
    /// The request grew past the configured maximum size.
    TooLarge,
}

macro_rules! http_errors {
    ($( $name:ident => $status_line:expr; )*) => {
        /// Returns the complete canned wire response for this error.
        ///
        /// Always carries `connection: close` and an empty body, so it
        /// can be written and the socket dropped without bookkeeping.
        pub const fn as_http(&self) -> &'static [u8] {
            match self { $(
                Self::$name => concat!(
                    "HTTP/1.1 ", $status_line, "\r\n",
                    "connection: close\r\n",
                    "content-length: 0\r\n",
                    "\r\n",
                ),
            )* }.as_bytes()
        }
    };
}

impl RequestError {
    http_errors! {
        MissingVersion => "400 Bad Request";
        MissingRequestLine => "400 Bad Request";
        UnterminatedPath => "400 Bad Request";
        MissingHost => "400 Bad Request";
        InvalidEncoding => "400 Bad Request";
        TooLarge => "413 Payload Too Large";
    }
}

impl error::Error for RequestError {}
impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVersion => write!(f, "request contains no HTTP version token"),
            Self::MissingRequestLine => write!(f, "request line lacks a method/path split"),
            Self::UnterminatedPath => write!(f, "request path is not space-terminated"),
            Self::MissingHost => write!(f, "request lacks a terminated Host header"),
            Self::InvalidEncoding => write!(f, "request headers are not valid UTF-8"),
            Self::TooLarge => write!(f, "request exceeds the maximum allowed size"),
        }
    }
}

/// Fatal bootstrap failures: bad sockets, unreadable key material.
///
/// These occur before any connection is accepted and abort startup.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: io::Error,
    },

    #[error("failed to read {path}: {source}")]
    KeyMaterial { path: PathBuf, source: io::Error },

    #[error("{path} contains no usable PEM entries")]
    EmptyPem { path: PathBuf },

    #[error("TLS configuration rejected: {0}")]
    Tls(#[from] tokio_rustls::rustls::Error),
}
