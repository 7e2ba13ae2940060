//! Connection limits and timeouts.
//!
//! Defaults are intentionally conservative: a client that dribbles one
//! byte at a time, stalls mid-handshake, or never finishes its header
//! block gets cut off instead of pinning a task.
//!
//! # Examples
//!
//! ```no_run
//! use dualserve::limits::ConnLimits;
//! use std::time::Duration;
//!
//! let limits = ConnLimits {
//!     socket_read_timeout: Duration::from_secs(5),
//!     ..ConnLimits::default()
//! };
//! ```

use std::time::Duration;

/// Per-connection I/O limits.
///
/// One value of this struct is shared (by copy) with every connection a
/// listener accepts; there is no per-connection tuning.
#[derive(Debug, Clone, Copy)]
pub struct ConnLimits {
    /// Deadline for the whole header read loop (default: `10s`).
    ///
    /// Covers all reads for a request combined, not each read
    /// individually, so a slow-drip client cannot reset the clock with
    /// every byte.
    pub socket_read_timeout: Duration,

    /// Deadline for writing the complete response (default: `10s`).
    pub socket_write_timeout: Duration,

    /// Deadline for the TLS handshake (default: `10s`).
    ///
    /// Only consulted by the encrypted listener.
    pub tls_handshake_timeout: Duration,

    /// Maximum size of the request head in bytes (default: `16KiB`).
    ///
    /// The read loop grows its buffer until the blank line that ends
    /// the header block; past this cap the request is rejected with
    /// `413` instead of growing further.
    pub max_request_size: usize,

    /// Initial capacity of the per-connection read buffer (default: `4KiB`).
    ///
    /// Most requests fit in the first read; the buffer only grows when
    /// the header block is still unterminated.
    pub initial_buffer_size: usize,
}

impl Default for ConnLimits {
    fn default() -> Self {
        ConnLimits {
            socket_read_timeout: Duration::from_secs(10),
            socket_write_timeout: Duration::from_secs(10),
            tls_handshake_timeout: Duration::from_secs(10),
            max_request_size: 16 * 1024,
            initial_buffer_size: 4 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let limits = ConnLimits::default();
        assert!(limits.initial_buffer_size <= limits.max_request_size);
        assert!(!limits.socket_read_timeout.is_zero());
        assert!(!limits.socket_write_timeout.is_zero());
        assert!(!limits.tls_handshake_timeout.is_zero());
    }
}
