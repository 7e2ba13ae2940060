//! dualserve - minimal dual-listener static file server
//!
//! Two independent endpoints built from the same parsing and
//! composition core:
//!
//! - **Plaintext**: answers every GET with a `301` to the same host and
//!   path over `https`. Nothing is ever served in the clear.
//! - **TLS**: serves static file content, whole (`200`) or as a single
//!   byte range (`206`), with `404` for anything it cannot find.
//!
//! Each connection carries exactly one request; there is no keep-alive,
//! no pipelining and no method other than GET. Requests that do not
//! parse are answered with a canned `400` and the connection is closed.
//!
//! # Examples
//!
//! ```no_run
//! use dualserve::{listener, tls, DiskStore, RedirectHandler, Server, StaticFileHandler};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() {
//!     let redirect = Server::builder()
//!         .listener(listener::bind("0.0.0.0:80".parse().unwrap()).unwrap())
//!         .handler(RedirectHandler)
//!         .label("plain")
//!         .build();
//!
//!     let files = Server::builder()
//!         .listener(listener::bind("0.0.0.0:443".parse().unwrap()).unwrap())
//!         .handler(StaticFileHandler::new(DiskStore::new("dir")))
//!         .tls(tls::acceptor(Path::new("keys/cnlab.cert"), Path::new("keys/cnlab.prikey")).unwrap())
//!         .label("tls")
//!         .build();
//!
//!     tokio::join!(redirect.launch(), files.launch());
//! }
//! ```
//!
//! # Design notes
//!
//! - **Zero-copy parsing** - the request head is scanned in place and
//!   the parsed view borrows from the read buffer
//! - **Async/await ready** - built on Tokio, one task per connection
//! - **Configurable timeouts** - read, write and TLS handshake are all
//!   individually bounded, see [`limits::ConnLimits`]
//! - **Bounded memory** - the read buffer grows only up to a hard cap

pub(crate) mod http {
    pub(crate) mod range;
    pub(crate) mod request;
    pub(crate) mod response;
    pub(crate) mod types;
}
pub(crate) mod handlers {
    pub(crate) mod redirect;
    pub(crate) mod static_files;
}
pub(crate) mod server {
    pub(crate) mod conn;
    pub mod listener;
    pub(crate) mod server_impl;
    pub mod tls;
}
pub(crate) mod errors;
pub(crate) mod files;
pub mod limits;

pub use crate::{
    errors::{RequestError, SetupError},
    files::{DiskStore, ResourceStore},
    handlers::{redirect::RedirectHandler, static_files::StaticFileHandler},
    http::{
        range::{RangeSpec, ResolvedRange},
        request::ParsedRequest,
        response::HttpMessage,
        types::StatusCode,
    },
    server::{
        listener,
        server_impl::{RequestHandler, Server, ServerBuilder},
        tls,
    },
};
