//! The accept loop.
//!
//! One [`Server`] owns one listening socket and one handler. The plain
//! and encrypted endpoints are two independent `Server` values; they
//! share nothing and one cannot disturb the other.

use crate::{errors::RequestError, limits::ConnLimits, server::conn};
use std::{
    future::Future,
    io,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};
use tokio::{net::TcpListener, time::timeout};
use tokio_rustls::TlsAcceptor;

/// Turns one request head into at most one response.
///
/// A handler receives the complete request head once per connection
/// and decides what, if anything, goes back on the wire.
///
/// # Returns
///
/// - `Ok(Some(wire))`: write `wire` and close.
/// - `Ok(None)`: write nothing and close (the reaction to methods this
///   server does not speak).
/// - `Err(e)`: the head never parsed; the connection driver answers
///   with the error's canned response and closes.
pub trait RequestHandler
where
    Self: Sync + Send + 'static,
{
    fn handle(
        &self,
        head: &[u8],
    ) -> impl Future<Output = Result<Option<Vec<u8>>, RequestError>> + Send;
}

/// Accepts connections and spawns one task per connection.
///
/// With a [`TlsAcceptor`] configured, every accepted stream goes
/// through a handshake (bounded by
/// [`tls_handshake_timeout`](ConnLimits::tls_handshake_timeout))
/// before the handler sees any bytes; without one the stream is served
/// as-is.
///
/// # Examples
///
/// ```no_run
/// use dualserve::{listener, RedirectHandler, Server};
///
/// #[tokio::main]
/// async fn main() {
///     Server::builder()
///         .listener(listener::bind("0.0.0.0:80".parse().unwrap()).unwrap())
///         .handler(RedirectHandler)
///         .label("plain")
///         .build()
///         .launch()
///         .await;
/// }
/// ```
pub struct Server<H> {
    listener: TcpListener,
    handler: Arc<H>,
    tls: Option<TlsAcceptor>,
    limits: ConnLimits,
    label: &'static str,
}

impl<H: RequestHandler> Server<H> {
    pub fn builder() -> ServerBuilder<H> {
        ServerBuilder {
            listener: None,
            handler: None,
            tls: None,
            limits: ConnLimits::default(),
            label: "server",
        }
    }

    /// Runs the accept loop forever.
    ///
    /// Accept errors are logged and skipped; per-connection failures
    /// stay inside their task.
    pub async fn launch(self) {
        if let Ok(addr) = self.listener.local_addr() {
            tracing::info!(listener = self.label, %addr, tls = self.tls.is_some(), "listening");
        }

        let active = Arc::new(AtomicUsize::new(0));

        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(pair) => pair,
                Err(err) => {
                    tracing::warn!(listener = self.label, %err, "accept failed");
                    continue;
                }
            };

            let handler = Arc::clone(&self.handler);
            let tls = self.tls.clone();
            let limits = self.limits;
            let label = self.label;
            let active = Arc::clone(&active);

            tokio::spawn(async move {
                let open = active.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::debug!(listener = label, %peer, open, "connection accepted");

                if let Err(err) = handle_stream(&*handler, stream, tls, limits).await {
                    tracing::debug!(listener = label, %peer, %err, "connection failed");
                }

                active.fetch_sub(1, Ordering::Relaxed);
            });
        }
    }
}

async fn handle_stream<H: RequestHandler>(
    handler: &H,
    stream: tokio::net::TcpStream,
    tls: Option<TlsAcceptor>,
    limits: ConnLimits,
) -> io::Result<()> {
    match tls {
        Some(acceptor) => {
            let stream = timeout(limits.tls_handshake_timeout, acceptor.accept(stream))
                .await
                .map_err(io::Error::from)??;
            conn::serve(handler, stream, limits).await
        }
        None => conn::serve(handler, stream, limits).await,
    }
}

/// Assembles a [`Server`]. `listener` and `handler` are required.
pub struct ServerBuilder<H> {
    listener: Option<TcpListener>,
    handler: Option<H>,
    tls: Option<TlsAcceptor>,
    limits: ConnLimits,
    label: &'static str,
}

impl<H: RequestHandler> ServerBuilder<H> {
    pub fn listener(mut self, listener: TcpListener) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn handler(mut self, handler: H) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Serve TLS on this listener.
    pub fn tls(mut self, acceptor: TlsAcceptor) -> Self {
        self.tls = Some(acceptor);
        self
    }

    pub fn connection_limits(mut self, limits: ConnLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Name used in log lines to tell the two endpoints apart.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn build(self) -> Server<H> {
        Server {
            listener: self
                .listener
                .expect("the `listener` method must be called before `build`"),
            handler: Arc::new(
                self.handler
                    .expect("the `handler` method must be called before `build`"),
            ),
            tls: self.tls,
            limits: self.limits,
            label: self.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{handlers::redirect::RedirectHandler, server::listener};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn serves_concurrent_plaintext_connections() {
        let listener = listener::bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(
            Server::builder()
                .listener(listener)
                .handler(RedirectHandler)
                .label("test")
                .build()
                .launch(),
        );

        let mut clients = Vec::new();
        for i in 0..4 {
            clients.push(tokio::spawn(async move {
                let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
                stream
                    .write_all(format!("GET /p{i} HTTP/1.1\r\nHost: h\r\n\r\n").as_bytes())
                    .await
                    .unwrap();

                let mut response = Vec::new();
                stream.read_to_end(&mut response).await.unwrap();
                (i, String::from_utf8(response).unwrap())
            }));
        }

        for client in clients {
            let (i, response) = client.await.unwrap();
            assert!(response.starts_with("HTTP/1.1 301 Moved Permanently\r\n"));
            assert!(response.contains(&format!("Location: https://h/p{i}\r\n")));
        }
    }
}
