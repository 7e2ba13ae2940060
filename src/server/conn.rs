//! One connection, start to finish.
//!
//! Both listeners funnel their streams through [`serve`]: read one
//! request head, hand it to the listener's handler, write whatever
//! comes back, close. There is no keep-alive and no second request.

use crate::{errors::RequestError, limits::ConnLimits, server::server_impl::RequestHandler};
use memchr::memmem;
use std::io;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    time::timeout,
};

enum HeadError {
    TooLarge,
    Io(io::Error),
}

impl From<io::Error> for HeadError {
    fn from(err: io::Error) -> Self {
        HeadError::Io(err)
    }
}

/// Drives one accepted stream through its single request.
///
/// Works over plain TCP and TLS streams alike. Request-level failures
/// (malformed head, oversized head) are answered with their canned
/// responses and reported as success here; only transport failures
/// surface as errors.
pub(crate) async fn serve<H, S>(handler: &H, mut stream: S, limits: ConnLimits) -> io::Result<()>
where
    H: RequestHandler,
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    let head = match read_head(&mut stream, &limits).await {
        Ok(Some(head)) => head,
        Ok(None) => return Ok(()),
        Err(HeadError::TooLarge) => {
            tracing::debug!("request head exceeded the size cap");
            return write_wire(&mut stream, RequestError::TooLarge.as_http(), &limits).await;
        }
        Err(HeadError::Io(err)) => return Err(err),
    };

    match handler.handle(&head).await {
        Ok(Some(wire)) => write_wire(&mut stream, &wire, &limits).await,
        Ok(None) => stream.shutdown().await,
        Err(err) => {
            tracing::debug!(%err, "rejecting request");
            write_wire(&mut stream, err.as_http(), &limits).await
        }
    }
}

/// Reads until the blank line that ends the header block, growing the
/// buffer as needed.
///
/// Stops early when the peer closes (a partial head is still handed to
/// the parser, which will reject it) or when the head outgrows the
/// configured cap. The read timeout covers the whole loop, so slow-drip
/// clients cannot keep resetting it.
async fn read_head<S>(stream: &mut S, limits: &ConnLimits) -> Result<Option<Vec<u8>>, HeadError>
where
    S: AsyncRead + Unpin,
{
    let mut buffer = Vec::with_capacity(limits.initial_buffer_size);

    let outcome = timeout(limits.socket_read_timeout, async {
        loop {
            if stream.read_buf(&mut buffer).await? == 0 {
                return Ok(());
            }
            if memmem::find(&buffer, b"\r\n\r\n").is_some() {
                return Ok(());
            }
            if buffer.len() >= limits.max_request_size {
                return Err(HeadError::TooLarge);
            }
            if buffer.capacity() == buffer.len() {
                buffer.reserve(buffer.capacity());
            }
        }
    })
    .await;

    match outcome {
        Ok(Ok(())) if buffer.is_empty() => Ok(None),
        Ok(Ok(())) => Ok(Some(buffer)),
        Ok(Err(err)) => Err(err),
        Err(elapsed) => Err(HeadError::Io(elapsed.into())),
    }
}

async fn write_wire<S>(stream: &mut S, wire: &[u8], limits: &ConnLimits) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    timeout(limits.socket_write_timeout, async {
        stream.write_all(wire).await?;
        stream.shutdown().await
    })
    .await?
}
