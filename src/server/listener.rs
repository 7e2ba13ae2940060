//! Listening-socket bootstrap.

use crate::errors::SetupError;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

const BACKLOG: i32 = 1024;

/// Creates a nonblocking listener on `addr` with `SO_REUSEADDR` set,
/// so a restart does not trip over sockets still in `TIME_WAIT`.
pub fn bind(addr: SocketAddr) -> Result<TcpListener, SetupError> {
    let bind_err = |source| SetupError::Bind { addr, source };

    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP)).map_err(bind_err)?;
    socket.set_reuse_address(true).map_err(bind_err)?;
    socket.bind(&addr.into()).map_err(bind_err)?;
    socket.listen(BACKLOG).map_err(bind_err)?;
    socket.set_nonblocking(true).map_err(bind_err)?;

    TcpListener::from_std(socket.into()).map_err(bind_err)
}
