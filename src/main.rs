use dualserve::{
    listener, tls, DiskStore, RedirectHandler, Server, SetupError, StaticFileHandler,
};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::Path,
};
use tracing_subscriber::EnvFilter;

const PLAIN_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 80);
const TLS_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 443);

const SERVE_ROOT: &str = "dir";
const CERT_PATH: &str = "keys/cnlab.cert";
const KEY_PATH: &str = "keys/cnlab.prikey";

#[tokio::main]
async fn main() -> Result<(), SetupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let redirect = Server::builder()
        .listener(listener::bind(PLAIN_ADDR)?)
        .handler(RedirectHandler)
        .label("plain")
        .build();

    let files = Server::builder()
        .listener(listener::bind(TLS_ADDR)?)
        .handler(StaticFileHandler::new(DiskStore::new(SERVE_ROOT)))
        .tls(tls::acceptor(Path::new(CERT_PATH), Path::new(KEY_PATH))?)
        .label("tls")
        .build();

    tokio::join!(redirect.launch(), files.launch());
    Ok(())
}
