//! Certificate loading and TLS acceptor construction.

use crate::errors::SetupError;
use std::{fs::File, io::BufReader, path::Path, sync::Arc};
use tokio_rustls::{
    rustls::{
        self,
        pki_types::{CertificateDer, PrivateKeyDer},
    },
    TlsAcceptor,
};

/// Builds a [`TlsAcceptor`] from PEM-encoded certificate chain and
/// private key files. Fails at startup for unreadable files, files
/// with no usable PEM entries, or a key that rustls rejects.
pub fn acceptor(cert_path: &Path, key_path: &Path) -> Result<TlsAcceptor, SetupError> {
    let certs = load_certs(cert_path)?;
    let key = load_key(key_path)?;

    let config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)?;

    Ok(TlsAcceptor::from(Arc::new(config)))
}

fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, SetupError> {
    let read_err = |source| SetupError::KeyMaterial {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let certs = rustls_pemfile::certs(&mut BufReader::new(file))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;

    if certs.is_empty() {
        return Err(SetupError::EmptyPem {
            path: path.to_path_buf(),
        });
    }
    Ok(certs)
}

fn load_key(path: &Path) -> Result<PrivateKeyDer<'static>, SetupError> {
    let read_err = |source| SetupError::KeyMaterial {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    rustls_pemfile::private_key(&mut BufReader::new(file))
        .map_err(read_err)?
        .ok_or_else(|| SetupError::EmptyPem {
            path: path.to_path_buf(),
        })
}
