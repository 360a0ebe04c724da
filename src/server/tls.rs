//! TLS termination
//!
//! Builds a rustls acceptor from PEM-encoded certificate and key files.

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::sync::Arc;
use tokio_rustls::TlsAcceptor;

/// Loads `cert` and `key` and returns an acceptor speaking HTTP/1.1.
pub fn load_acceptor(cert: &Path, key: &Path) -> Result<TlsAcceptor> {
    let cert_pem = std::fs::read(cert)
        .with_context(|| format!("Failed to read certificate {}", cert.display()))?;
    let key_pem =
        std::fs::read(key).with_context(|| format!("Failed to read key {}", key.display()))?;

    let certs = rustls_pemfile::certs(&mut cert_pem.as_slice())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid certificate PEM in {}", cert.display()))?;

    if certs.is_empty() {
        bail!("No certificate found in {}", cert.display());
    }

    let private_key = rustls_pemfile::private_key(&mut key_pem.as_slice())
        .with_context(|| format!("Invalid key PEM in {}", key.display()))?
        .with_context(|| format!("No private key found in {}", key.display()))?;

    let mut tls_config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, private_key)
        .context("Certificate and key do not form a usable TLS identity")?;

    tls_config.alpn_protocols = vec![b"http/1.1".to_vec()];

    tracing::info!(cert = %cert.display(), "TLS certificates loaded");
    Ok(TlsAcceptor::from(Arc::new(tls_config)))
}
