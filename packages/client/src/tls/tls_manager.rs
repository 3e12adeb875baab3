use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;

use crate::config::TlsConfig;
use crate::error::{self, Result};

/// Builds the rustls client configuration once and performs handshakes with it
#[derive(Clone)]
pub struct TlsManager {
    connector: TlsConnector,
}

impl std::fmt::Debug for TlsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsManager").finish_non_exhaustive()
    }
}

impl TlsManager {
    /// # Errors
    ///
    /// Returns a `Tls` error if the ring provider rejects the default
    /// protocol versions.
    pub fn new(config: &TlsConfig) -> Result<Self> {
        let client_config = create_client_config(config)?;
        Ok(Self {
            connector: TlsConnector::from(Arc::new(client_config)),
        })
    }

    /// Perform the TLS handshake over an established TCP stream
    ///
    /// # Errors
    ///
    /// Returns a `Tls` error if the host is not a valid server name or the
    /// handshake fails.
    pub async fn connect(&self, host: &str, tcp_stream: TcpStream) -> Result<TlsStream<TcpStream>> {
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| error::tls(format!("Invalid hostname '{host}': {e}")))?;

        let tls_stream = self
            .connector
            .connect(server_name, tcp_stream)
            .await
            .map_err(error::tls)?;

        tracing::trace!(host, "TLS connection established");
        Ok(tls_stream)
    }
}

fn create_client_config(config: &TlsConfig) -> Result<ClientConfig> {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    if config.use_native_certs {
        let cert_result = rustls_native_certs::load_native_certs();
        for cert in cert_result.certs {
            if let Err(e) = root_store.add(cert) {
                tracing::debug!("Failed to add system certificate: {}", e);
            }
        }
        for err in &cert_result.errors {
            tracing::debug!("Certificate load error: {}", err);
        }
        tracing::trace!("Root store holds {} certificates", root_store.len());
    }

    let mut client_config =
        ClientConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
            .with_safe_default_protocol_versions()
            .map_err(error::tls)?
            .with_root_certificates(root_store)
            .with_no_client_auth();

    // The transport only speaks HTTP/1.1
    client_config.alpn_protocols = vec![b"http/1.1".to_vec()];

    Ok(client_config)
}
