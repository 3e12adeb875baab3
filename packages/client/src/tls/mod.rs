//! TLS for the naming service connection
//!
//! rustls with the ring provider. Trust comes from the bundled webpki roots,
//! optionally extended with the platform's native store.

pub(crate) mod tls_manager;

pub use tls_manager::TlsManager;
