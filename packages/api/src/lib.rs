//! CyberID name lookup for wallet hosts
//!
//! Resolves CyberID names to owner addresses and addresses to held names on
//! the Cyber mainnet and testnet. Answers follow the host's lookup contract;
//! `None` (or JSON `null`) means this resolver has no answer.
//!
//! ```no_run
//! use cyberid::{LookupRequest, on_name_lookup};
//!
//! # async fn run() {
//! let request = LookupRequest::for_address("eip155:7560", "0x0000000000000000000000000000000000000001");
//! if let Some(response) = on_name_lookup(&request).await {
//!     println!("{}", serde_json::to_string(&response).unwrap_or_default());
//! }
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

use std::sync::{Arc, OnceLock};

pub mod builder;
pub mod handler;

pub use builder::*;
pub use handler::{lookup_json, on_name_lookup, on_name_lookup_json};

// Re-export important types from client package
pub use cyberid_client::{
    CYBER_MAINNET_ID, CYBER_TESTNET_ID, ConfigError, Endpoints, Error, GraphqlTransport, HttpTransport,
    Kind, LookupRequest, LookupTarget, NameResolver, Network, PROTOCOL_LABEL, ResolutionResponse,
    ResolvedAddress, ResolvedDomain, ResolverConfig, Result, TlsConfig,
};

/// Main entry point providing static builder methods
pub struct CyberId;

impl CyberId {
    /// Start building a resolver from the default configuration
    #[must_use]
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// Resolver with the default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if TLS cannot be configured.
    pub fn resolver() -> Result<NameResolver> {
        NameResolver::new()
    }
}

/// Global resolver instance.
///
/// `None` is stored when no resolver could be built, so lookups through the
/// global handlers then answer `None` instead of panicking.
static GLOBAL_RESOLVER: OnceLock<Option<Arc<NameResolver>>> = OnceLock::new();

/// Get the global resolver, building it from the default configuration on
/// first use unless [`init_global_resolver`] ran first
pub fn global_resolver() -> Option<Arc<NameResolver>> {
    GLOBAL_RESOLVER
        .get_or_init(|| match NameResolver::new() {
            Ok(resolver) => Some(Arc::new(resolver)),
            Err(e) => {
                tracing::error!("Failed to build default CyberID resolver: {}", e);
                None
            }
        })
        .clone()
}

/// Initialize the global resolver with a custom configuration.
///
/// Library code never panics here: an invalid configuration, or a global
/// resolver that already exists, is logged and the existing or default
/// resolver stays in use.
pub fn init_global_resolver(config: ResolverConfig) {
    if let Err(e) = validate_and_init_resolver(config) {
        tracing::error!(
            "Failed to initialize CyberID resolver with custom config: {}, using default resolver",
            e
        );
    }
}

fn validate_and_init_resolver(
    config: ResolverConfig,
) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let resolver = NameResolver::with_config(config)?;

    GLOBAL_RESOLVER
        .set(Some(Arc::new(resolver)))
        .map_err(|_| "Global resolver already initialized")?;

    Ok(())
}
