//! CyberID name resolver
//!
//! request → classify chain → one GraphQL query → map to the host contract.
//! Every failure along the way yields `None`, meaning "this resolver has no
//! answer" so the host can defer to other resolvers.

mod queries;

use crate::chain::Network;
use crate::config::{Endpoints, ResolverConfig, validate_config};
use crate::error::{self, Result};
use crate::http::{GraphqlTransport, HttpTransport};
use crate::lookup::{LookupRequest, LookupTarget, ResolutionResponse, ResolvedAddress, ResolvedDomain};

/// Resolves CyberID names and addresses for the Cyber mainnet and testnet.
///
/// Stateless between calls; share it behind an `Arc` for concurrent lookups.
#[derive(Debug, Clone)]
pub struct NameResolver<T = HttpTransport> {
    endpoints: Endpoints,
    transport: T,
}

impl NameResolver<HttpTransport> {
    /// Resolver with the default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if TLS cannot be configured.
    pub fn new() -> Result<Self> {
        Self::with_config(ResolverConfig::default())
    }

    /// # Errors
    ///
    /// Returns a builder error if the configuration is invalid, or an error
    /// if TLS cannot be configured.
    pub fn with_config(config: ResolverConfig) -> Result<Self> {
        validate_config(&config).map_err(error::builder)?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config.endpoints, transport))
    }
}

impl<T: GraphqlTransport> NameResolver<T> {
    pub fn with_transport(endpoints: Endpoints, transport: T) -> Self {
        Self { endpoints, transport }
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Answer a host lookup request.
    ///
    /// Returns `None` for unsupported or malformed chain ids, for requests
    /// with neither address nor domain, and whenever the service has no
    /// answer or cannot be reached. An address takes priority over a domain.
    pub async fn on_lookup(&self, request: &LookupRequest) -> Option<ResolutionResponse> {
        let Some(network) = Network::from_caip2(&request.chain_id) else {
            tracing::trace!(chain_id = %request.chain_id, "Unsupported chain");
            return None;
        };

        match request.target()? {
            LookupTarget::Address(address) => {
                let names = self.resolve_holdings_of_address(address, network).await?;
                if names.is_empty() {
                    return None;
                }
                Some(ResolutionResponse::ResolvedDomains(
                    names.into_iter().map(ResolvedDomain::new).collect(),
                ))
            }
            LookupTarget::Domain(domain) => {
                let address = self
                    .resolve_owner_of_domain(domain, network)
                    .await
                    .filter(|address| !address.is_empty())?;
                Some(ResolutionResponse::ResolvedAddresses(vec![ResolvedAddress::new(
                    address, domain,
                )]))
            }
        }
    }
}
