//! Core `ResolverBuilder` structure and its fluent setters

use std::time::Duration;

use cyberid_client::{NameResolver, ResolverConfig, Result};

/// Fluent builder for a [`NameResolver`]
///
/// Starts from the default configuration; every setter overrides one field.
/// Validation happens once, in [`ResolverBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct ResolverBuilder {
    pub(crate) config: ResolverConfig,
}

impl ResolverBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    #[must_use]
    pub fn from_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Endpoint queried for mainnet lookups
    #[must_use]
    pub fn production_endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoints.production = url.into();
        self
    }

    /// Endpoint queried for testnet lookups
    #[must_use]
    pub fn staging_endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoints.staging = url.into();
        self
    }

    /// Override the `Origin` marker
    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.config.origin = origin.into();
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Deadline for a whole lookup, connect included
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn max_response_bytes(mut self, limit: usize) -> Self {
        self.config.max_response_bytes = limit;
        self
    }

    /// Trust the platform's root certificates in addition to the bundled ones
    #[must_use]
    pub fn use_native_certs(mut self, enabled: bool) -> Self {
        self.config.tls.use_native_certs = enabled;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Validate the configuration and build the resolver
    ///
    /// # Errors
    ///
    /// Returns a builder error if the configuration is invalid, or an error
    /// if TLS cannot be configured.
    pub fn build(self) -> Result<NameResolver> {
        NameResolver::with_config(self.config)
    }
}
