//! Resolver configuration
//!
//! Plain data with sensible defaults. The defaults reproduce the behavior the
//! host runtime expects: the public CyberConnect endpoints, the `altair://-`
//! origin marker, and no explicit timeouts.

use std::time::Duration;

use http::HeaderValue;
use url::Url;

/// Production GraphQL endpoint, queried for mainnet lookups
pub const PRODUCTION_ENDPOINT: &str = "https://api.cyberconnect.dev/v3/";

/// Staging GraphQL endpoint, queried for testnet lookups
pub const STAGING_ENDPOINT: &str = "https://api.stg.cyberconnect.dev/v3/";

/// Origin marker sent with every request
pub const DEFAULT_ORIGIN: &str = "altair://-";

/// Upper bound on a (decompressed) response body
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

/// The pair of GraphQL endpoints, one per network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub production: String,
    pub staging: String,
}

impl Endpoints {
    /// Select the endpoint for a network
    #[inline]
    #[must_use]
    pub fn for_testnet(&self, is_testnet: bool) -> &str {
        if is_testnet {
            &self.staging
        } else {
            &self.production
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            production: PRODUCTION_ENDPOINT.to_string(),
            staging: STAGING_ENDPOINT.to_string(),
        }
    }
}

/// TLS trust configuration
#[derive(Debug, Clone, Default)]
pub struct TlsConfig {
    /// Add the platform's native root certificates on top of the bundled webpki roots
    pub use_native_certs: bool,
}

/// Configuration for the resolver and its HTTP transport
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub endpoints: Endpoints,

    /// Value of the `Origin` header
    pub origin: String,

    /// Optional `User-Agent`; none is sent by default
    pub user_agent: Option<String>,

    /// TCP + TLS connect deadline; unset means the OS default applies
    pub connect_timeout: Option<Duration>,

    /// Whole-request deadline; unset means no deadline
    pub timeout: Option<Duration>,

    pub max_response_bytes: usize,

    pub tls: TlsConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            origin: DEFAULT_ORIGIN.to_string(),
            user_agent: None,
            connect_timeout: None,
            timeout: None,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            tls: TlsConfig::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid endpoint {url}: {reason}")]
    Endpoint { url: String, reason: String },
    #[error("Invalid timeout configuration: {0}")]
    Timeout(String),
    #[error("Invalid header configuration: {0}")]
    Header(String),
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Validate a configuration before a resolver is built from it
///
/// # Errors
///
/// - `Endpoint` - an endpoint is not an absolute http(s) URL with a host
/// - `Timeout` - a timeout is zero or longer than an hour
/// - `Header` - the origin or user agent is not a valid header value
/// - `Validation` - the response size limit is zero
pub fn validate_config(config: &ResolverConfig) -> Result<(), ConfigError> {
    validate_endpoint(&config.endpoints.production)?;
    validate_endpoint(&config.endpoints.staging)?;

    for (name, timeout) in [
        ("Connect timeout", config.connect_timeout),
        ("Timeout", config.timeout),
    ] {
        if let Some(timeout) = timeout {
            if timeout.is_zero() {
                return Err(ConfigError::Timeout(format!("{name} must be greater than zero")));
            }
            if timeout > Duration::from_secs(3600) {
                return Err(ConfigError::Timeout(format!("{name} must not exceed 1 hour")));
            }
        }
    }

    if config.max_response_bytes == 0 {
        return Err(ConfigError::Validation(
            "Max response bytes must be greater than zero".to_string(),
        ));
    }

    HeaderValue::from_str(&config.origin)
        .map_err(|e| ConfigError::Header(format!("origin: {e}")))?;
    if let Some(ref user_agent) = config.user_agent {
        if user_agent.is_empty() {
            return Err(ConfigError::Header("User agent cannot be empty".to_string()));
        }
        HeaderValue::from_str(user_agent)
            .map_err(|e| ConfigError::Header(format!("user agent: {e}")))?;
    }

    Ok(())
}

fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::Endpoint {
        url: endpoint.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ResolverConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.endpoints.for_testnet(false), PRODUCTION_ENDPOINT);
        assert_eq!(config.endpoints.for_testnet(true), STAGING_ENDPOINT);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn rejects_bad_endpoints() {
        let mut config = ResolverConfig::default();
        config.endpoints.staging = "ftp://api.stg.cyberconnect.dev/v3/".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Endpoint { .. })
        ));

        config.endpoints.staging = "not a url".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ResolverConfig {
            timeout: Some(Duration::ZERO),
            ..ResolverConfig::default()
        };
        assert!(matches!(validate_config(&config), Err(ConfigError::Timeout(_))));
    }

    #[test]
    fn rejects_bad_headers() {
        let config = ResolverConfig {
            origin: "altair\n//-".to_string(),
            ..ResolverConfig::default()
        };
        assert!(matches!(validate_config(&config), Err(ConfigError::Header(_))));

        let config = ResolverConfig {
            user_agent: Some(String::new()),
            ..ResolverConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
