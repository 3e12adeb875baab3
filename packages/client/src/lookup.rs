//! Host lookup contract
//!
//! The wallet runtime hands over a camelCase JSON request and expects either
//! `null` or exactly one of `resolvedDomains` / `resolvedAddresses` back.
//! "No answer" is modelled as `Option::None` around [`ResolutionResponse`].

use serde::{Deserialize, Serialize};

/// Label attached to every result this resolver produces
pub const PROTOCOL_LABEL: &str = "Cyber ID Protocol";

/// A lookup request from the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    /// `"<namespace>:<decimal id>"`, e.g. `eip155:7560`
    pub chain_id: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

/// What a lookup resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTarget<'a> {
    /// Reverse lookup: names held by an address
    Address(&'a str),
    /// Forward lookup: owner of a name
    Domain(&'a str),
}

impl LookupRequest {
    #[must_use]
    pub fn for_domain(chain_id: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            address: None,
            domain: Some(domain.into()),
        }
    }

    #[must_use]
    pub fn for_address(chain_id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            address: Some(address.into()),
            domain: None,
        }
    }

    /// The branch this request takes.
    ///
    /// Empty strings count as absent. When both fields are set the address
    /// wins and the domain is ignored.
    #[must_use]
    pub fn target(&self) -> Option<LookupTarget<'_>> {
        fn present(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|s| !s.is_empty())
        }

        if let Some(address) = present(&self.address) {
            Some(LookupTarget::Address(address))
        } else {
            present(&self.domain).map(LookupTarget::Domain)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDomain {
    pub resolved_domain: String,
    pub protocol: String,
}

impl ResolvedDomain {
    #[must_use]
    pub fn new(resolved_domain: impl Into<String>) -> Self {
        Self {
            resolved_domain: resolved_domain.into(),
            protocol: PROTOCOL_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAddress {
    pub resolved_address: String,
    pub protocol: String,
    pub domain_name: String,
}

impl ResolvedAddress {
    #[must_use]
    pub fn new(resolved_address: impl Into<String>, domain_name: impl Into<String>) -> Self {
        Self {
            resolved_address: resolved_address.into(),
            protocol: PROTOCOL_LABEL.to_string(),
            domain_name: domain_name.into(),
        }
    }
}

/// A non-null lookup answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionResponse {
    ResolvedDomains(Vec<ResolvedDomain>),
    ResolvedAddresses(Vec<ResolvedAddress>),
}
