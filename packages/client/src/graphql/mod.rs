//! GraphQL wire format for the CyberConnect naming API
//!
//! Requests are `{ "query": <document>, "variables": {...} }` JSON bodies.
//! Response models make every level optional so a missing field anywhere in
//! the path reads as "not found" rather than a decode failure.

pub mod documents;
pub mod response;

use bytes::Bytes;
use serde::Serialize;

use crate::error::{self, Result};

pub use documents::{CYBER_ID_OWNER, HOLDING_CYBER_IDS};
pub use response::{GraphqlResponse, HoldingsData, OwnerData};

/// A GraphQL POST body
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest<V> {
    pub query: &'static str,
    pub variables: V,
    /// Operation name, used for logging only
    #[serde(skip)]
    pub operation: &'static str,
}

impl<V: Serialize> GraphqlRequest<V> {
    /// Serialize into the wire body
    ///
    /// # Errors
    ///
    /// Returns a builder error if the variables fail to serialize.
    pub fn to_body(&self) -> Result<Bytes> {
        serde_json::to_vec(self)
            .map(Bytes::from)
            .map_err(error::builder)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnerVariables<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsVariables<'a> {
    pub address: &'a str,
    pub chain_id: u64,
}

/// `cyberIdOwner(name)` request
#[must_use]
pub fn owner_query(name: &str) -> GraphqlRequest<OwnerVariables<'_>> {
    GraphqlRequest {
        query: CYBER_ID_OWNER,
        variables: OwnerVariables { name },
        operation: "cyberIdOwner",
    }
}

/// `holdingCyberIds(address, chainId)` request
#[must_use]
pub fn holdings_query(address: &str, chain_id: u64) -> GraphqlRequest<HoldingsVariables<'_>> {
    GraphqlRequest {
        query: HOLDING_CYBER_IDS,
        variables: HoldingsVariables { address, chain_id },
        operation: "holdingCyberIds",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn owner_body_shape() {
        let body = owner_query("alice").to_body().unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["variables"], json!({ "name": "alice" }));
        assert_eq!(value["query"], CYBER_ID_OWNER);
        assert!(value.get("operation").is_none());
    }

    #[test]
    fn holdings_body_shape() {
        let body = holdings_query("0xdef", 111_557_560).to_body().unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value["variables"],
            json!({ "address": "0xdef", "chainId": 111_557_560 })
        );
        assert!(value["query"].as_str().unwrap().starts_with("query holdingCyberIds("));
    }
}
