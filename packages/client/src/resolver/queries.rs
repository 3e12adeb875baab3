//! The two GraphQL lookups
//!
//! `try_*` forms surface every failure as an `Error`; the public forms
//! collapse failures into `None` after logging them at debug level.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::NameResolver;
use crate::chain::Network;
use crate::error::{self, Result};
use crate::graphql::{self, GraphqlRequest, GraphqlResponse, HoldingsData, OwnerData};
use crate::http::GraphqlTransport;

impl<T: GraphqlTransport> NameResolver<T> {
    /// Owner address of `domain`, or `None` if it does not resolve or the
    /// lookup fails for any reason
    pub async fn resolve_owner_of_domain(&self, domain: &str, network: Network) -> Option<String> {
        self.try_owner_of_domain(domain, network)
            .await
            .unwrap_or_else(|e| {
                tracing::debug!(domain, ?network, error = %e, "Owner lookup failed");
                None
            })
    }

    /// Names held by `address` in server order, or `None` if the wallet
    /// path is missing or the lookup fails for any reason
    pub async fn resolve_holdings_of_address(&self, address: &str, network: Network) -> Option<Vec<String>> {
        self.try_holdings_of_address(address, network)
            .await
            .unwrap_or_else(|e| {
                tracing::debug!(address, ?network, error = %e, "Holdings lookup failed");
                None
            })
    }

    /// # Errors
    ///
    /// Transport failures and undecodable bodies.
    pub async fn try_owner_of_domain(&self, domain: &str, network: Network) -> Result<Option<String>> {
        let data: Option<OwnerData> = self.query(graphql::owner_query(domain), network).await?;
        Ok(data.and_then(OwnerData::into_owner_address))
    }

    /// # Errors
    ///
    /// Transport failures and undecodable bodies.
    pub async fn try_holdings_of_address(&self, address: &str, network: Network) -> Result<Option<Vec<String>>> {
        let data: Option<HoldingsData> = self
            .query(graphql::holdings_query(address, network.chain_id()), network)
            .await?;
        Ok(data.and_then(HoldingsData::into_names))
    }

    async fn query<V, D>(&self, request: GraphqlRequest<V>, network: Network) -> Result<Option<D>>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let endpoint = self.endpoints.for_testnet(network.is_testnet());
        let body = request.to_body()?;

        tracing::trace!(operation = request.operation, endpoint, "Sending GraphQL request");
        let raw = self.transport.post_json(endpoint, body).await?;

        let response: GraphqlResponse<D> = serde_json::from_slice(&raw)
            .map_err(|e| error::decode(e).with_url(endpoint))?;
        for err in response.errors.iter().flatten() {
            tracing::debug!(
                operation = request.operation,
                message = err.message.as_deref().unwrap_or_default(),
                "GraphQL error"
            );
        }

        Ok(response.data)
    }
}
