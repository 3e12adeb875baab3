//! Host-facing lookup handlers
//!
//! The wallet host calls one entry point per name lookup and treats `null`
//! as "no opinion". These functions never fail: anything that goes wrong,
//! including a request that does not match the contract, yields `None` or
//! JSON `null`.

use cyberid_client::{GraphqlTransport, LookupRequest, NameResolver, ResolutionResponse};
use serde_json::Value;

use crate::global_resolver;

/// Answer a lookup with the global resolver
pub async fn on_name_lookup(request: &LookupRequest) -> Option<ResolutionResponse> {
    let resolver = global_resolver()?;
    resolver.on_lookup(request).await
}

/// Answer a JSON lookup with the global resolver
pub async fn on_name_lookup_json(request: Value) -> Value {
    match global_resolver() {
        Some(resolver) => lookup_json(&*resolver, request).await,
        None => Value::Null,
    }
}

/// Answer a JSON lookup (`{ chainId, address?, domain? }`) with `resolver`.
///
/// Returns `{ "resolvedDomains": [...] }`, `{ "resolvedAddresses": [...] }`
/// or `null`.
pub async fn lookup_json<T: GraphqlTransport>(resolver: &NameResolver<T>, request: Value) -> Value {
    let request: LookupRequest = match serde_json::from_value(request) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "Malformed lookup request");
            return Value::Null;
        }
    };

    match resolver.on_lookup(&request).await {
        Some(response) => serde_json::to_value(response).unwrap_or(Value::Null),
        None => Value::Null,
    }
}
