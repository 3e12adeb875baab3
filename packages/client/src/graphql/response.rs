use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level GraphQL response envelope
///
/// Every level below the envelope decodes leniently: a missing, null or
/// mistyped value reads as `None` instead of failing the whole body.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct GraphqlResponse<T> {
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<T>,
    #[serde(default, deserialize_with = "lenient")]
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

/// `data` of a `cyberIdOwner` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerData {
    #[serde(default, deserialize_with = "lenient")]
    pub cyber_id_by_name: Option<CyberId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyberId {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub owner: Option<Owner>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<String>,
}

impl OwnerData {
    /// `cyberIdByName.owner.address`, if every level is present
    #[must_use]
    pub fn into_owner_address(self) -> Option<String> {
        self.cyber_id_by_name?.owner?.address
    }
}

/// `data` of a `holdingCyberIds` response
#[derive(Debug, Clone, Deserialize)]
pub struct HoldingsData {
    #[serde(default, deserialize_with = "lenient")]
    pub wallet: Option<Wallet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    #[serde(default, deserialize_with = "lenient")]
    pub cyber_ids: Option<CyberIdConnection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CyberIdConnection {
    /// Each edge decodes on its own, so one bad edge does not sink the list
    #[serde(default, deserialize_with = "lenient_list")]
    pub edges: Option<Vec<Option<CyberIdEdge>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CyberIdEdge {
    #[serde(default, deserialize_with = "lenient")]
    pub node: Option<CyberIdNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CyberIdNode {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

impl HoldingsData {
    /// `wallet.cyberIds.edges[].node.name` in server order.
    ///
    /// `None` when the path up to `edges` is broken. Edges without a node or
    /// string name are skipped.
    #[must_use]
    pub fn into_names(self) -> Option<Vec<String>> {
        let edges = self.wallet?.cyber_ids?.edges?;
        Some(
            edges
                .into_iter()
                .filter_map(|edge| edge?.node?.name)
                .collect(),
        )
    }
}

/// Decode `T` if the value has the right shape, otherwise `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Decode an array element by element; `None` if the value is not an array
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<Option<T>>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .map(|item| T::deserialize(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}
