//! Types most users of the resolver need

pub use crate::chain::{CYBER_MAINNET_ID, CYBER_TESTNET_ID, Network};
pub use crate::config::{ConfigError, Endpoints, ResolverConfig, TlsConfig};
pub use crate::error::{Error, Kind, Result};
pub use crate::http::{GraphqlTransport, HttpTransport};
pub use crate::lookup::{
    LookupRequest, LookupTarget, PROTOCOL_LABEL, ResolutionResponse, ResolvedAddress, ResolvedDomain,
};
pub use crate::resolver::NameResolver;
