//! # CyberID resolver client
//!
//! Resolves CyberID names to owner addresses and addresses to held names by
//! querying the CyberConnect GraphQL API, and adapts the answers to the
//! wallet host's name-lookup contract.
//!
//! - **Two directions**: domain → owner address, address → held names
//! - **Two networks**: Cyber mainnet (7560) and testnet (111557560), selected
//!   from the request's chain id
//! - **Fail open to `None`**: any failure means "no answer", never an error
//!   surfaced to the host
//! - **Plain HTTP/1.1** over rustls, with gzip/deflate/brotli response decoding
//!
//! ## Usage
//!
//! ```no_run
//! use cyberid_client::prelude::*;
//!
//! # async fn run() -> cyberid_client::Result<()> {
//! let resolver = NameResolver::new()?;
//! let request = LookupRequest::for_domain("eip155:7560", "alice");
//!
//! match resolver.on_lookup(&request).await {
//!     Some(ResolutionResponse::ResolvedAddresses(found)) => println!("{}", found[0].resolved_address),
//!     _ => println!("no answer"),
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod chain;
pub mod config;
pub mod error;
pub mod graphql;
pub mod http;
pub mod lookup;
pub mod resolver;
pub mod tls;

pub mod prelude;

pub use crate::prelude::*;
