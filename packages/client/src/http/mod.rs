//! HTTP plumbing for the naming service: the fixed header set, response
//! decompression and the transport that ties them together.

pub mod compression;
pub mod headers;
pub mod transport;

pub use compression::{ContentEncoding, decode_body};
pub use headers::graphql_headers;
pub use transport::{GraphqlTransport, HttpTransport};
