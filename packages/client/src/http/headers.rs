//! Fixed request header set for the naming service

use http::{HeaderMap, HeaderValue, header};

use crate::config::ResolverConfig;
use crate::error::{self, Result};

/// Encodings advertised in `Accept-Encoding`; all of them are decoded in
/// [`super::compression`]
pub const ACCEPT_ENCODING: &str = "gzip, deflate, br";

pub const APPLICATION_JSON: &str = "application/json";

/// Build the headers sent with every GraphQL POST.
///
/// `Host` and `Content-Length` are per request and added by the transport.
///
/// # Errors
///
/// Returns a builder error if the configured origin or user agent is not a
/// valid header value.
pub fn graphql_headers(config: &ResolverConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(6);
    headers.insert(
        header::ACCEPT_ENCODING,
        HeaderValue::from_static(ACCEPT_ENCODING),
    );
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(header::ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        header::ORIGIN,
        HeaderValue::from_str(&config.origin).map_err(error::builder)?,
    );

    if let Some(ref user_agent) = config.user_agent {
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(user_agent).map_err(error::builder)?,
        );
    }

    Ok(headers)
}
