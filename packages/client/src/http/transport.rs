//! GraphQL transport
//!
//! One POST per lookup over a fresh HTTP/1.1 connection. There is no pool:
//! lookups are rare and independent, and the connection task ends as soon as
//! the response body has been read.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, Request, Uri, header};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tokio::time::Instant;
use url::Url;

use super::compression::decode_body;
use super::headers::graphql_headers;
use crate::config::ResolverConfig;
use crate::error::{self, Result};
use crate::tls::TlsManager;

/// Sends a serialized GraphQL request and returns the raw response body.
///
/// The resolver is generic over this trait so lookups can be exercised
/// without a network.
pub trait GraphqlTransport: Send + Sync {
    fn post_json(&self, endpoint: &str, body: Bytes) -> impl Future<Output = Result<Bytes>> + Send;
}

impl<T: GraphqlTransport> GraphqlTransport for Arc<T> {
    fn post_json(&self, endpoint: &str, body: Bytes) -> impl Future<Output = Result<Bytes>> + Send {
        (**self).post_json(endpoint, body)
    }
}

/// HTTP/1.1 transport over TCP, with TLS for `https` endpoints
#[derive(Debug, Clone)]
pub struct HttpTransport {
    headers: HeaderMap,
    tls: TlsManager,
    connect_timeout: Option<Duration>,
    timeout: Option<Duration>,
    max_response_bytes: usize,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns an error if the header set cannot be built or TLS cannot be
    /// configured.
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        Ok(Self {
            headers: graphql_headers(config)?,
            tls: TlsManager::new(&config.tls)?,
            connect_timeout: config.connect_timeout,
            timeout: config.timeout,
            max_response_bytes: config.max_response_bytes,
        })
    }

    async fn execute(&self, endpoint: &str, body: Bytes) -> Result<Bytes> {
        within(self.timeout, self.send(endpoint, body))
            .await
            .and_then(|result| result)
            .map_err(|e| e.with_url(endpoint))
    }

    async fn send(&self, endpoint: &str, body: Bytes) -> Result<Bytes> {
        let url = Url::parse(endpoint).map_err(error::builder)?;
        let https = match url.scheme() {
            "https" => true,
            "http" => false,
            _ => return Err(error::url_bad_scheme(endpoint)),
        };
        let host = url
            .host_str()
            .ok_or_else(|| error::builder("endpoint has no host"))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| error::builder("endpoint has no port"))?;

        let request = self.build_request(&url, host, body)?;

        // TCP connect and TLS handshake share one deadline
        let connect_deadline = self.connect_timeout.map(|timeout| Instant::now() + timeout);

        // IPv6 literals come bracketed from the URL
        let connect_host = host.trim_start_matches('[').trim_end_matches(']');
        let tcp = until(connect_deadline, TcpStream::connect((connect_host, port)))
            .await?
            .map_err(error::connect)?;
        if let Err(e) = tcp.set_nodelay(true) {
            tracing::trace!("Failed to set TCP_NODELAY: {}", e);
        }

        if https {
            let tls = until(connect_deadline, self.tls.connect(connect_host, tcp)).await??;
            self.exchange(TokioIo::new(tls), request).await
        } else {
            self.exchange(TokioIo::new(tcp), request).await
        }
    }

    fn build_request(&self, url: &Url, host: &str, body: Bytes) -> Result<Request<Full<Bytes>>> {
        let path_and_query = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        let host_header = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        let content_length = body.len();
        let mut request = Request::new(Full::new(body));
        *request.method_mut() = Method::POST;
        *request.uri_mut() = path_and_query.parse::<Uri>().map_err(error::builder)?;

        let headers = request.headers_mut();
        headers.extend(self.headers.clone());
        headers.insert(
            header::HOST,
            HeaderValue::from_str(&host_header).map_err(error::builder)?,
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(content_length));

        Ok(request)
    }

    async fn exchange<IO>(&self, io: IO, request: Request<Full<Bytes>>) -> Result<Bytes>
    where
        IO: hyper::rt::Read + hyper::rt::Write + Unpin + Send + 'static,
    {
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(error::request)?;
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::trace!("Connection closed with error: {}", e);
            }
        });

        let response = sender.send_request(request).await.map_err(error::request)?;
        let (parts, body) = response.into_parts();
        if !parts.status.is_success() {
            // GraphQL servers report failures in the body, so it is read regardless
            tracing::debug!(status = %parts.status, "Naming service returned non-success status");
        }

        let limit = self.max_response_bytes;
        let collected = Limited::new(body, limit).collect().await.map_err(|e| {
            if e.is::<LengthLimitError>() {
                error::payload_too_large(limit)
            } else {
                error::body(e)
            }
        })?;

        decode_body(
            parts.headers.get(header::CONTENT_ENCODING),
            collected.to_bytes(),
            limit,
        )
    }
}

impl GraphqlTransport for HttpTransport {
    fn post_json(&self, endpoint: &str, body: Bytes) -> impl Future<Output = Result<Bytes>> + Send {
        self.execute(endpoint, body)
    }
}

async fn within<F: Future>(timeout: Option<Duration>, fut: F) -> Result<F::Output> {
    until(timeout.map(|timeout| Instant::now() + timeout), fut).await
}

async fn until<F: Future>(deadline: Option<Instant>, fut: F) -> Result<F::Output> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, fut)
            .await
            .map_err(|_| error::timeout()),
        None => Ok(fut.await),
    }
}
