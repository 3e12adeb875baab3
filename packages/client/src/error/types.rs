use std::error::Error as StdError;
use std::fmt;

/// A Result alias where the Err case is `cyberid_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while talking to the naming service.
///
/// These never cross the lookup boundary: the resolver collapses every
/// `Error` into "no answer". They exist so the inner steps can use `?` and
/// so failures can be logged with their cause.
pub struct Error {
    pub inner: Box<Inner>,
}

pub struct Inner {
    pub kind: Kind,
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Bad configuration or an unbuildable request
    Builder,
    /// Failure while sending the request or reading the response head
    Request,
    /// TCP connection failure
    Connect,
    /// TLS setup or handshake failure
    Tls,
    /// Failure while reading the response body
    Body,
    /// Body could not be decompressed or parsed as JSON
    Decode,
    /// Connect or request timeout elapsed
    Timeout,
    /// Response body exceeded the configured limit
    PayloadTooLarge,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner { kind, source: None, url: None }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.inner.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// Get the endpoint associated with this error, if any
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.inner.url.as_deref()
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.inner.kind == Kind::Timeout
    }

    #[must_use]
    pub fn is_decode(&self) -> bool {
        self.inner.kind == Kind::Decode
    }

    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self.inner.kind, Kind::Connect | Kind::Tls)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("cyberid_client::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref url) = self.inner.url {
            f.field("url", url);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::Builder => f.write_str("builder error")?,
            Kind::Request => f.write_str("error sending request")?,
            Kind::Connect => f.write_str("error connecting to naming service")?,
            Kind::Tls => f.write_str("tls error")?,
            Kind::Body => f.write_str("response body error")?,
            Kind::Decode => f.write_str("error decoding response body")?,
            Kind::Timeout => f.write_str("request timeout")?,
            Kind::PayloadTooLarge => f.write_str("response body too large")?,
        }

        if let Some(ref url) = self.inner.url {
            write!(f, " for url ({url})")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
