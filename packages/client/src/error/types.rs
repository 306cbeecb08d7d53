use std::error::Error as StdError;
use std::fmt;

use http::Uri;

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// A `Result` alias where the `Err` case is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while building or executing a request.
///
/// Every failure reaches the caller of `execute()`; nothing in the engine
/// retries or swallows an error.
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    source: Option<BoxError>,
    uri: Option<Uri>,
}

/// Classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Invalid request construction: header names/values, URIs, cookies.
    Builder,
    /// The connection provider could not supply a connection.
    Connect,
    /// Frame emission failed: content source, transport or correlation attach.
    Write,
    /// The connection failed or closed before a response head arrived.
    Read,
    /// No response head arrived within the configured read timeout.
    Timeout,
    /// Reading the response body from the bound connection failed.
    Body,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                uri: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<BoxError>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_uri(mut self, uri: Uri) -> Self {
        self.inner.uri = Some(uri);
        self
    }

    /// The classification of this error.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// The request URI this error relates to, if known.
    #[must_use]
    pub fn uri(&self) -> Option<&Uri> {
        self.inner.uri.as_ref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("reqflow::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref uri) = self.inner.uri {
            f.field("uri", uri);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::Builder => f.write_str("builder error")?,
            Kind::Connect => f.write_str("error acquiring connection")?,
            Kind::Write => f.write_str("error writing request")?,
            Kind::Read => f.write_str("error reading response head")?,
            Kind::Timeout => f.write_str("timed out awaiting response")?,
            Kind::Body => f.write_str("response body error")?,
        }

        if let Some(ref uri) = self.inner.uri {
            write!(f, " for uri ({uri})")?;
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
