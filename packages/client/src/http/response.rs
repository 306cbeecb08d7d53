//! Response head bound to the connection that produced it
//!
//! The executor classifies exactly one inbound message as the response head.
//! Everything after it (body chunks, trailers, end of message) stays on the
//! connection and is pulled lazily through [`Response::next_chunk`] or
//! [`Response::into_body_stream`].

use std::fmt;

use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream};
use http::{HeaderValue, StatusCode, Version};

use super::headers::Headers;
use crate::connect::{Connection, ConnectionMetadata};
use crate::error::{self, Kind, Result, UnexpectedMessage};
use crate::protocols::Inbound;

/// Status line and headers of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub version: Version,
    pub status: StatusCode,
    pub headers: Headers,
}

impl ResponseHead {
    /// An HTTP/1.1 head with no headers.
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: Version::HTTP_11,
            status,
            headers: Headers::new(),
        }
    }

    /// Adds a header, returning the head for chaining.
    pub fn with_header<K, V>(mut self, name: K, value: V) -> Result<Self>
    where
        K: TryInto<http::HeaderName>,
        K::Error: Into<http::Error>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        let name = super::headers::header_name(name)?;
        let value = super::headers::header_value(value)?;
        self.headers.append(name, value);
        Ok(self)
    }
}

/// A received response head and exclusive access to the rest of the message.
pub struct Response<C: Send + 'static = Bytes> {
    head: ResponseHead,
    connection: Box<dyn Connection<C>>,
    trailers: Option<Headers>,
    finished: bool,
}

impl<C: Send + 'static> Response<C> {
    pub(crate) fn new(head: ResponseHead, connection: Box<dyn Connection<C>>) -> Self {
        Self {
            head,
            connection,
            trailers: None,
            finished: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.head.status
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> Version {
        self.head.version
    }

    #[inline]
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.head.headers
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.headers.get_str(name)
    }

    #[must_use]
    pub fn head(&self) -> &ResponseHead {
        &self.head
    }

    /// Metadata of the connection this response is bound to.
    #[must_use]
    pub fn connection(&self) -> &ConnectionMetadata {
        self.connection.metadata()
    }

    /// Trailing headers, available once the body has been read to the end.
    #[must_use]
    pub fn trailers(&self) -> Option<&Headers> {
        self.trailers.as_ref()
    }

    /// Reads the next body chunk from the bound connection.
    ///
    /// Returns `Ok(None)` once the message has ended. Trailers seen on the
    /// way are kept and exposed through [`trailers`](Self::trailers).
    pub async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        while !self.finished {
            match self.connection.read().await {
                Some(Ok(Inbound::Body(chunk))) => return Ok(Some(chunk)),
                Some(Ok(Inbound::Trailers(trailers))) => self.trailers = Some(trailers),
                Some(Ok(Inbound::End)) | None => self.finished = true,
                Some(Ok(Inbound::Head(_))) => {
                    self.finished = true;
                    return Err(error::body(UnexpectedMessage("response head inside body")));
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Err(error::reclassify(e, Kind::Body));
                }
            }
        }
        Ok(None)
    }

    /// Reads the remaining body into one buffer.
    pub async fn bytes(&mut self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.next_chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }

    /// Turns the remaining body into a stream that ends after the first error.
    pub fn into_body_stream(self) -> BoxStream<'static, Result<Bytes>> {
        Box::pin(stream::unfold(self, |mut response| async move {
            match response.next_chunk().await {
                Ok(Some(chunk)) => Some((Ok(chunk), response)),
                Ok(None) => None,
                Err(e) => Some((Err(e), response)),
            }
        }))
    }

    /// Splits the response into its head and the bound connection.
    pub fn into_parts(self) -> (ResponseHead, Box<dyn Connection<C>>) {
        (self.head, self.connection)
    }
}

impl<C: Send + 'static> fmt::Debug for Response<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.head.status)
            .field("version", &self.head.version)
            .field("headers", &self.head.headers)
            .field("connection", &self.connection.metadata().id)
            .finish()
    }
}
