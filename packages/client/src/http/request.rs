//! Immutable request head
//!
//! A [`RequestDescriptor`] is a value: every mutator copies the header
//! multimap, applies one change and returns a new descriptor. The receiver
//! is never altered, so descriptors can be shared freely across attempts
//! and tasks without coordination.

use chrono::{DateTime, Utc};
use http::header::{CONNECTION, CONTENT_LENGTH, COOKIE, TRANSFER_ENCODING};
use http::{HeaderName, HeaderValue, Method, Uri, Version};

use super::date::date_header_value;
use super::headers::{Headers, header_name, header_value};
use crate::cookie::{Cookie, encode_strict};
use crate::error::{self, Result};

/// Method, URI, version and headers of an outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    version: Version,
    method: Method,
    uri: Uri,
    headers: Headers,
}

impl RequestDescriptor {
    /// Creates a descriptor with no headers.
    #[must_use]
    pub fn new(version: Version, method: Method, uri: Uri) -> Self {
        Self {
            version,
            method,
            uri,
            headers: Headers::new(),
        }
    }

    /// Creates a descriptor from a URI string.
    pub fn parse(version: Version, method: Method, uri: &str) -> Result<Self> {
        let uri = uri.parse::<Uri>().map_err(error::builder)?;
        Ok(Self::new(version, method, uri))
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    #[inline]
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    // Queries

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get_str(name)
    }

    #[must_use]
    pub fn all_headers(&self, name: &str) -> Vec<&HeaderValue> {
        self.headers.get_all(name)
    }

    #[must_use]
    pub fn contains_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    #[must_use]
    pub fn contains_header_with_value(&self, name: &str, value: &str, ignore_case: bool) -> bool {
        self.headers.contains_value(name, value, ignore_case)
    }

    #[must_use]
    pub fn header_names(&self) -> Vec<&HeaderName> {
        self.headers.names()
    }

    // Mutators: each returns a new descriptor

    fn with_headers(&self, apply: impl FnOnce(&mut Headers)) -> Self {
        let mut headers = self.headers.clone();
        apply(&mut headers);
        Self {
            version: self.version,
            method: self.method.clone(),
            uri: self.uri.clone(),
            headers,
        }
    }

    /// Adds a header value, keeping existing values for the same name.
    pub fn add_header<K, V>(&self, name: K, value: V) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        let name = header_name(name)?;
        let value = header_value(value)?;
        Ok(self.with_headers(|h| h.append(name, value)))
    }

    /// Adds several values for one header name.
    pub fn add_header_values<K, I, V>(&self, name: K, values: I) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        I: IntoIterator<Item = V>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        let name = header_name(name)?;
        let values = values
            .into_iter()
            .map(header_value)
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_headers(|h| {
            for value in values {
                h.append(name.clone(), value);
            }
        }))
    }

    /// Replaces all values of a header with one value.
    pub fn set_header<K, V>(&self, name: K, value: V) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        let name = header_name(name)?;
        let value = header_value(value)?;
        Ok(self.with_headers(|h| h.insert(name, value)))
    }

    /// Replaces all values of a header with `values`.
    pub fn set_header_values<K, I, V>(&self, name: K, values: I) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        I: IntoIterator<Item = V>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        let name = header_name(name)?;
        let values = values
            .into_iter()
            .map(header_value)
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_headers(|h| h.replace_all(name, values)))
    }

    /// Adds an HTTP-date header value.
    pub fn add_date_header<K, D>(&self, name: K, date: D) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        D: Into<DateTime<Utc>>,
    {
        self.add_header(name, date_header_value(date))
    }

    /// Adds several HTTP-date header values.
    pub fn add_date_headers<K, I, D>(&self, name: K, dates: I) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        I: IntoIterator<Item = D>,
        D: Into<DateTime<Utc>>,
    {
        self.add_header_values(name, dates.into_iter().map(date_header_value))
    }

    /// Replaces a header with one HTTP-date value.
    pub fn set_date_header<K, D>(&self, name: K, date: D) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        D: Into<DateTime<Utc>>,
    {
        self.set_header(name, date_header_value(date))
    }

    /// Replaces a header with several HTTP-date values.
    pub fn set_date_headers<K, I, D>(&self, name: K, dates: I) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        I: IntoIterator<Item = D>,
        D: Into<DateTime<Utc>>,
    {
        self.set_header_values(name, dates.into_iter().map(date_header_value))
    }

    /// Removes every value of a header. Absent names are not an error.
    #[must_use]
    pub fn remove_header(&self, name: &str) -> Self {
        self.with_headers(|h| {
            h.remove(name);
        })
    }

    /// Adds a `Cookie` header carrying the strictly encoded `name=value`.
    pub fn add_cookie(&self, cookie: &Cookie<'_>) -> Result<Self> {
        let value = encode_strict(cookie)?;
        Ok(self.with_headers(|h| h.append(COOKIE, value)))
    }

    /// Declares whether the connection should persist after this exchange.
    ///
    /// HTTP/1.1 persists by default, so `true` removes `Connection` and
    /// `false` sets `Connection: close`. HTTP/1.0 is the reverse.
    #[must_use]
    pub fn set_keep_alive(&self, keep_alive: bool) -> Self {
        let persistent_by_default = self.version >= Version::HTTP_11;
        self.with_headers(|h| match (keep_alive, persistent_by_default) {
            (true, true) | (false, false) => {
                h.remove(CONNECTION.as_str());
            }
            (true, false) => h.insert(CONNECTION, HeaderValue::from_static("keep-alive")),
            (false, true) => h.insert(CONNECTION, HeaderValue::from_static("close")),
        })
    }

    /// Switches to chunked transfer coding, dropping any `Content-Length`.
    #[must_use]
    pub fn set_transfer_encoding_chunked(&self) -> Self {
        self.with_headers(|h| {
            h.insert(TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
            h.remove(CONTENT_LENGTH.as_str());
        })
    }

    /// Returns a descriptor with a new method and the same URI and headers.
    #[must_use]
    pub fn set_method(&self, method: Method) -> Self {
        Self {
            method,
            ..self.clone()
        }
    }

    /// Returns a descriptor with a new URI and the same method and headers.
    pub fn set_uri(&self, uri: &str) -> Result<Self> {
        let uri = uri.parse::<Uri>().map_err(error::builder)?;
        Ok(self.with_uri(uri))
    }

    /// Same as [`set_uri`](Self::set_uri) for an already parsed URI.
    #[must_use]
    pub fn with_uri(&self, uri: Uri) -> Self {
        Self {
            uri,
            ..self.clone()
        }
    }

    /// Returns a descriptor speaking a different protocol version.
    #[must_use]
    pub fn with_version(&self, version: Version) -> Self {
        Self {
            version,
            ..self.clone()
        }
    }

    /// Applies an in-place header edit to a copy. Used when deriving
    /// redirect hops, where several headers change at once.
    pub(crate) fn map_headers(&self, apply: impl FnOnce(&mut Headers)) -> Self {
        self.with_headers(apply)
    }
}
