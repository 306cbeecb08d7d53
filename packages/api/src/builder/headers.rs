//! Header management and manipulation functionality
//!
//! Provides methods for setting and managing HTTP headers including
//! common headers like Content-Type, Accept, and custom headers.

use http::{HeaderName, HeaderValue};
use reqflow_client::http::{header_name, header_value};

use crate::builder::core::{ContentType, RequestBuilder};

/// Helper type for accept method that can handle both strings and ContentType enums
#[derive(Debug, Clone)]
pub enum AcceptValue {
    /// String representation of content type
    String(String),
    /// ContentType enum variant
    ContentType(ContentType),
}

impl AcceptValue {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            AcceptValue::String(s) => s,
            AcceptValue::ContentType(ct) => ct.as_str(),
        }
    }
}

impl From<&str> for AcceptValue {
    fn from(s: &str) -> Self {
        AcceptValue::String(s.to_string())
    }
}

impl From<String> for AcceptValue {
    fn from(s: String) -> Self {
        AcceptValue::String(s)
    }
}

impl From<ContentType> for AcceptValue {
    fn from(ct: ContentType) -> Self {
        AcceptValue::ContentType(ct)
    }
}

/// Header constants for common HTTP headers
pub mod header {
    pub use http::header::*;

    /// Custom X-API-Key header for API authentication
    pub const X_API_KEY: &str = "x-api-key";
}

impl<S> RequestBuilder<S> {
    /// Sets a header, replacing earlier values of the same name
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use bytes::Bytes;
    /// use reqflow::HttpClient;
    /// use reqflow_client::connect::LoopbackProvider;
    ///
    /// let client = HttpClient::new(Arc::new(LoopbackProvider::<Bytes>::new([])));
    /// let builder = client.builder().header("x-custom-header", "custom-value");
    /// ```
    #[must_use]
    pub fn header<K, V>(self, name: K, value: V) -> Self
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        match header_name(name).and_then(|name| header_value(value).map(|value| (name, value))) {
            Ok((name, value)) => self.typed_header(name, value),
            Err(e) => self.fail(e),
        }
    }

    pub(crate) fn typed_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set Content-Type header
    #[must_use]
    pub fn content_type(self, content_type: ContentType) -> Self {
        self.typed_header(
            header::CONTENT_TYPE,
            HeaderValue::from_static(content_type.as_str()),
        )
    }

    /// Set Accept header
    #[must_use]
    pub fn accept(self, accept: impl Into<AcceptValue>) -> Self {
        let accept = accept.into();
        self.header(header::ACCEPT, accept.as_str())
    }

    /// Set User-Agent header, overriding the client default
    #[must_use]
    pub fn user_agent(self, agent: &str) -> Self {
        self.header(header::USER_AGENT, agent)
    }
}
