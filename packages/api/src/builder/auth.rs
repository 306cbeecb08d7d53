//! Authentication methods for HTTP requests
//!
//! Provides convenient methods for setting authentication headers including
//! API keys, basic authentication, and bearer token authentication. Every
//! credential header is marked sensitive so it is masked in debug output.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::{HeaderName, HeaderValue};

use crate::builder::core::RequestBuilder;
use crate::builder::headers::header;

fn sensitive(value: &str) -> Result<HeaderValue, http::header::InvalidHeaderValue> {
    let mut value = HeaderValue::from_str(value)?;
    value.set_sensitive(true);
    Ok(value)
}

impl<S> RequestBuilder<S> {
    /// Set API key authentication header
    ///
    /// Adds an `X-API-Key` header with the provided API key value.
    #[must_use]
    pub fn api_key(self, key: &str) -> Self {
        match sensitive(key) {
            Ok(value) => self.typed_header(HeaderName::from_static(header::X_API_KEY), value),
            Err(e) => self.fail(reqflow_client::error::builder(e)),
        }
    }

    /// Set basic authentication header
    ///
    /// The `user:password` pair is base64 encoded as required by RFC 7617.
    /// Without a password the pair is encoded as `user:`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use bytes::Bytes;
    /// use reqflow::HttpClient;
    /// use reqflow_client::connect::LoopbackProvider;
    ///
    /// let client = HttpClient::new(Arc::new(LoopbackProvider::<Bytes>::new([])));
    /// let builder = client.builder().basic_auth("aladdin", Some("opensesame"));
    /// ```
    #[must_use]
    pub fn basic_auth(self, username: &str, password: Option<&str>) -> Self {
        let credentials = format!("{username}:{}", password.unwrap_or_default());
        let encoded = STANDARD.encode(credentials);
        match sensitive(&format!("Basic {encoded}")) {
            Ok(value) => self.typed_header(header::AUTHORIZATION, value),
            Err(e) => self.fail(reqflow_client::error::builder(e)),
        }
    }

    /// Set bearer token authentication header
    ///
    /// Creates a Bearer token authentication header for OAuth2 and similar token-based
    /// authentication schemes.
    #[must_use]
    pub fn bearer_auth(self, token: &str) -> Self {
        match sensitive(&format!("Bearer {token}")) {
            Ok(value) => self.typed_header(header::AUTHORIZATION, value),
            Err(e) => self.fail(reqflow_client::error::builder(e)),
        }
    }
}
