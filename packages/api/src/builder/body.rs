//! Request body methods
//!
//! Serializes a body once, sets its `Content-Type` and `Content-Length`,
//! and moves the builder into the `BodySet` state.

use bytes::Bytes;
use http::HeaderValue;
use serde::Serialize;

use crate::builder::core::{BodyNotSet, BodySet, ContentType, RequestBuilder};
use crate::builder::headers::header;

impl RequestBuilder<BodyNotSet> {
    /// Serializes `body` as JSON
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use bytes::Bytes;
    /// use reqflow::HttpClient;
    /// use reqflow_client::connect::LoopbackProvider;
    ///
    /// #[derive(serde::Serialize)]
    /// struct User { name: &'static str }
    ///
    /// let client = HttpClient::new(Arc::new(LoopbackProvider::<Bytes>::new([])));
    /// let builder = client.builder().json(&User { name: "ada" });
    /// ```
    #[must_use]
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> RequestBuilder<BodySet> {
        match serde_json::to_vec(body) {
            Ok(bytes) => self.with_body(ContentType::ApplicationJson, bytes),
            Err(e) => self
                .fail(reqflow_client::error::builder(e))
                .with_body(ContentType::ApplicationJson, Vec::new()),
        }
    }

    /// Serializes `body` as `application/x-www-form-urlencoded`
    #[must_use]
    pub fn form<T: Serialize + ?Sized>(self, body: &T) -> RequestBuilder<BodySet> {
        match serde_urlencoded::to_string(body) {
            Ok(encoded) => self.with_body(ContentType::ApplicationFormUrlEncoded, encoded),
            Err(e) => self
                .fail(reqflow_client::error::builder(e))
                .with_body(ContentType::ApplicationFormUrlEncoded, Vec::new()),
        }
    }

    /// Raw bytes sent as `application/octet-stream`
    #[must_use]
    pub fn raw_body(self, bytes: impl Into<Bytes>) -> RequestBuilder<BodySet> {
        self.with_body(ContentType::ApplicationOctetStream, bytes)
    }

    /// Text sent as `text/plain`
    #[must_use]
    pub fn text_body(self, text: &str) -> RequestBuilder<BodySet> {
        self.with_body(ContentType::TextPlain, text.to_owned())
    }

    fn with_body(self, content_type: ContentType, content: impl Into<Bytes>) -> RequestBuilder<BodySet> {
        let content = content.into();
        let builder = if self.headers.contains(header::CONTENT_TYPE.as_str()) {
            self
        } else {
            self.content_type(content_type)
        };
        builder
            .typed_header(header::CONTENT_LENGTH, HeaderValue::from(content.len()))
            .with_state(BodySet { content })
    }
}
