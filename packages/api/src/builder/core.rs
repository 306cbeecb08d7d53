//! Core `RequestBuilder` structures and base functionality
//!
//! Contains the builder struct, its body-state markers and the conversion
//! of a finished builder into an executable request.

use std::time::Duration;

use bytes::Bytes;
use http::Method;
use reqflow_client::http::Headers;
use reqflow_client::redirect::RedirectLimit;
use reqflow_client::{Error, HttpClientRequest, Result};
use url::Url;

use crate::client::HttpClient;

/// Content type enumeration for elegant API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// application/json content type
    ApplicationJson,
    /// application/x-www-form-urlencoded content type
    ApplicationFormUrlEncoded,
    /// application/octet-stream content type
    ApplicationOctetStream,
    /// text/plain content type
    TextPlain,
}

impl ContentType {
    /// Convert content type to string representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::ApplicationJson => "application/json",
            ContentType::ApplicationFormUrlEncoded => "application/x-www-form-urlencoded",
            ContentType::ApplicationOctetStream => "application/octet-stream",
            ContentType::TextPlain => "text/plain",
        }
    }
}

/// State marker indicating no body has been set
#[derive(Debug, Clone, Copy)]
pub struct BodyNotSet;

/// State holding the serialized body
#[derive(Debug, Clone)]
pub struct BodySet {
    pub(crate) content: Bytes,
}

/// Fluent builder for one request
///
/// Type parameter `S` tracks the body state:
/// - `BodyNotSet`: body methods and bodiless verbs available
/// - `BodySet`: body has been set, only body-carrying verbs available
///
/// Invalid input (a bad header value, an unserializable body) does not
/// panic or get dropped; the first such error is kept and returned when
/// the request is sent.
#[derive(Debug)]
pub struct RequestBuilder<S = BodyNotSet> {
    pub(crate) client: HttpClient,
    pub(crate) headers: Headers,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) redirects: Option<RedirectLimit>,
    pub(crate) read_timeout: Option<Duration>,
    pub(crate) error: Option<Error>,
    pub(crate) state: S,
}

impl RequestBuilder<BodyNotSet> {
    #[must_use]
    pub fn new(client: &HttpClient) -> Self {
        Self {
            client: client.clone(),
            headers: Headers::new(),
            query: Vec::new(),
            redirects: None,
            read_timeout: None,
            error: None,
            state: BodyNotSet,
        }
    }
}

impl<S> RequestBuilder<S> {
    /// Overrides the client's redirect setting for this request.
    #[must_use]
    pub fn follow_redirects(mut self, limit: impl Into<RedirectLimit>) -> Self {
        self.redirects = Some(limit.into());
        self
    }

    /// Overrides the client's read timeout for this request.
    #[must_use]
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Appends a query parameter to the URL given at send time.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub(crate) fn fail(mut self, error: Error) -> Self {
        if self.error.is_none() {
            log::warn!("reqflow builder: {error}");
            self.error = Some(error);
        }
        self
    }

    pub(crate) fn with_state<T>(self, state: T) -> RequestBuilder<T> {
        RequestBuilder {
            client: self.client,
            headers: self.headers,
            query: self.query,
            redirects: self.redirects,
            read_timeout: self.read_timeout,
            error: self.error,
            state,
        }
    }

    /// Resolves the builder into an executable request plus its body state.
    pub(crate) fn into_request(self, method: Method, url: &str) -> Result<(HttpClientRequest, S)> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let mut url = Url::parse(url).map_err(reqflow_client::error::builder)?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        let mut request = self.client.request(method, url.as_str())?;
        for name in self.headers.names() {
            let values = self.headers.get_all(name.as_str()).into_iter().cloned();
            request = request.set_header_values(name.clone(), values)?;
        }
        if let Some(limit) = self.redirects {
            request = request.follow_redirects(limit);
        }
        if let Some(timeout) = self.read_timeout {
            request = request.read_timeout(timeout);
        }

        Ok((request, self.state))
    }
}
