//! Executable client requests
//!
//! [`HttpClientRequest`] bundles a descriptor, its content attachment, the
//! redirect budget and the executor. Like the descriptor it wraps, every
//! configuration call returns a new request and leaves the receiver as it
//! was, so one request value can be executed any number of times.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::{HeaderName, HeaderValue, Method, Uri, Version};

use super::executor::RequestExecutor;
use crate::content::{ContentSource, ContentSpec, FlushSelector, TrailerFold, TrailingHeaders};
use crate::cookie::Cookie;
use crate::error::Result;
use crate::http::{Headers, RequestDescriptor, Response};
use crate::redirect::RedirectLimit;

/// A request ready to execute.
pub struct HttpClientRequest<C: Send + 'static = Bytes> {
    descriptor: RequestDescriptor,
    content: ContentSpec<C>,
    redirects: RedirectLimit,
    executor: RequestExecutor<C>,
}

impl<C: Send + 'static> HttpClientRequest<C> {
    #[must_use]
    pub fn new(descriptor: RequestDescriptor, executor: RequestExecutor<C>) -> Self {
        Self {
            descriptor,
            content: ContentSpec::empty(),
            redirects: RedirectLimit::Disabled,
            executor,
        }
    }

    fn with_descriptor(&self, descriptor: RequestDescriptor) -> Self {
        Self {
            descriptor,
            ..self.clone()
        }
    }

    fn with_content(&self, content: ContentSpec<C>) -> Self {
        Self {
            content,
            ..self.clone()
        }
    }

    /// Executes the request, yielding exactly one response.
    ///
    /// Every call acquires a fresh connection; nothing is reused between
    /// executions.
    pub async fn execute(&self) -> Result<Response<C>> {
        self.executor
            .execute(
                self.descriptor.clone(),
                &self.content,
                self.redirects.initial_state(),
            )
            .await
    }

    // Redirects and timeouts

    /// Enables or bounds redirect following: `true`, `false`, a hop count,
    /// or [`NO_REDIRECTS`](crate::redirect::NO_REDIRECTS).
    #[must_use]
    pub fn follow_redirects(&self, limit: impl Into<RedirectLimit>) -> Self {
        Self {
            redirects: limit.into(),
            ..self.clone()
        }
    }

    /// Bounds the wait for each response head.
    #[must_use]
    pub fn read_timeout(&self, timeout: Duration) -> Self {
        Self {
            executor: self.executor.clone().with_read_timeout(Some(timeout)),
            ..self.clone()
        }
    }

    // Content

    /// Attaches content, buffered until the terminal frame.
    #[must_use]
    pub fn write_content(&self, source: ContentSource<C>) -> Self {
        self.with_content(ContentSpec::new(source))
    }

    /// Attaches content, flushing after every unit.
    #[must_use]
    pub fn write_content_and_flush_on_each(&self, source: ContentSource<C>) -> Self {
        self.with_content(ContentSpec::new(source).with_flush_selector(FlushSelector::always()))
    }

    /// Attaches content, flushing after units chosen by `selector`.
    #[must_use]
    pub fn write_content_with_flush<F>(&self, source: ContentSource<C>, selector: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.with_content(ContentSpec::new(source).with_flush_selector(FlushSelector::new(selector)))
    }

    /// Attaches content and trailers folded over it.
    #[must_use]
    pub fn write_content_with_trailers<T, F, M>(
        &self,
        source: ContentSource<C>,
        trailer_factory: F,
        trailer_mutator: M,
    ) -> Self
    where
        T: TrailingHeaders + Send + 'static,
        F: Fn() -> T + Send + Sync + 'static,
        M: Fn(T, &C) -> T + Send + Sync + 'static,
    {
        self.with_content(
            ContentSpec::new(source).with_trailers(TrailerFold::new(trailer_factory, trailer_mutator)),
        )
    }

    /// Attaches content with folded trailers and a flush selector.
    #[must_use]
    pub fn write_content_with_trailers_and_flush<T, F, M, S>(
        &self,
        source: ContentSource<C>,
        trailer_factory: F,
        trailer_mutator: M,
        selector: S,
    ) -> Self
    where
        T: TrailingHeaders + Send + 'static,
        F: Fn() -> T + Send + Sync + 'static,
        M: Fn(T, &C) -> T + Send + Sync + 'static,
        S: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.with_content(
            ContentSpec::new(source)
                .with_trailers(TrailerFold::new(trailer_factory, trailer_mutator))
                .with_flush_selector(FlushSelector::new(selector)),
        )
    }

    // Headers

    pub fn add_header<K, V>(&self, name: K, value: V) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        Ok(self.with_descriptor(self.descriptor.add_header(name, value)?))
    }

    pub fn add_header_values<K, I, V>(&self, name: K, values: I) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        I: IntoIterator<Item = V>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        Ok(self.with_descriptor(self.descriptor.add_header_values(name, values)?))
    }

    pub fn set_header<K, V>(&self, name: K, value: V) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        Ok(self.with_descriptor(self.descriptor.set_header(name, value)?))
    }

    pub fn set_header_values<K, I, V>(&self, name: K, values: I) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        I: IntoIterator<Item = V>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        Ok(self.with_descriptor(self.descriptor.set_header_values(name, values)?))
    }

    pub fn add_date_header<K, D>(&self, name: K, date: D) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        D: Into<DateTime<Utc>>,
    {
        Ok(self.with_descriptor(self.descriptor.add_date_header(name, date)?))
    }

    pub fn add_date_headers<K, I, D>(&self, name: K, dates: I) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        I: IntoIterator<Item = D>,
        D: Into<DateTime<Utc>>,
    {
        Ok(self.with_descriptor(self.descriptor.add_date_headers(name, dates)?))
    }

    pub fn set_date_header<K, D>(&self, name: K, date: D) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        D: Into<DateTime<Utc>>,
    {
        Ok(self.with_descriptor(self.descriptor.set_date_header(name, date)?))
    }

    pub fn set_date_headers<K, I, D>(&self, name: K, dates: I) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        I: IntoIterator<Item = D>,
        D: Into<DateTime<Utc>>,
    {
        Ok(self.with_descriptor(self.descriptor.set_date_headers(name, dates)?))
    }

    #[must_use]
    pub fn remove_header(&self, name: &str) -> Self {
        self.with_descriptor(self.descriptor.remove_header(name))
    }

    pub fn add_cookie(&self, cookie: &Cookie<'_>) -> Result<Self> {
        Ok(self.with_descriptor(self.descriptor.add_cookie(cookie)?))
    }

    #[must_use]
    pub fn set_keep_alive(&self, keep_alive: bool) -> Self {
        self.with_descriptor(self.descriptor.set_keep_alive(keep_alive))
    }

    #[must_use]
    pub fn set_transfer_encoding_chunked(&self) -> Self {
        self.with_descriptor(self.descriptor.set_transfer_encoding_chunked())
    }

    #[must_use]
    pub fn set_method(&self, method: Method) -> Self {
        self.with_descriptor(self.descriptor.set_method(method))
    }

    pub fn set_uri(&self, uri: &str) -> Result<Self> {
        Ok(self.with_descriptor(self.descriptor.set_uri(uri)?))
    }

    // Queries

    #[must_use]
    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn content(&self) -> &ContentSpec<C> {
        &self.content
    }

    #[must_use]
    pub fn redirect_limit(&self) -> RedirectLimit {
        self.redirects
    }

    #[must_use]
    pub fn version(&self) -> Version {
        self.descriptor.version()
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        self.descriptor.method()
    }

    #[must_use]
    pub fn uri(&self) -> &Uri {
        self.descriptor.uri()
    }

    #[must_use]
    pub fn headers(&self) -> &Headers {
        self.descriptor.headers()
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.descriptor.header(name)
    }

    #[must_use]
    pub fn all_headers(&self, name: &str) -> Vec<&HeaderValue> {
        self.descriptor.all_headers(name)
    }

    #[must_use]
    pub fn contains_header(&self, name: &str) -> bool {
        self.descriptor.contains_header(name)
    }

    #[must_use]
    pub fn contains_header_with_value(&self, name: &str, value: &str, ignore_case: bool) -> bool {
        self.descriptor
            .contains_header_with_value(name, value, ignore_case)
    }

    #[must_use]
    pub fn header_names(&self) -> Vec<&HeaderName> {
        self.descriptor.header_names()
    }

    pub fn header_iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.descriptor.headers().iter()
    }
}

impl HttpClientRequest<Bytes> {
    /// Attaches a string body as a single content unit.
    #[must_use]
    pub fn write_string_content(&self, content: impl Into<String>) -> Self {
        self.write_content(ContentSource::from_string(content))
    }

    /// Attaches a byte body as a single content unit.
    #[must_use]
    pub fn write_bytes_content(&self, content: impl Into<Bytes>) -> Self {
        self.write_content(ContentSource::from_bytes(content))
    }

    /// Attaches string units, flushing after units chosen by `selector`.
    #[must_use]
    pub fn write_string_units<I, S, F>(&self, units: I, selector: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Bytes) -> bool + Send + Sync + 'static,
    {
        let source = ContentSource::from_units(units.into_iter().map(|s| Bytes::from(s.into())));
        self.write_content_with_flush(source, selector)
    }
}

impl<C: Send + 'static> Clone for HttpClientRequest<C> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            content: self.content.clone(),
            redirects: self.redirects,
            executor: self.executor.clone(),
        }
    }
}

impl<C: Send + 'static> fmt::Debug for HttpClientRequest<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClientRequest")
            .field("descriptor", &self.descriptor)
            .field("content", &self.content)
            .field("redirects", &self.redirects)
            .finish_non_exhaustive()
    }
}
