//! Configured client handle
//!
//! An [`HttpClient`] binds a connection provider to a [`ClientConfig`] and
//! stamps every request it creates with the configured version, redirect
//! budget, read timeout and user agent.

use std::sync::Arc;

use bytes::Bytes;
use http::Method;
use http::header::USER_AGENT;
use reqflow_client::config::{ClientConfig, Validator};
use reqflow_client::connect::ConnectionProvider;
use reqflow_client::correlation::RequestCorrelator;
use reqflow_client::http::RequestDescriptor;
use reqflow_client::redirect::RedirectCoordinator;
use reqflow_client::telemetry::HttpClientEvents;
use reqflow_client::{HttpClientRequest, RequestExecutor, Result};

use crate::builder::RequestBuilder;

/// Shareable client. Cloning is cheap; clones use the same provider.
#[derive(Clone, Debug)]
pub struct HttpClient {
    executor: RequestExecutor<Bytes>,
    config: ClientConfig,
}

impl HttpClient {
    /// Client with the default configuration.
    #[must_use]
    pub fn new(provider: Arc<dyn ConnectionProvider<Bytes>>) -> Self {
        Self::configured(provider, ClientConfig::default())
    }

    /// Client with `config`, rejected if the configuration is invalid.
    ///
    /// # Errors
    ///
    /// Returns a builder error naming the first invalid setting.
    pub fn with_config(
        provider: Arc<dyn ConnectionProvider<Bytes>>,
        config: ClientConfig,
    ) -> Result<Self> {
        config.validate().map_err(reqflow_client::error::builder)?;
        Ok(Self::configured(provider, config))
    }

    fn configured(provider: Arc<dyn ConnectionProvider<Bytes>>, config: ClientConfig) -> Self {
        let coordinator = RedirectCoordinator::default()
            .strip_sensitive_headers(config.strip_sensitive_headers_on_redirect);
        let executor = RequestExecutor::new(provider)
            .with_coordinator(coordinator)
            .with_read_timeout(config.read_timeout());
        Self { executor, config }
    }

    #[must_use]
    pub fn with_correlator(mut self, correlator: Arc<dyn RequestCorrelator>) -> Self {
        self.executor = self.executor.with_correlator(correlator);
        self
    }

    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn HttpClientEvents>) -> Self {
        self.executor = self.executor.with_events(events);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Starts a fluent request.
    #[must_use]
    pub fn builder(&self) -> RequestBuilder {
        RequestBuilder::new(self)
    }

    /// A request for `method` and `uri` carrying the client defaults.
    ///
    /// # Errors
    ///
    /// Returns a builder error if `uri` does not parse or the configured
    /// user agent is not a valid header value.
    pub fn request(&self, method: Method, uri: &str) -> Result<HttpClientRequest> {
        let mut descriptor = RequestDescriptor::parse(self.config.version.into(), method, uri)?;
        if let Some(agent) = &self.config.user_agent {
            descriptor = descriptor.set_header(USER_AGENT, agent.as_str())?;
        }
        Ok(HttpClientRequest::new(descriptor, self.executor.clone())
            .follow_redirects(self.config.redirect_limit()))
    }

    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub fn get(&self, uri: &str) -> Result<HttpClientRequest> {
        self.request(Method::GET, uri)
    }

    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub fn post(&self, uri: &str) -> Result<HttpClientRequest> {
        self.request(Method::POST, uri)
    }

    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub fn put(&self, uri: &str) -> Result<HttpClientRequest> {
        self.request(Method::PUT, uri)
    }

    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub fn delete(&self, uri: &str) -> Result<HttpClientRequest> {
        self.request(Method::DELETE, uri)
    }

    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub fn patch(&self, uri: &str) -> Result<HttpClientRequest> {
        self.request(Method::PATCH, uri)
    }

    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub fn head(&self, uri: &str) -> Result<HttpClientRequest> {
        self.request(Method::HEAD, uri)
    }

    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub fn options(&self, uri: &str) -> Result<HttpClientRequest> {
        self.request(Method::OPTIONS, uri)
    }
}
