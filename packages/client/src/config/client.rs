//! Client preset configurations

use super::types::{ClientConfig, HttpVersion};

impl ClientConfig {
    /// Never follow redirects; every response is returned as received.
    ///
    /// # Examples
    /// ```
    /// use reqflow_client::config::ClientConfig;
    ///
    /// let config = ClientConfig::no_redirects();
    /// assert!(!config.follow_redirects);
    /// ```
    #[must_use]
    pub fn no_redirects() -> Self {
        Self {
            follow_redirects: false,
            ..Self::default()
        }
    }

    /// Follows up to 10 redirects, times out after 30 seconds and sends a
    /// browser-style user agent.
    ///
    /// # Examples
    /// ```
    /// use reqflow_client::config::ClientConfig;
    ///
    /// let config = ClientConfig::browser_like();
    /// assert!(config.follow_redirects);
    /// assert_eq!(config.max_redirects, 10);
    /// ```
    #[must_use]
    pub fn browser_like() -> Self {
        Self {
            version: HttpVersion::Http11,
            follow_redirects: true,
            max_redirects: 10,
            read_timeout_ms: Some(30_000),
            strip_sensitive_headers_on_redirect: true,
            user_agent: Some(concat!("reqflow/", env!("CARGO_PKG_VERSION")).to_owned()),
        }
    }
}
