//! Core client configuration structure

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::redirect::{DEFAULT_MAX_REDIRECTS, RedirectLimit};

/// Protocol version written in request heads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HttpVersion {
    #[serde(rename = "HTTP/1.0")]
    Http10,
    #[default]
    #[serde(rename = "HTTP/1.1")]
    Http11,
}

impl From<HttpVersion> for http::Version {
    fn from(version: HttpVersion) -> Self {
        match version {
            HttpVersion::Http10 => http::Version::HTTP_10,
            HttpVersion::Http11 => http::Version::HTTP_11,
        }
    }
}

/// HTTP client configuration
///
/// Defaults applied to every request a client creates. Individual requests
/// can still override redirects and the read timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Version of outgoing request heads
    pub version: HttpVersion,

    /// Follow redirect-class responses
    pub follow_redirects: bool,

    /// Hop budget when following redirects
    pub max_redirects: u32,

    /// Wait limit for each response head, in milliseconds
    pub read_timeout_ms: Option<u64>,

    /// Remove credentials when a redirect changes host or port
    pub strip_sensitive_headers_on_redirect: bool,

    /// `User-Agent` added to every request
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: HttpVersion::Http11,
            follow_redirects: false,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            read_timeout_ms: None,
            strip_sensitive_headers_on_redirect: true,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }

    /// Redirect limit new requests start with.
    #[must_use]
    pub fn redirect_limit(&self) -> RedirectLimit {
        if self.follow_redirects {
            RedirectLimit::Max(self.max_redirects)
        } else {
            RedirectLimit::Disabled
        }
    }
}
