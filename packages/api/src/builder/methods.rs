//! HTTP method implementations
//!
//! Terminal methods that resolve the builder and execute the request.
//! Bodiless verbs live on `BodyNotSet`; body-carrying verbs on `BodySet`.

use http::Method;
use reqflow_client::Result;
use reqflow_client::http::Response;
use serde::de::DeserializeOwned;

use crate::builder::core::{BodyNotSet, BodySet, RequestBuilder};

// Terminal methods for BodyNotSet (no body required)
impl RequestBuilder<BodyNotSet> {
    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// Returns builder errors recorded while configuring, and any error
    /// from executing the request.
    pub async fn get(self, url: &str) -> Result<Response> {
        self.send(Method::GET, url).await
    }

    /// Execute a GET request and deserialize the JSON response body
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get), plus a body error if the response is not
    /// valid JSON for `T`.
    pub async fn get_json<T: DeserializeOwned>(self, url: &str) -> Result<T> {
        let mut response = self.get(url).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(reqflow_client::error::body)
    }

    /// Execute a DELETE request
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn delete(self, url: &str) -> Result<Response> {
        self.send(Method::DELETE, url).await
    }

    /// Execute a HEAD request
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn head(self, url: &str) -> Result<Response> {
        self.send(Method::HEAD, url).await
    }

    /// Execute an OPTIONS request
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn options(self, url: &str) -> Result<Response> {
        self.send(Method::OPTIONS, url).await
    }

    /// Execute a bodiless request with any method
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn send(self, method: Method, url: &str) -> Result<Response> {
        log::debug!("reqflow: {method} {url}");
        let (request, BodyNotSet) = self.into_request(method, url)?;
        request.execute().await
    }
}

// Terminal methods for BodySet (body required)
impl RequestBuilder<BodySet> {
    /// Execute a POST request
    ///
    /// # Errors
    ///
    /// Returns builder errors recorded while configuring (including body
    /// serialization), and any error from executing the request.
    pub async fn post(self, url: &str) -> Result<Response> {
        self.send(Method::POST, url).await
    }

    /// Execute a PUT request
    ///
    /// # Errors
    ///
    /// See [`post`](Self::post).
    pub async fn put(self, url: &str) -> Result<Response> {
        self.send(Method::PUT, url).await
    }

    /// Execute a PATCH request
    ///
    /// # Errors
    ///
    /// See [`post`](Self::post).
    pub async fn patch(self, url: &str) -> Result<Response> {
        self.send(Method::PATCH, url).await
    }

    /// Execute a request carrying the body with any method
    ///
    /// # Errors
    ///
    /// See [`post`](Self::post).
    pub async fn send(self, method: Method, url: &str) -> Result<Response> {
        log::debug!("reqflow: {method} {url}");
        let (request, body) = self.into_request(method, url)?;
        log::debug!("reqflow: request body size: {} bytes", body.content.len());
        request.write_bytes_content(body.content).execute().await
    }
}
