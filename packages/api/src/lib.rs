//! reqflow public API
//!
//! A configured [`HttpClient`] over the `reqflow_client` execution engine,
//! with a fluent [`RequestBuilder`] for headers, authentication and bodies.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use bytes::Bytes;
//! use reqflow::{ClientConfig, HttpClient};
//! use reqflow_client::connect::{Exchange, LoopbackProvider};
//! use http::StatusCode;
//!
//! # tokio_test::block_on(async {
//! let provider = Arc::new(LoopbackProvider::<Bytes>::new([
//!     Exchange::redirect(StatusCode::MOVED_PERMANENTLY, "https://api.example.com/v2/users"),
//!     Exchange::respond_with_body(StatusCode::OK, r#"[{"name":"ada"}]"#),
//! ]));
//! let client = HttpClient::with_config(provider.clone(), ClientConfig::browser_like())?;
//!
//! let users: Vec<serde_json::Value> = client
//!     .builder()
//!     .bearer_auth("token")
//!     .get_json("https://api.example.com/v1/users")
//!     .await?;
//! assert_eq!(users[0]["name"], "ada");
//! assert_eq!(provider.attempts(), 2);
//! # Ok::<(), reqflow::Error>(())
//! # }).unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;
pub mod client;

pub use builder::*;
pub use client::HttpClient;

// Re-export important types from client package
pub use reqflow_client::config::ClientConfig;
pub use reqflow_client::http::Response;
pub use reqflow_client::{Error, HttpClientRequest, Result};
