//! # Reqflow Client
//!
//! Client-side HTTP request execution over pluggable connections.
//!
//! A request is an immutable [`RequestDescriptor`](crate::http::RequestDescriptor)
//! plus an optional [`ContentSpec`](crate::content::ContentSpec). Executing it
//! acquires one connection, stamps it with a correlation context, streams
//! the lazily sequenced frames into it, and reads exactly one response head
//! back. Redirect-class responses can be followed up to a bounded number of
//! hops, each on a fresh connection.
//!
//! ## Features
//!
//! - **Copy-on-write requests**: every mutator returns a new value
//! - **Lazy frame sequencing** with per-unit flush control and folded trailers
//! - **Per-attempt correlation** delivered on the connection's control channel
//! - **Write instrumentation** hooks with a lock-free metrics sink
//! - **Bounded redirects** with method rewriting and credential stripping
//! - **Loopback transport** for offline use and testing
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use bytes::Bytes;
//! use reqflow_client::connect::{Exchange, LoopbackProvider};
//! use reqflow_client::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let provider = Arc::new(LoopbackProvider::<Bytes>::new([
//!     Exchange::redirect(StatusCode::FOUND, "/moved"),
//!     Exchange::respond(StatusCode::OK),
//! ]));
//! let executor = RequestExecutor::new(provider.clone());
//! let request = HttpClientRequest::new(
//!     RequestDescriptor::parse(Version::HTTP_11, Method::GET, "/start")?,
//!     executor,
//! )
//! .follow_redirects(true);
//!
//! let response = request.execute().await?;
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(provider.attempts(), 2);
//! # Ok::<(), reqflow_client::Error>(())
//! # }).unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod connect;
pub mod content;
pub mod cookie;
pub mod correlation;
pub mod error;
pub mod http;
pub mod protocols;
pub mod redirect;
pub mod telemetry;

// Prelude with canonical types
pub mod prelude;

pub use crate::client::{HttpClientRequest, RequestExecutor};
pub use crate::error::{Error, Result};
