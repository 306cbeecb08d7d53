//! Fluent request builder
//!
//! Builds one request step by step, then executes it through the client's
//! executor with a terminal verb method.

pub mod auth;
pub mod body;
pub mod core;
pub mod headers;
pub mod methods;

pub use core::*;
pub use headers::*;
