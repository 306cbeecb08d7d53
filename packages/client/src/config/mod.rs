//! Client configuration
//!
//! A serializable [`ClientConfig`] with presets and validation.

pub mod client;
pub mod types;
pub mod validation;

pub use crate::redirect::DEFAULT_MAX_REDIRECTS;
pub use types::{ClientConfig, HttpVersion};
pub use validation::{ConfigResult, ConfigValidator, ConfigurationError, Validator};
