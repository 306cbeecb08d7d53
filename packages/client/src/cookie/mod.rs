//! Cookie header encoding for outbound requests

pub mod utils;

pub use ::cookie::Cookie;
pub use utils::{encode_strict, validate_cookie};
