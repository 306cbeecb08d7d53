//! Redirect Handling
//!
//! Redirects are off unless a request enables them. When enabled, at most
//! the configured number of hops is followed, each on a new connection;
//! the response that ends the chain is returned as-is, redirect-class or
//! not.

mod coordinator;
mod headers;
mod policy;
mod resolver;

pub use coordinator::{Delivery, NextHop, RedirectCoordinator, RedirectDecision};
pub use policy::{
    DEFAULT_MAX_REDIRECTS, NO_REDIRECTS, RedirectLimit, RedirectState, is_redirect_status,
    redirect_method,
};
pub use resolver::{LocationResolver, RedirectTargetResolver};
