//! Per-attempt request correlation
//!
//! A new request id is requested from the correlator for every write
//! attempt, redirect hops included.

pub mod context;
pub mod correlator;
pub mod propagator;

pub use context::{ContextsContainer, CorrelationContext};
pub use correlator::{RandomCorrelator, RequestCorrelator};
pub use propagator::attach;
