//! Request correlators

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::context::ContextsContainer;
use crate::error::Result;
use crate::http::RequestDescriptor;

/// Supplies tracing identity for each write attempt.
pub trait RequestCorrelator: Send + Sync {
    /// Generates or looks up the request id for one attempt at `request`.
    fn request_id_for_attempt(&self, request: &RequestDescriptor) -> Result<String>;

    /// Resolves the container associated with `request_id`.
    fn context_for_id(&self, request_id: &str) -> Result<ContextsContainer>;
}

/// Correlator minting a random 128-bit hex id per attempt.
///
/// Containers registered with [`bind`](Self::bind) are returned for their
/// id; any other id resolves to an empty container.
#[derive(Debug, Default)]
pub struct RandomCorrelator {
    bound: Mutex<HashMap<String, ContextsContainer>>,
}

impl RandomCorrelator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `container` with `request_id`.
    pub fn bind(&self, request_id: impl Into<String>, container: ContextsContainer) {
        self.bound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(request_id.into(), container);
    }
}

impl RequestCorrelator for RandomCorrelator {
    fn request_id_for_attempt(&self, _request: &RequestDescriptor) -> Result<String> {
        Ok(hex::encode(rand::random::<[u8; 16]>()))
    }

    fn context_for_id(&self, request_id: &str) -> Result<ContextsContainer> {
        Ok(self
            .bound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(request_id)
            .cloned()
            .unwrap_or_default())
    }
}
