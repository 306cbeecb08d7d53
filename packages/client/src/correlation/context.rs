//! Correlation identity carried by one attempt

use std::collections::BTreeMap;

/// Baggage resolved for a request id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextsContainer {
    entries: BTreeMap<String, String>,
}

impl ContextsContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Request id plus its container, attached to a connection before a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationContext {
    pub request_id: String,
    pub container: ContextsContainer,
}
