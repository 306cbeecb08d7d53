//! Ordered, case-insensitive header multimap
//!
//! Keeps every `(name, value)` pair in insertion order, duplicates included,
//! so the head frame carries headers exactly as they were added.

use std::fmt;

use http::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{self, Result};

/// Ordered header multimap keyed case-insensitively.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl Headers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a value, keeping any existing values for `name`.
    pub fn append(&mut self, name: HeaderName, value: HeaderValue) {
        self.entries.push((name, value));
    }

    /// Replaces every value for `name` with a single value.
    ///
    /// The new value takes the position of the first removed entry, or the
    /// end of the map if `name` was absent.
    pub fn insert(&mut self, name: HeaderName, value: HeaderValue) {
        self.replace_all(name, std::iter::once(value));
    }

    /// Replaces every value for `name` with `values`, in order.
    pub fn replace_all<I>(&mut self, name: HeaderName, values: I)
    where
        I: IntoIterator<Item = HeaderValue>,
    {
        let position = self.entries.iter().position(|(n, _)| *n == name);
        self.entries.retain(|(n, _)| *n != name);
        let at = position.unwrap_or(self.entries.len());
        let replacement: Vec<_> = values.into_iter().map(|v| (name.clone(), v)).collect();
        self.entries.splice(at..at, replacement);
    }

    /// Removes every value for `name`. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(n, _)| !n.as_str().eq_ignore_ascii_case(name));
        before != self.entries.len()
    }

    /// First value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str().eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// First value for `name` if it is visible ASCII.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }

    /// Every value for `name`, in insertion order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&HeaderValue> {
        self.entries
            .iter()
            .filter(|(n, _)| n.as_str().eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
            .collect()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Whether any value of `name` equals `value`.
    #[must_use]
    pub fn contains_value(&self, name: &str, value: &str, ignore_case: bool) -> bool {
        self.get_all(name).into_iter().any(|v| {
            let v = v.as_bytes();
            if ignore_case {
                v.eq_ignore_ascii_case(value.as_bytes())
            } else {
                v == value.as_bytes()
            }
        })
    }

    /// Distinct header names, ordered by first appearance.
    #[must_use]
    pub fn names(&self) -> Vec<&HeaderName> {
        let mut names: Vec<&HeaderName> = Vec::new();
        for (name, _) in &self.entries {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    /// Converts to an [`http::HeaderMap`] for handing to HTTP primitives.
    #[must_use]
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            map.append(name.clone(), value.clone());
        }
        map
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a HeaderName, &'a HeaderValue);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl FromIterator<(HeaderName, HeaderValue)> for Headers {
    fn from_iter<T: IntoIterator<Item = (HeaderName, HeaderValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<&HeaderMap> for Headers {
    fn from(map: &HeaderMap) -> Self {
        map.iter().map(|(n, v)| (n.clone(), v.clone())).collect()
    }
}

/// Parses a header name, classifying failures as builder errors.
pub fn header_name<K>(name: K) -> Result<HeaderName>
where
    K: TryInto<HeaderName>,
    K::Error: Into<http::Error>,
{
    name.try_into().map_err(|e| error::builder(e.into()))
}

/// Parses a header value, classifying failures as builder errors.
pub fn header_value<V>(value: V) -> Result<HeaderValue>
where
    V: TryInto<HeaderValue>,
    V::Error: Into<http::Error>,
{
    value.try_into().map_err(|e| error::builder(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &'static str) -> HeaderName {
        HeaderName::from_static(s)
    }

    fn value(s: &'static str) -> HeaderValue {
        HeaderValue::from_static(s)
    }

    #[test]
    fn preserves_insertion_order_and_duplicates() {
        let mut headers = Headers::new();
        headers.append(name("accept"), value("a"));
        headers.append(name("x-b"), value("1"));
        headers.append(name("accept"), value("b"));

        let pairs: Vec<_> = headers
            .iter()
            .map(|(n, v)| (n.as_str(), v.to_str().unwrap()))
            .collect();
        assert_eq!(pairs, vec![("accept", "a"), ("x-b", "1"), ("accept", "b")]);
        assert_eq!(headers.get_all("ACCEPT").len(), 2);
        assert_eq!(headers.names().len(), 2);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut headers = Headers::new();
        headers.append(name("x-a"), value("1"));
        headers.append(name("x-b"), value("1"));
        headers.append(name("x-a"), value("2"));
        headers.insert(name("x-a"), value("3"));

        let pairs: Vec<_> = headers
            .iter()
            .map(|(n, v)| (n.as_str(), v.to_str().unwrap()))
            .collect();
        assert_eq!(pairs, vec![("x-a", "3"), ("x-b", "1")]);
    }

    #[test]
    fn lookups_are_case_insensitive() {
        let mut headers = Headers::new();
        headers.append(name("content-type"), value("Text/Plain"));

        assert!(headers.contains("Content-Type"));
        assert!(headers.contains_value("CONTENT-TYPE", "text/plain", true));
        assert!(!headers.contains_value("content-type", "text/plain", false));
        assert!(headers.remove("Content-TYPE"));
        assert!(headers.is_empty());
    }

    #[test]
    fn invalid_names_are_builder_errors() {
        let err = header_name("bad header").unwrap_err();
        assert!(err.is_builder());
        let err = header_value("line\nbreak").unwrap_err();
        assert!(err.is_builder());
    }
}
