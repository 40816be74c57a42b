//! Flat, multi-valued input keyed by field name.

use std::collections::HashMap;

/// Submitted values, already decoded from their transport.
///
/// Each name maps to one or more strings in submission order, the shape of a
/// parsed form body or query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues {
    inner: HashMap<String, Vec<String>>,
}

impl FormValues {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value after any existing values for `name`.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(name.into()).or_default().push(value.into());
    }

    /// Replaces all values for `name`.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.inner.insert(name.into(), values);
    }

    /// All values submitted for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.inner.get(name).map(Vec::as_slice)
    }

    /// First value submitted for `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)?.first().map(String::as_str)
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` when nothing was submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<HashMap<String, Vec<String>>> for FormValues {
    fn from(inner: HashMap<String, Vec<String>>) -> Self {
        Self { inner }
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        values.extend(iter);
        values
    }
}

impl<K, V> Extend<(K, V)> for FormValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}
