//! Ordered map type for JSON objects.
//!
//! This module provides [`JsonMap`], a wrapper around [`IndexMap`] that
//! maintains insertion order for object members. Member order affects
//! serialized output, so an order-preserving map keeps encoding
//! deterministic and round-trips faithful.
//!
//! ## Examples
//!
//! ```rust
//! use pulljson::{JsonMap, JsonValue};
//!
//! let mut map = JsonMap::new();
//! map.insert("name".to_string(), JsonValue::from("Alice"));
//! map.insert("age".to_string(), JsonValue::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of member names to JSON values.
///
/// A thin wrapper around [`IndexMap`] preserving insertion order, which is
/// what makes object encoding deterministic.
///
/// # Examples
///
/// ```rust
/// use pulljson::{JsonMap, JsonValue};
///
/// let mut map = JsonMap::new();
/// map.insert("first".to_string(), JsonValue::from(1));
/// map.insert("second".to_string(), JsonValue::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonMap(IndexMap<String, crate::JsonValue>);

impl JsonMap {
    /// Creates an empty `JsonMap`.
    #[must_use]
    pub fn new() -> Self {
        JsonMap(IndexMap::new())
    }

    /// Creates an empty `JsonMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        JsonMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a member, returning the previous value for the name if any.
    pub fn insert(&mut self, key: String, value: crate::JsonValue) -> Option<crate::JsonValue> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::JsonValue> {
        self.0.get(key)
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over member names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::JsonValue> {
        self.0.keys()
    }

    /// Returns an iterator over member values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::JsonValue> {
        self.0.values()
    }

    /// Returns an iterator over members, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::JsonValue> {
        self.0.iter()
    }
}

impl Default for JsonMap {
    fn default() -> Self {
        Self::new()
    }
}

impl From<HashMap<String, crate::JsonValue>> for JsonMap {
    fn from(map: HashMap<String, crate::JsonValue>) -> Self {
        JsonMap(map.into_iter().collect())
    }
}

impl IntoIterator for JsonMap {
    type Item = (String, crate::JsonValue);
    type IntoIter = indexmap::map::IntoIter<String, crate::JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, crate::JsonValue)> for JsonMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::JsonValue)>>(iter: T) -> Self {
        JsonMap(IndexMap::from_iter(iter))
    }
}
