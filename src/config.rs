//! Typed, immutable configuration consulted by codecs.
//!
//! A [`Customizations`] bag maps typed [`Key`]s to values. It is built once
//! through [`CustomizationsBuilder`], frozen, and then shared read-only by
//! every codec the registry resolves — the effect of each key is defined by
//! the codecs that consult it, not by the engine core.
//!
//! ## Predefined keys
//!
//! - [`MAKE_METHODS_ACCESSIBLE`]
//! - [`IGNORE_UNKNOWN_FIELDS`]
//! - [`DO_NOT_WRITE_NULL_OBJECT_VALUES`]
//!
//! ## Examples
//!
//! ```rust
//! use pulljson::config::{Customizations, IGNORE_UNKNOWN_FIELDS};
//!
//! let customizations = Customizations::builder()
//!     .set(&IGNORE_UNKNOWN_FIELDS, true)
//!     .build();
//!
//! assert!(customizations.is_true(&IGNORE_UNKNOWN_FIELDS));
//! ```

use crate::{Error, Result};
use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;

/// A typed configuration key.
///
/// The phantom type parameter ties the key to its value type, so getters
/// need no runtime type argument from the caller.
///
/// # Examples
///
/// ```rust
/// use pulljson::config::Key;
///
/// static MAX_ITEMS: Key<usize> = Key::new("max_items");
/// assert_eq!(MAX_ITEMS.name(), "max_items");
/// ```
pub struct Key<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    /// Creates a key with the given diagnostic name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Key {
            name,
            _type: PhantomData,
        }
    }

    /// Returns the key's name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Codecs that invoke accessors should make them accessible first.
pub static MAKE_METHODS_ACCESSIBLE: Key<bool> = Key::new("make_methods_accessible");

/// Codecs should silently drain object members they do not recognize.
pub static IGNORE_UNKNOWN_FIELDS: Key<bool> = Key::new("ignore_unknown_fields");

/// Codecs should omit object members whose value is null.
pub static DO_NOT_WRITE_NULL_OBJECT_VALUES: Key<bool> =
    Key::new("do_not_write_null_object_values");

/// An immutable bag of typed configuration values.
///
/// Built via [`Customizations::builder`]; safe to share across threads once
/// built since no mutation occurs afterwards.
pub struct Customizations {
    values: HashMap<&'static str, Box<dyn Any + Send + Sync>>,
}

impl Customizations {
    /// Creates an empty bag.
    #[must_use]
    pub fn empty() -> Self {
        Customizations {
            values: HashMap::new(),
        }
    }

    /// Starts building a bag.
    #[must_use]
    pub fn builder() -> CustomizationsBuilder {
        CustomizationsBuilder {
            values: HashMap::new(),
        }
    }

    /// Returns the value for `key`, or `None` when unset.
    #[must_use]
    pub fn get<T: Any>(&self, key: &Key<T>) -> Option<&T> {
        self.values.get(key.name).and_then(|v| v.downcast_ref())
    }

    /// Returns the value for `key`, failing when unset.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingCustomization`] naming the key.
    pub fn require<T: Any>(&self, key: &Key<T>) -> Result<&T> {
        self.get(key)
            .ok_or_else(|| Error::MissingCustomization(key.name.to_string()))
    }

    /// Returns `true` only when the boolean key is set to `true`.
    #[must_use]
    pub fn is_true(&self, key: &Key<bool>) -> bool {
        self.get(key).copied().unwrap_or(false)
    }
}

impl Default for Customizations {
    fn default() -> Self {
        Self::empty()
    }
}

/// Accumulates key-value pairs, then freezes them into a
/// [`Customizations`].
pub struct CustomizationsBuilder {
    values: HashMap<&'static str, Box<dyn Any + Send + Sync>>,
}

impl CustomizationsBuilder {
    /// Sets a value for a key, replacing any previous value.
    #[must_use]
    pub fn set<T: Any + Send + Sync>(mut self, key: &Key<T>, value: T) -> Self {
        self.values.insert(key.name(), Box::new(value));
        self
    }

    /// Freezes the accumulated pairs.
    #[must_use]
    pub fn build(self) -> Customizations {
        Customizations {
            values: self.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static THRESHOLD: Key<i64> = Key::new("threshold");

    #[test]
    fn get_returns_none_when_unset() {
        let customizations = Customizations::empty();
        assert_eq!(customizations.get(&THRESHOLD), None);
        assert!(!customizations.is_true(&IGNORE_UNKNOWN_FIELDS));
    }

    #[test]
    fn typed_round_trip() {
        let customizations = Customizations::builder()
            .set(&THRESHOLD, 42)
            .set(&DO_NOT_WRITE_NULL_OBJECT_VALUES, true)
            .build();
        assert_eq!(customizations.get(&THRESHOLD), Some(&42));
        assert!(customizations.is_true(&DO_NOT_WRITE_NULL_OBJECT_VALUES));
        assert!(!customizations.is_true(&MAKE_METHODS_ACCESSIBLE));
    }

    #[test]
    fn require_names_the_missing_key() {
        let customizations = Customizations::empty();
        let err = customizations.require(&THRESHOLD).unwrap_err();
        match err {
            Error::MissingCustomization(name) => assert_eq!(name, "threshold"),
            other => panic!("expected MissingCustomization, got {:?}", other),
        }
    }

    #[test]
    fn later_set_wins() {
        let customizations = Customizations::builder()
            .set(&THRESHOLD, 1)
            .set(&THRESHOLD, 2)
            .build();
        assert_eq!(customizations.get(&THRESHOLD), Some(&2));
    }
}
