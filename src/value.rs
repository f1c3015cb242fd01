//! Dynamic value representation for JSON data.
//!
//! This module provides the [`JsonValue`] enum which represents any value
//! the engine can decode. It is what the built-in dynamic codec produces
//! and consumes, and is the natural exchange type when the structure isn't
//! known at compile time.
//!
//! ## Core Types
//!
//! - [`JsonValue`]: any JSON value (null, bool, number, string, array, object)
//! - [`Number`]: a numeric value — `i64`, `f64`, or arbitrary precision
//!
//! ## Examples
//!
//! ```rust
//! use pulljson::{JsonMap, JsonValue, Number};
//!
//! let mut object = JsonMap::new();
//! object.insert("name".to_string(), JsonValue::from("Alice"));
//! object.insert("age".to_string(), JsonValue::from(30));
//! let value = JsonValue::Object(object);
//!
//! assert!(value.is_object());
//! assert_eq!(value.to_string(), "{\"name\":\"Alice\",\"age\":30}");
//! ```

use crate::token::BigNumber;
use crate::JsonMap;
use std::fmt;

/// A numeric value carried by [`JsonValue`].
///
/// Mirrors the tokenizer's classification: integers that fit `i64`,
/// floating-point values, and arbitrary-precision fallbacks.
///
/// # Examples
///
/// ```rust
/// use pulljson::Number;
///
/// let integer = Number::Int(42);
/// assert!(integer.is_int());
/// assert_eq!(integer.as_i64(), Some(42));
/// assert_eq!(integer.as_f64(), Some(42.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
    Big(BigNumber),
}

impl Number {
    /// Returns `true` if this is an `i64` value.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// Returns `true` if this is an `f64` value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns `true` if this is an arbitrary-precision value.
    #[inline]
    #[must_use]
    pub const fn is_big(&self) -> bool {
        matches!(self, Number::Big(_))
    }

    /// Converts to `i64` if this is an integer.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Converts to `f64` for integers and floats.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Number::Int(value) => Some(*value as f64),
            Number::Float(value) => Some(*value),
            Number::Big(_) => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{}", value),
            Number::Float(value) => write!(f, "{}", value),
            Number::Big(value) => write!(f, "{}", value),
        }
    }
}

/// A dynamically-typed representation of any JSON value.
///
/// Useful when the structure isn't known at compile time, when manipulating
/// data generically, or when building values programmatically before
/// encoding.
///
/// # Examples
///
/// ```rust
/// use pulljson::{JsonValue, Number};
///
/// let null = JsonValue::Null;
/// let num = JsonValue::Number(Number::Int(42));
/// let text = JsonValue::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<JsonValue>),
    Object(JsonMap),
}

impl JsonValue {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// If the value is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer number, returns it as `i64`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is an integer or float number, returns it as `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&JsonMap> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for JsonValue {
    /// Writes the value as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sink = crate::sink::CompactSink::new();
        crate::codec::write_value(self, &mut sink, false, 0).map_err(|_| fmt::Error)?;
        f.write_str(&sink.into_string())
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Bool(value)
    }
}

impl From<i8> for JsonValue {
    fn from(value: i8) -> Self {
        JsonValue::Number(Number::Int(i64::from(value)))
    }
}

impl From<i16> for JsonValue {
    fn from(value: i16) -> Self {
        JsonValue::Number(Number::Int(i64::from(value)))
    }
}

impl From<i32> for JsonValue {
    fn from(value: i32) -> Self {
        JsonValue::Number(Number::Int(i64::from(value)))
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Number(Number::Int(value))
    }
}

impl From<u8> for JsonValue {
    fn from(value: u8) -> Self {
        JsonValue::Number(Number::Int(i64::from(value)))
    }
}

impl From<u16> for JsonValue {
    fn from(value: u16) -> Self {
        JsonValue::Number(Number::Int(i64::from(value)))
    }
}

impl From<u32> for JsonValue {
    fn from(value: u32) -> Self {
        JsonValue::Number(Number::Int(i64::from(value)))
    }
}

impl From<f32> for JsonValue {
    fn from(value: f32) -> Self {
        JsonValue::Number(Number::Float(f64::from(value)))
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Number(Number::Float(value))
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<BigNumber> for JsonValue {
    fn from(value: BigNumber) -> Self {
        JsonValue::Number(Number::Big(value))
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(value: Vec<JsonValue>) -> Self {
        JsonValue::Array(value)
    }
}

impl From<JsonMap> for JsonValue {
    fn from(value: JsonMap) -> Self {
        JsonValue::Object(value)
    }
}
