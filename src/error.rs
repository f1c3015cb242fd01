//! Error types for JSON encoding and decoding.
//!
//! This module provides the single error enum used across the engine, from
//! character sources up through the codec registry.
//!
//! ## Error Categories
//!
//! - **Illegal State**: malformed literals, pushback overflow, indent
//!   underflow — conditions that name the exact character or invariant
//! - **Unexpected EOF**: input ended while more characters were required
//! - **Type Mismatches**: a caller asserted the wrong token variant, or a
//!   decoded value could not be downcast to the requested type
//! - **Codec Not Found**: no serializer/deserializer registered for a type
//! - **I/O Errors**: failures from a reader-backed character source
//!
//! No error is silently recovered inside the engine; every failure
//! propagates synchronously to the caller of the operation in progress.
//!
//! ## Examples
//!
//! ```rust
//! use pulljson::{from_json, Error};
//!
//! let result: Result<bool, Error> = from_json("tru");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     eprintln!("Decode error: {}", err);
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during JSON encoding/decoding.
///
/// Each error variant names the condition precisely enough to diagnose the
/// failing input or the misused API.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while reading from a character source
    #[error("IO error: {0}")]
    Io(String),

    /// Input ended while more characters were required
    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },

    /// A state invariant was violated (malformed literal, pushback overflow,
    /// indent underflow)
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// The wrong token variant or value type was asserted
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// No codec registered for the requested type
    #[error("No {kind} registered for type {type_name}")]
    CodecNotFound {
        kind: &'static str,
        type_name: String,
    },

    /// A required customization key was not set
    #[error("Missing customization: {0}")]
    MissingCustomization(String),

    /// Nesting exceeded the recursion bound
    #[error("Nesting depth limit of {0} exceeded")]
    DepthLimit(usize),

    /// Custom error raised by a codec
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an end-of-input error naming what was expected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pulljson::Error;
    ///
    /// let err = Error::eof("closing quote");
    /// assert!(err.to_string().contains("closing quote"));
    /// ```
    pub fn eof(expected: &str) -> Self {
        Error::UnexpectedEof {
            expected: expected.to_string(),
        }
    }

    /// Creates an illegal-state error.
    ///
    /// Used for malformed literals, pushback overflow, and indent underflow —
    /// conditions that are either invalid input or an engine defect.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pulljson::Error;
    ///
    /// let err = Error::illegal_state("expected 'r' in literal 'true'");
    /// assert!(err.to_string().contains("'r'"));
    /// ```
    pub fn illegal_state(msg: &str) -> Self {
        Error::IllegalState(msg.to_string())
    }

    /// Creates a type mismatch error naming the expected and found kinds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pulljson::Error;
    ///
    /// let err = Error::type_mismatch("string", "i32");
    /// assert!(err.to_string().contains("expected string"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a codec-not-found error for a missing serializer.
    pub fn serializer_not_found(type_name: &str) -> Self {
        Error::CodecNotFound {
            kind: "serializer",
            type_name: type_name.to_string(),
        }
    }

    /// Creates a codec-not-found error for a missing deserializer.
    pub fn deserializer_not_found(type_name: &str) -> Self {
        Error::CodecNotFound {
            kind: "deserializer",
            type_name: type_name.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pulljson::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for character source read failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
