//! # pulljson
//!
//! A streaming JSON engine built from four small parts: a pull-based
//! tokenizer over raw characters, a cursor for walking token sequences
//! without materializing a tree, push-based output sinks with a
//! pretty-printing decorator, and a pluggable type-to-codec registry with
//! predicate-based resolution and a typed configuration bag.
//!
//! ## Key Features
//!
//! - **Lazy tokenization**: one token per pull, single-pass, with a
//!   one-character pushback buffer and lookahead-based field-name detection
//! - **Non-materializing decode**: codecs drive a [`TokenStream`] cursor
//!   through nested objects and arrays, reading exactly what they need
//! - **Push-based encode**: codecs emit events into any [`JsonSink`];
//!   compact output and a configurable pretty decorator are provided
//! - **Pluggable codecs**: exact-type and predicate-based registration with
//!   first-match-wins resolution, shared immutably across operations
//! - **Faithful numerics**: integers narrow to `i32`, widen to `i64`, and
//!   fall back to arbitrary precision; oversized decimals keep their lexeme
//!
//! ## Quick Start
//!
//! ```rust
//! use pulljson::{from_json, to_json, JsonValue};
//!
//! let value: JsonValue = from_json("{\"a\": [1, 2]}").unwrap();
//! assert_eq!(value.as_object().and_then(|o| o.get("a")).map(|a| a.is_array()), Some(true));
//!
//! let text = to_json(&value).unwrap();
//! assert_eq!(text, "{\"a\":[1,2]}");
//! ```
//!
//! ## Walking tokens directly
//!
//! Custom codec authors work against the cursor:
//!
//! ```rust
//! use pulljson::TokenStream;
//!
//! let mut stream = TokenStream::from_str("[[1,2],[3]]");
//! let mut rows = Vec::new();
//! stream.begin_array().unwrap();
//! while stream.has_more().unwrap() {
//!     stream.begin_array().unwrap();
//!     let mut row = Vec::new();
//!     while stream.has_more().unwrap() {
//!         stream.advance().unwrap();
//!         row.push(stream.i32_value().unwrap());
//!     }
//!     rows.push(row);
//! }
//! assert_eq!(rows, vec![vec![1, 2], vec![3]]);
//! ```
//!
//! ## Custom registries
//!
//! ```rust
//! use pulljson::{default_codecs, Customizations, JsonEngine, JsonValue};
//! use pulljson::config::DO_NOT_WRITE_NULL_OBJECT_VALUES;
//!
//! let registry = default_codecs()
//!     .customizations(
//!         Customizations::builder()
//!             .set(&DO_NOT_WRITE_NULL_OBJECT_VALUES, true)
//!             .build(),
//!     )
//!     .build();
//! let engine = JsonEngine::with_registry(registry);
//!
//! let value: JsonValue = engine.from_json("{\"a\": null, \"b\": 1}").unwrap();
//! assert_eq!(engine.to_json(&value).unwrap(), "{\"b\":1}");
//! ```
//!
//! ## Concurrency
//!
//! Tokenizers, streams, and sinks belong to one logical thread of control
//! for their lifetime. A built [`SerializationRegistry`] and its
//! [`Customizations`] are immutable and safely shared for concurrent reads.

pub mod codec;
pub mod config;
pub mod error;
pub mod map;
pub mod registry;
pub mod sink;
pub mod source;
pub mod stream;
pub mod token;
pub mod tokenizer;
pub mod value;

pub use codec::default_codecs;
pub use config::{Customizations, CustomizationsBuilder, Key};
pub use error::{Error, Result};
pub use map::JsonMap;
pub use registry::{
    Deserializer, RegistryBuilder, SerializationRegistry, Serializer, TypeInfo,
};
pub use sink::{CompactSink, JsonSink, PrettyOptions, PrettySink};
pub use source::{CharSource, ReaderSource, StringSource};
pub use stream::{TokenStream, MAX_DEPTH};
pub use token::{BigNumber, Token};
pub use tokenizer::Tokenizer;
pub use value::{JsonValue, Number};

use std::any::Any;
use std::io;
use std::sync::OnceLock;

/// The engine entry point tying the pieces together.
///
/// Encode path: value → registry-resolved [`Serializer`] → sink → text.
/// Decode path: text/stream → [`Tokenizer`] → [`TokenStream`] →
/// registry-resolved [`Deserializer`] → value.
///
/// # Examples
///
/// ```rust
/// use pulljson::JsonEngine;
///
/// let engine = JsonEngine::new();
/// let n: i32 = engine.from_json("41").unwrap();
/// assert_eq!(engine.to_json(&(n + 1)).unwrap(), "42");
/// ```
pub struct JsonEngine {
    registry: SerializationRegistry,
    strict_strings: bool,
}

impl JsonEngine {
    /// Creates an engine with the built-in codecs and lenient strings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(default_codecs().build())
    }

    /// Creates an engine over a custom registry.
    #[must_use]
    pub fn with_registry(registry: SerializationRegistry) -> Self {
        JsonEngine {
            registry,
            strict_strings: false,
        }
    }

    /// Disables single-quoted strings on the decode path.
    #[must_use]
    pub fn with_strict_strings(mut self) -> Self {
        self.strict_strings = true;
        self
    }

    /// Returns the registry this engine resolves codecs from.
    #[must_use]
    pub fn registry(&self) -> &SerializationRegistry {
        &self.registry
    }

    /// Encodes `value` to compact JSON text using its static type.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::CodecNotFound`] when no serializer is registered
    /// for `T`, or with any failure the serializer reports.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn to_json<T: Any>(&self, value: &T) -> Result<String> {
        self.to_json_as(value, &TypeInfo::of::<T>())
    }

    /// Encodes `value` to compact JSON text as an explicitly given type.
    ///
    /// The dynamic counterpart of [`JsonEngine::to_json`] for callers that
    /// resolve types at runtime.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::CodecNotFound`] when no serializer is registered
    /// for `ty`.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn to_json_as(&self, value: &dyn Any, ty: &TypeInfo) -> Result<String> {
        let serializer = self.registry.required_serializer(ty)?;
        let mut sink = CompactSink::new();
        serializer.encode(value, &mut sink)?;
        Ok(sink.into_string())
    }

    /// Encodes `value` to pretty-printed JSON text with default options.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::CodecNotFound`] when no serializer is registered
    /// for `T`.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn to_json_pretty<T: Any>(&self, value: &T) -> Result<String> {
        let serializer = self.registry.required_serializer(&TypeInfo::of::<T>())?;
        let mut sink = PrettySink::new(CompactSink::new());
        serializer.encode(value, &mut sink)?;
        Ok(sink.into_inner().into_string())
    }

    /// Decodes a value of type `T` from JSON text.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::CodecNotFound`] when no deserializer is
    /// registered for `T`, or with any tokenization/decoding failure.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn from_json<T: Any>(&self, text: &str) -> Result<T> {
        let mut tokenizer = Tokenizer::from_str(text);
        if self.strict_strings {
            tokenizer = tokenizer.with_strict_strings();
        }
        self.decode(TokenStream::new(tokenizer))
    }

    /// Decodes a value of type `T` from a byte reader.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Io`] on read failures, and otherwise like
    /// [`JsonEngine::from_json`].
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn from_json_reader<T: Any, R: io::Read>(&self, reader: R) -> Result<T> {
        let mut tokenizer = Tokenizer::new(ReaderSource::new(reader)?);
        if self.strict_strings {
            tokenizer = tokenizer.with_strict_strings();
        }
        self.decode(TokenStream::new(tokenizer))
    }

    fn decode<T: Any>(&self, mut stream: TokenStream<'_>) -> Result<T> {
        let ty = TypeInfo::of::<T>();
        let deserializer = self.registry.required_deserializer(&ty)?;
        let decoded = deserializer.decode(&mut stream)?;
        decoded
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| Error::type_mismatch(ty.name(), "a different decoded type"))
    }
}

impl Default for JsonEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn default_engine() -> &'static JsonEngine {
    static ENGINE: OnceLock<JsonEngine> = OnceLock::new();
    ENGINE.get_or_init(JsonEngine::new)
}

/// Encodes any registered `T` to compact JSON text with the default engine.
///
/// # Examples
///
/// ```rust
/// use pulljson::to_json;
///
/// assert_eq!(to_json(&true).unwrap(), "true");
/// assert_eq!(to_json(&"a/b".to_string()).unwrap(), "\"a\\/b\"");
/// ```
///
/// # Errors
///
/// Returns an error if no serializer is registered for `T` or encoding
/// fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_json<T: Any>(value: &T) -> Result<String> {
    default_engine().to_json(value)
}

/// Encodes any registered `T` to pretty-printed JSON text with the default
/// engine.
///
/// # Examples
///
/// ```rust
/// use pulljson::{from_json, to_json_pretty, JsonValue};
///
/// let value: JsonValue = from_json("{\"a\":1}").unwrap();
/// assert_eq!(to_json_pretty(&value).unwrap(), "{\n  \"a\": 1\n}");
/// ```
///
/// # Errors
///
/// Returns an error if no serializer is registered for `T` or encoding
/// fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_json_pretty<T: Any>(value: &T) -> Result<String> {
    default_engine().to_json_pretty(value)
}

/// Decodes a value of type `T` from JSON text with the default engine.
///
/// # Examples
///
/// ```rust
/// use pulljson::from_json;
///
/// let n: i64 = from_json("9223372036854775807").unwrap();
/// assert_eq!(n, i64::MAX);
/// ```
///
/// # Errors
///
/// Returns an error if the input is malformed or no deserializer is
/// registered for `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_json<T: Any>(text: &str) -> Result<T> {
    default_engine().from_json(text)
}

/// Decodes a value of type `T` from a byte reader with the default engine.
///
/// # Examples
///
/// ```rust
/// use pulljson::from_json_reader;
/// use std::io::Cursor;
///
/// let flag: bool = from_json_reader(Cursor::new(b"true")).unwrap();
/// assert!(flag);
/// ```
///
/// # Errors
///
/// Returns an error on read failures, malformed input, or a missing
/// deserializer for `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_json_reader<T: Any, R: io::Read>(reader: R) -> Result<T> {
    default_engine().from_json_reader(reader)
}
