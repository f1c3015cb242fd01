//! The token model exchanged between the tokenizer and its consumers.
//!
//! This module provides the closed [`Token`] set — structural tokens
//! (`{ } [ ] ,`), value tokens (null, booleans, strings, the numeric
//! family), the field-name token, and the terminal end-of-stream token —
//! plus [`BigNumber`] for literals that exceed the fixed-width numeric
//! types.
//!
//! ## Core Types
//!
//! - [`Token`]: immutable tagged variant; no token owns another
//! - [`BigNumber`]: arbitrary-precision payload, either an exact [`BigInt`]
//!   or a verbatim decimal lexeme
//!
//! ## Field names vs strings
//!
//! A [`Token::FieldName`] is only ever produced when a quoted lexeme is
//! immediately followed (after optional whitespace) by a colon; the same
//! lexeme anywhere else yields [`Token::Str`]. See the tokenizer for the
//! lookahead rule.
//!
//! ## Examples
//!
//! ```rust
//! use pulljson::Token;
//!
//! let token = Token::I32(7);
//! assert_eq!(token.as_i64(), Some(7));
//! assert_eq!(token.describe(), "i32");
//! assert!(Token::Null.is_null());
//! ```

use num_bigint::BigInt;
use std::fmt;

/// An arbitrary-precision numeric payload.
///
/// Produced by the tokenizer when a literal does not fit the fixed-width
/// numeric tokens: integer literals wider than `i64` become an exact
/// [`BigInt`], and non-integral literals whose `f64` value would be infinite
/// keep their verbatim lexeme so nothing is lost.
///
/// # Examples
///
/// ```rust
/// use pulljson::BigNumber;
/// use num_bigint::BigInt;
///
/// let exact = BigNumber::Int(BigInt::from(9_223_372_036_854_775_807i64) + 1);
/// assert_eq!(exact.to_string(), "9223372036854775808");
///
/// let wide = BigNumber::Decimal("1.5e999".to_string());
/// assert_eq!(wide.to_string(), "1.5e999");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum BigNumber {
    /// An exact integer wider than `i64`.
    Int(BigInt),
    /// A non-integral literal too large for `f64`, kept verbatim.
    Decimal(String),
}

impl fmt::Display for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BigNumber::Int(i) => write!(f, "{}", i),
            BigNumber::Decimal(s) => write!(f, "{}", s),
        }
    }
}

/// The smallest lexical unit produced by the tokenizer.
///
/// A closed set: structural tokens, value tokens, the field-name token, and
/// the terminal [`Token::Eof`]. Tokens are immutable value types.
///
/// # Examples
///
/// ```rust
/// use pulljson::Token;
///
/// let tokens = vec![
///     Token::ObjectStart,
///     Token::FieldName("a".to_string()),
///     Token::Str("b".to_string()),
///     Token::ObjectEnd,
/// ];
/// assert!(tokens.iter().all(|t| !t.is_eof()));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// `,`
    Separator,
    /// A quoted lexeme followed by a colon.
    FieldName(String),
    /// The literal `null`.
    Null,
    /// The literal `true` or `false`.
    Bool(bool),
    /// A quoted lexeme not followed by a colon.
    Str(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    /// A numeric literal wider than the fixed-width variants.
    Big(BigNumber),
    /// End of the token stream; yielded idempotently once reached.
    Eof,
}

impl Token {
    /// Returns the kind name used in diagnostics.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Token::ObjectStart => "object start",
            Token::ObjectEnd => "object end",
            Token::ArrayStart => "array start",
            Token::ArrayEnd => "array end",
            Token::Separator => "separator",
            Token::FieldName(_) => "field name",
            Token::Null => "null",
            Token::Bool(_) => "boolean",
            Token::Str(_) => "string",
            Token::I8(_) => "i8",
            Token::I16(_) => "i16",
            Token::I32(_) => "i32",
            Token::I64(_) => "i64",
            Token::F32(_) => "f32",
            Token::F64(_) => "f64",
            Token::Big(_) => "big number",
            Token::Eof => "end of stream",
        }
    }

    /// Returns `true` if this is the terminal end-of-stream token.
    #[inline]
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Token::Eof)
    }

    /// Returns `true` if this is the `null` token.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Token::Null)
    }

    /// Returns `true` for any token of the numeric family.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            Token::I8(_)
                | Token::I16(_)
                | Token::I32(_)
                | Token::I64(_)
                | Token::F32(_)
                | Token::F64(_)
                | Token::Big(_)
        )
    }

    /// If this is a boolean token, returns its value.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Token::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If this is a string token, returns its text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Token::Str(s) => Some(s),
            _ => None,
        }
    }

    /// If this is a field-name token, returns the name.
    #[inline]
    #[must_use]
    pub fn as_field_name(&self) -> Option<&str> {
        match self {
            Token::FieldName(name) => Some(name),
            _ => None,
        }
    }

    /// Widens any integer token to `i64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pulljson::Token;
    ///
    /// assert_eq!(Token::I8(3).as_i64(), Some(3));
    /// assert_eq!(Token::I64(-9).as_i64(), Some(-9));
    /// assert_eq!(Token::F64(1.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Token::I8(v) => Some(i64::from(*v)),
            Token::I16(v) => Some(i64::from(*v)),
            Token::I32(v) => Some(i64::from(*v)),
            Token::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Widens any numeric token except [`Token::Big`] to `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Token::I8(v) => Some(f64::from(*v)),
            Token::I16(v) => Some(f64::from(*v)),
            Token::I32(v) => Some(f64::from(*v)),
            Token::I64(v) => Some(*v as f64),
            Token::F32(v) => Some(f64::from(*v)),
            Token::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// If this is an arbitrary-precision token, returns its payload.
    #[inline]
    #[must_use]
    pub fn as_big(&self) -> Option<&BigNumber> {
        match self {
            Token::Big(big) => Some(big),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::ObjectStart => write!(f, "{{"),
            Token::ObjectEnd => write!(f, "}}"),
            Token::ArrayStart => write!(f, "["),
            Token::ArrayEnd => write!(f, "]"),
            Token::Separator => write!(f, ","),
            Token::FieldName(name) => write!(f, "\"{}\":", name),
            Token::Null => write!(f, "null"),
            Token::Bool(b) => write!(f, "{}", b),
            Token::Str(s) => write!(f, "\"{}\"", s),
            Token::I8(v) => write!(f, "{}", v),
            Token::I16(v) => write!(f, "{}", v),
            Token::I32(v) => write!(f, "{}", v),
            Token::I64(v) => write!(f, "{}", v),
            Token::F32(v) => write!(f, "{}", v),
            Token::F64(v) => write!(f, "{}", v),
            Token::Big(big) => write!(f, "{}", big),
            Token::Eof => write!(f, "<eof>"),
        }
    }
}

impl From<bool> for Token {
    fn from(value: bool) -> Self {
        Token::Bool(value)
    }
}

impl From<i8> for Token {
    fn from(value: i8) -> Self {
        Token::I8(value)
    }
}

impl From<i16> for Token {
    fn from(value: i16) -> Self {
        Token::I16(value)
    }
}

impl From<i32> for Token {
    fn from(value: i32) -> Self {
        Token::I32(value)
    }
}

impl From<i64> for Token {
    fn from(value: i64) -> Self {
        Token::I64(value)
    }
}

impl From<f32> for Token {
    fn from(value: f32) -> Self {
        Token::F32(value)
    }
}

impl From<f64> for Token {
    fn from(value: f64) -> Self {
        Token::F64(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::Str(value.to_string())
    }
}
