//! The pull cursor over a token sequence.
//!
//! [`TokenStream`] lets a consumer walk a token sequence top-down exactly
//! once, matching JSON nesting, without materializing a tree. It is backed
//! either by a live [`Tokenizer`] or by an in-memory token list.
//!
//! The stream tracks raw sequence position only — it keeps no nesting
//! stack. Matched nesting is the caller's obligation: every
//! [`TokenStream::begin_object`]/[`TokenStream::begin_array`] must be
//! balanced by draining the scope through [`TokenStream::has_more`] until it
//! returns `false`, and sibling tokens are never skipped implicitly.
//!
//! ## Examples
//!
//! ```rust
//! use pulljson::TokenStream;
//!
//! let mut stream = TokenStream::from_str("[\"a\",\"b\"]");
//! stream.begin_array().unwrap();
//! let mut items = Vec::new();
//! while stream.has_more().unwrap() {
//!     stream.advance().unwrap();
//!     items.push(stream.str_value().unwrap().to_string());
//! }
//! assert_eq!(items, vec!["a", "b"]);
//! ```

use crate::token::{BigNumber, Token};
use crate::tokenizer::Tokenizer;
use crate::{Error, Result};

/// Maximum nesting depth honored by the recursive traversal paths
/// ([`TokenStream::skip_value`] and the dynamic value codec).
pub const MAX_DEPTH: usize = 128;

enum TokenSource<'a> {
    Lexer(Tokenizer<'a>),
    List(std::vec::IntoIter<Token>),
}

impl TokenSource<'_> {
    fn next_token(&mut self) -> Result<Token> {
        match self {
            TokenSource::Lexer(tokenizer) => tokenizer.next_token(),
            TokenSource::List(tokens) => Ok(tokens.next().unwrap_or(Token::Eof)),
        }
    }
}

/// A stateful cursor over a token sequence.
///
/// Holds the just-consumed current token and a one-token peek slot used by
/// [`TokenStream::has_more`]. Not safe for concurrent use; one logical
/// thread of control owns a stream for its lifetime.
pub struct TokenStream<'a> {
    source: TokenSource<'a>,
    current: Option<Token>,
    peeked: Option<Token>,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream over a live tokenizer.
    #[must_use]
    pub fn new(tokenizer: Tokenizer<'a>) -> Self {
        TokenStream {
            source: TokenSource::Lexer(tokenizer),
            current: None,
            peeked: None,
        }
    }

    /// Creates a stream directly over in-memory text.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn from_str(input: &'a str) -> Self {
        Self::new(Tokenizer::from_str(input))
    }

    /// Creates a stream over an in-memory token list.
    ///
    /// The list is consumed in order and followed by an implicit
    /// [`Token::Eof`].
    #[must_use]
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        TokenStream {
            source: TokenSource::List(tokens.into_iter()),
            current: None,
            peeked: None,
        }
    }

    fn pull(&mut self) -> Result<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.source.next_token(),
        }
    }

    /// Consumes the next token, making it the current one.
    pub fn advance(&mut self) -> Result<()> {
        let token = self.pull()?;
        self.current = Some(token);
        Ok(())
    }

    /// Returns the just-consumed token.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IllegalState`] before the first
    /// [`TokenStream::advance`].
    pub fn current(&self) -> Result<&Token> {
        self.current
            .as_ref()
            .ok_or_else(|| Error::illegal_state("no current token; advance the stream first"))
    }

    /// Advances past the opening brace of an object.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TypeMismatch`] if the next token is not
    /// [`Token::ObjectStart`].
    pub fn begin_object(&mut self) -> Result<()> {
        self.advance()?;
        match self.current()? {
            Token::ObjectStart => Ok(()),
            other => Err(Error::type_mismatch("object start", other.describe())),
        }
    }

    /// Advances past the opening bracket of an array.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TypeMismatch`] if the next token is not
    /// [`Token::ArrayStart`].
    pub fn begin_array(&mut self) -> Result<()> {
        self.advance()?;
        match self.current()? {
            Token::ArrayStart => Ok(()),
            other => Err(Error::type_mismatch("array start", other.describe())),
        }
    }

    /// Reports whether the current scope has another member or element.
    ///
    /// Peeks the next token, silently consuming one separator. An end token
    /// is consumed and yields `false`; an exhausted stream yields `false`;
    /// anything else stays buffered for the next [`TokenStream::advance`].
    pub fn has_more(&mut self) -> Result<bool> {
        if self.peeked.is_none() {
            let mut token = self.source.next_token()?;
            if token == Token::Separator {
                token = self.source.next_token()?;
            }
            self.peeked = Some(token);
        }
        match self.peeked.as_ref() {
            Some(Token::ObjectEnd) | Some(Token::ArrayEnd) | Some(Token::Eof) => {
                self.peeked = None;
                Ok(false)
            }
            _ => Ok(true),
        }
    }

    /// Consumes one complete value, draining nested scopes.
    ///
    /// This is what codecs use to discard an unknown object member when
    /// `IGNORE_UNKNOWN_FIELDS` is set.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DepthLimit`] past [`MAX_DEPTH`] nested scopes.
    pub fn skip_value(&mut self) -> Result<()> {
        self.advance()?;
        self.skip_current(0)
    }

    fn skip_current(&mut self, depth: usize) -> Result<()> {
        if depth >= MAX_DEPTH {
            return Err(Error::DepthLimit(MAX_DEPTH));
        }
        let in_object = match self.current()? {
            Token::ObjectStart => true,
            Token::ArrayStart => false,
            _ => return Ok(()),
        };
        while self.has_more()? {
            self.advance()?;
            if in_object && matches!(self.current()?, Token::FieldName(_)) {
                self.advance()?;
            }
            self.skip_current(depth + 1)?;
        }
        Ok(())
    }

    /// Returns the current token as a field name.
    pub fn field_name(&self) -> Result<&str> {
        match self.current()? {
            Token::FieldName(name) => Ok(name),
            other => Err(Error::type_mismatch("field name", other.describe())),
        }
    }

    /// Returns the current token as a string value.
    pub fn str_value(&self) -> Result<&str> {
        match self.current()? {
            Token::Str(text) => Ok(text),
            other => Err(Error::type_mismatch("string", other.describe())),
        }
    }

    /// Returns the current token as a boolean value.
    pub fn bool_value(&self) -> Result<bool> {
        match self.current()? {
            Token::Bool(value) => Ok(*value),
            other => Err(Error::type_mismatch("boolean", other.describe())),
        }
    }

    /// Returns the current token as an `i32`, widening narrower integers.
    pub fn i32_value(&self) -> Result<i32> {
        match self.current()? {
            Token::I8(value) => Ok(i32::from(*value)),
            Token::I16(value) => Ok(i32::from(*value)),
            Token::I32(value) => Ok(*value),
            other => Err(Error::type_mismatch("i32", other.describe())),
        }
    }

    /// Returns the current token as an `i64`, widening any integer token.
    pub fn i64_value(&self) -> Result<i64> {
        let current = self.current()?;
        current
            .as_i64()
            .ok_or_else(|| Error::type_mismatch("i64", current.describe()))
    }

    /// Returns the current token as an `f64`, widening any fixed-width
    /// numeric token.
    pub fn f64_value(&self) -> Result<f64> {
        let current = self.current()?;
        current
            .as_f64()
            .ok_or_else(|| Error::type_mismatch("f64", current.describe()))
    }

    /// Returns the current token's arbitrary-precision payload.
    pub fn big_value(&self) -> Result<&BigNumber> {
        match self.current()? {
            Token::Big(big) => Ok(big),
            other => Err(Error::type_mismatch("big number", other.describe())),
        }
    }

    /// Returns `true` if the current token is `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.current, Some(Token::Null))
    }
}
