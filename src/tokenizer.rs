//! The pull-based tokenizer.
//!
//! [`Tokenizer`] consumes a [`CharSource`] and produces one [`Token`] per
//! call, lazily, with exactly the lookahead needed to disambiguate. It owns
//! a single-character pushback buffer for the two places a character is read
//! speculatively: the terminator of a numeric literal and the colon probe
//! after a quoted lexeme.
//!
//! ## Overview
//!
//! - **Single-pass**: forward-only, one token per `next_token` call
//! - **Field-name lookahead**: a quoted lexeme followed (after optional
//!   whitespace) by `:` becomes [`Token::FieldName`]; anywhere else the same
//!   lexeme is [`Token::Str`]. The rule is lookahead-based, not
//!   position-based, so it applies even outside object context.
//! - **Escape passthrough**: inside a quoted lexeme, a backslash causes the
//!   following character to be appended literally. No escape interpretation
//!   happens on the decode side; short escapes are an encode-side concern
//!   (see the sink module).
//! - **Numeric classification**: integer literals narrow to [`Token::I32`]
//!   when they fit, widen to [`Token::I64`], and fall back to an exact
//!   [`BigNumber::Int`] beyond that; non-integral literals become
//!   [`Token::F64`] unless the parsed value is infinite, in which case the
//!   verbatim lexeme is kept as [`BigNumber::Decimal`]. Numeric parsing
//!   never fails outward — garbage degrades to a NaN `F64` token.
//!
//! ## Examples
//!
//! ```rust
//! use pulljson::{Token, Tokenizer};
//!
//! let mut tokenizer = Tokenizer::from_str("{\"a\":1}");
//! assert_eq!(tokenizer.next_token().unwrap(), Token::ObjectStart);
//! assert_eq!(tokenizer.next_token().unwrap(), Token::FieldName("a".to_string()));
//! assert_eq!(tokenizer.next_token().unwrap(), Token::I32(1));
//! assert_eq!(tokenizer.next_token().unwrap(), Token::ObjectEnd);
//! assert_eq!(tokenizer.next_token().unwrap(), Token::Eof);
//! // Eof is idempotent
//! assert_eq!(tokenizer.next_token().unwrap(), Token::Eof);
//! ```

use crate::source::{CharSource, StringSource};
use crate::token::{BigNumber, Token};
use crate::{Error, Result};
use num_bigint::BigInt;

/// A lazy, forward-only lexer over a character source.
///
/// Created once per decode operation and discarded after [`Token::Eof`].
/// Lenient mode (the default) accepts single-quoted lexemes;
/// [`Tokenizer::with_strict_strings`] disables them.
pub struct Tokenizer<'a> {
    source: Box<dyn CharSource + 'a>,
    pushback: Option<char>,
    exhausted: bool,
    lenient: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over any character source.
    pub fn new(source: impl CharSource + 'a) -> Self {
        Tokenizer {
            source: Box::new(source),
            pushback: None,
            exhausted: false,
            lenient: true,
        }
    }

    /// Creates a tokenizer over in-memory text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str) -> Self {
        Self::new(StringSource::new(input))
    }

    /// Disables single-quoted lexemes.
    ///
    /// In strict mode a stray `'` fails with [`Error::IllegalState`] instead
    /// of opening a quoted lexeme.
    #[must_use]
    pub fn with_strict_strings(mut self) -> Self {
        self.lenient = false;
        self
    }

    /// Produces the next token.
    ///
    /// Once the source is exhausted this yields [`Token::Eof`] permanently.
    ///
    /// # Errors
    ///
    /// Fails on malformed keyword literals, premature end of input inside a
    /// quoted lexeme or keyword, and on a stray `'` in strict mode.
    pub fn next_token(&mut self) -> Result<Token> {
        if self.exhausted {
            return Ok(Token::Eof);
        }
        let ch = match self.read_significant()? {
            Some(ch) => ch,
            None => {
                self.exhausted = true;
                return Ok(Token::Eof);
            }
        };
        match ch {
            '{' => Ok(Token::ObjectStart),
            '}' => Ok(Token::ObjectEnd),
            '[' => Ok(Token::ArrayStart),
            ']' => Ok(Token::ArrayEnd),
            ',' => Ok(Token::Separator),
            '"' => self.read_quoted('"'),
            '\'' => {
                if self.lenient {
                    self.read_quoted('\'')
                } else {
                    Err(Error::illegal_state(
                        "unexpected character '\\'': single-quoted strings are only accepted in lenient mode",
                    ))
                }
            }
            't' => {
                self.expect_literal("rue", "true")?;
                Ok(Token::Bool(true))
            }
            'f' => {
                self.expect_literal("alse", "false")?;
                Ok(Token::Bool(false))
            }
            'n' => {
                self.expect_literal("ull", "null")?;
                Ok(Token::Null)
            }
            other => self.read_number(other),
        }
    }

    /// Returns the next significant character.
    ///
    /// A pending pushback character is consumed verbatim, never re-filtered
    /// for whitespace; the lexer only ever pushes back non-whitespace
    /// characters, which keeps the two rules consistent.
    fn read_significant(&mut self) -> Result<Option<char>> {
        if let Some(ch) = self.pushback.take() {
            return Ok(Some(ch));
        }
        while self.source.has_next() {
            let ch = self.source.next()?;
            if !ch.is_whitespace() {
                return Ok(Some(ch));
            }
        }
        Ok(None)
    }

    /// Buffers one speculatively-read character for the next read.
    ///
    /// The buffer holds at most one character; a second pushback is an
    /// engine defect and fails loudly.
    fn push_back(&mut self, ch: char) -> Result<()> {
        if self.pushback.is_some() {
            return Err(Error::illegal_state(
                "pushback buffer already holds a character",
            ));
        }
        self.pushback = Some(ch);
        Ok(())
    }

    /// Verifies the remaining characters of a keyword literal one by one.
    fn expect_literal(&mut self, rest: &str, whole: &str) -> Result<()> {
        for expected in rest.chars() {
            if !self.source.has_next() {
                return Err(Error::eof(&format!(
                    "'{}' in literal '{}'",
                    expected, whole
                )));
            }
            let found = self.source.next()?;
            if found != expected {
                return Err(Error::illegal_state(&format!(
                    "expected '{}' in literal '{}', found '{}'",
                    expected, whole, found
                )));
            }
        }
        Ok(())
    }

    /// Lexes a quoted lexeme, then decides string vs field name by lookahead.
    fn read_quoted(&mut self, quote: char) -> Result<Token> {
        let mut text = String::new();
        loop {
            if !self.source.has_next() {
                return Err(Error::eof("closing quote"));
            }
            let ch = self.source.next()?;
            if ch == '\\' {
                if !self.source.has_next() {
                    return Err(Error::eof("escaped character"));
                }
                // passthrough: the escaped character lands in the text as-is
                text.push(self.source.next()?);
            } else if ch == quote {
                break;
            } else {
                text.push(ch);
            }
        }
        match self.read_significant()? {
            Some(':') => Ok(Token::FieldName(text)),
            Some(other) => {
                self.push_back(other)?;
                Ok(Token::Str(text))
            }
            None => Ok(Token::Str(text)),
        }
    }

    /// Accumulates a numeric literal starting with `first` and classifies it.
    fn read_number(&mut self, first: char) -> Result<Token> {
        let mut literal = String::new();
        literal.push(first);
        while self.source.has_next() {
            let ch = self.source.next()?;
            if ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | 'e' | 'E') {
                literal.push(ch);
            } else if ch.is_whitespace() {
                // whitespace terminates the literal and is never pushed back
                break;
            } else {
                self.push_back(ch)?;
                break;
            }
        }
        Ok(classify_number(&literal))
    }
}

/// Classifies an accumulated numeric literal into its narrowest token.
fn classify_number(literal: &str) -> Token {
    if literal.contains(|c| matches!(c, '.' | 'e' | 'E')) {
        return match literal.parse::<f64>() {
            Ok(value) if value.is_infinite() => {
                // too large for f64: keep the lexeme exactly
                Token::Big(BigNumber::Decimal(literal.to_string()))
            }
            Ok(value) => Token::F64(value),
            Err(_) => Token::F64(f64::NAN),
        };
    }
    match literal.parse::<i64>() {
        Ok(value) => match i32::try_from(value) {
            Ok(narrow) => Token::I32(narrow),
            Err(_) => Token::I64(value),
        },
        Err(_) => match literal.parse::<BigInt>() {
            Ok(big) => Token::Big(BigNumber::Int(big)),
            Err(_) => Token::F64(f64::NAN),
        },
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        if self.exhausted {
            return None;
        }
        match self.next_token() {
            Ok(Token::Eof) => None,
            Err(err) => {
                self.exhausted = true;
                Some(Err(err))
            }
            ok => Some(ok),
        }
    }
}
