//! Character sources feeding the tokenizer.
//!
//! A [`CharSource`] yields one character at a time and knows whether more
//! input remains. Two constructions are provided:
//!
//! - [`StringSource`]: index-based over in-memory text, O(1) per character
//! - [`ReaderSource`]: over any [`io::Read`], with a one-character lookahead
//!   buffer filled eagerly at construction and after each read
//!
//! ## Examples
//!
//! ```rust
//! use pulljson::source::{CharSource, StringSource};
//!
//! let mut source = StringSource::new("ab");
//! assert!(source.has_next());
//! assert_eq!(source.next().unwrap(), 'a');
//! assert_eq!(source.next().unwrap(), 'b');
//! assert!(!source.has_next());
//! ```

use crate::{Error, Result};
use std::io;

/// A pull source of characters.
///
/// `has_next` has no side effect; `next` advances the position by exactly one
/// character and fails with an end-of-input condition once the source is
/// exhausted.
pub trait CharSource {
    /// Returns `true` if at least one more character can be read.
    fn has_next(&self) -> bool;

    /// Returns the next character, advancing the position by one.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnexpectedEof`] when called while [`Self::has_next`]
    /// is `false`.
    fn next(&mut self) -> Result<char>;
}

/// A character source over in-memory text.
///
/// # Examples
///
/// ```rust
/// use pulljson::source::{CharSource, StringSource};
///
/// let mut source = StringSource::new("x");
/// assert_eq!(source.next().unwrap(), 'x');
/// assert!(source.next().is_err());
/// ```
pub struct StringSource<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> StringSource<'a> {
    /// Creates a source over the given text, positioned at its start.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        StringSource { input, position: 0 }
    }
}

impl CharSource for StringSource<'_> {
    fn has_next(&self) -> bool {
        self.position < self.input.len()
    }

    fn next(&mut self) -> Result<char> {
        match self.input[self.position..].chars().next() {
            Some(ch) => {
                self.position += ch.len_utf8();
                Ok(ch)
            }
            None => Err(Error::eof("another character")),
        }
    }
}

/// A character source over an [`io::Read`] stream.
///
/// Maintains a one-character lookahead buffer so that [`CharSource::has_next`]
/// is side-effect free: the buffer is filled eagerly at construction and
/// refilled after each [`CharSource::next`]. Underlying I/O failures map to
/// [`Error::Io`].
pub struct ReaderSource<R: io::Read> {
    reader: R,
    ahead: Option<char>,
}

impl<R: io::Read> ReaderSource<R> {
    /// Creates a source over the given reader, eagerly reading the first
    /// character.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Io`] if the initial read fails or the stream does
    /// not start with valid UTF-8.
    pub fn new(reader: R) -> Result<Self> {
        let mut source = ReaderSource {
            reader,
            ahead: None,
        };
        source.fill()?;
        Ok(source)
    }

    fn fill(&mut self) -> Result<()> {
        self.ahead = read_utf8_char(&mut self.reader)?;
        Ok(())
    }
}

impl<R: io::Read> CharSource for ReaderSource<R> {
    fn has_next(&self) -> bool {
        self.ahead.is_some()
    }

    fn next(&mut self) -> Result<char> {
        match self.ahead {
            Some(ch) => {
                self.fill()?;
                Ok(ch)
            }
            None => Err(Error::eof("another character")),
        }
    }
}

/// Decodes a single UTF-8 character from the reader, or `None` at EOF.
fn read_utf8_char<R: io::Read>(reader: &mut R) -> Result<Option<char>> {
    let mut buf = [0u8; 4];
    let mut first = [0u8; 1];
    loop {
        match reader.read(&mut first) {
            Ok(0) => return Ok(None),
            Ok(_) => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::io(&e.to_string())),
        }
    }

    buf[0] = first[0];
    let width = match first[0] {
        b if b < 0x80 => 1,
        b if b & 0xE0 == 0xC0 => 2,
        b if b & 0xF0 == 0xE0 => 3,
        b if b & 0xF8 == 0xF0 => 4,
        _ => return Err(Error::io("invalid UTF-8 leading byte")),
    };
    if width > 1 {
        reader
            .read_exact(&mut buf[1..width])
            .map_err(|e| Error::io(&e.to_string()))?;
    }

    match std::str::from_utf8(&buf[..width]) {
        Ok(s) => Ok(s.chars().next()),
        Err(_) => Err(Error::io("invalid UTF-8 sequence")),
    }
}
