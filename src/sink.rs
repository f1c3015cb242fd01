//! Push-style output sinks.
//!
//! A [`JsonSink`] receives structural and value events and emits serialized
//! output. Two implementations are provided:
//!
//! - [`CompactSink`]: minimal JSON text into a `String` buffer
//! - [`PrettySink`]: a decorator wrapping any sink, adding newlines and
//!   indentation under configurable [`PrettyOptions`]
//!
//! Call-sequence invariants are the caller's obligation: every
//! `start_object` is matched by exactly one `end_object` (likewise arrays),
//! `start_field` is only legal at object-member position, and `separator`
//! only between siblings — never before the first or after the last.
//!
//! ## Escaping
//!
//! [`CompactSink`] escapes `"`, `\`, backspace, form feed, newline,
//! carriage return, and tab with their short escapes, any other control
//! character below U+0020 as `\u00xx` (lowercase hex, four digits), and —
//! one deliberate non-standard rule kept for output compatibility — forward
//! slash as `\/`.
//!
//! ## Examples
//!
//! ```rust
//! use pulljson::sink::{CompactSink, JsonSink};
//!
//! let mut sink = CompactSink::new();
//! sink.start_object().unwrap();
//! sink.start_field("a").unwrap();
//! sink.i32_value(1).unwrap();
//! sink.end_object().unwrap();
//! assert_eq!(sink.into_string(), "{\"a\":1}");
//! ```

use crate::token::BigNumber;
use crate::{Error, Result};

/// A push target for structured output events.
///
/// Narrow numeric methods default-delegate to [`JsonSink::i64_value`] /
/// [`JsonSink::f64_value`]; concrete sinks override them only when the
/// narrower width changes the output. [`JsonSink::raw`] is the formatting
/// hook decorators write whitespace through.
pub trait JsonSink {
    fn start_object(&mut self) -> Result<()>;
    fn end_object(&mut self) -> Result<()>;
    fn start_array(&mut self) -> Result<()>;
    fn end_array(&mut self) -> Result<()>;

    /// Emits a member name at object-value position.
    fn start_field(&mut self, name: &str) -> Result<()>;

    /// Emits the separator between sibling values or members.
    fn separator(&mut self) -> Result<()>;

    fn null_value(&mut self) -> Result<()>;
    fn bool_value(&mut self, value: bool) -> Result<()>;

    fn i8_value(&mut self, value: i8) -> Result<()> {
        self.i64_value(i64::from(value))
    }
    fn i16_value(&mut self, value: i16) -> Result<()> {
        self.i64_value(i64::from(value))
    }
    fn i32_value(&mut self, value: i32) -> Result<()> {
        self.i64_value(i64::from(value))
    }
    fn i64_value(&mut self, value: i64) -> Result<()>;

    fn f32_value(&mut self, value: f32) -> Result<()> {
        self.f64_value(f64::from(value))
    }
    fn f64_value(&mut self, value: f64) -> Result<()>;

    /// Emits an arbitrary-precision number verbatim.
    fn big_value(&mut self, value: &BigNumber) -> Result<()>;

    /// Emits a string value, or `null` when absent.
    fn string_value(&mut self, value: Option<&str>) -> Result<()>;

    /// Writes text verbatim; formatting decorators route whitespace here.
    fn raw(&mut self, text: &str) -> Result<()>;
}

/// A sink emitting minimal JSON text into a `String`.
pub struct CompactSink {
    out: String,
}

impl CompactSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        CompactSink {
            out: String::with_capacity(256),
        }
    }

    /// Consumes the sink, returning the accumulated text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }

    /// Writes a float, keeping the fractional marker so the literal
    /// re-tokenizes as a float rather than an integer.
    fn write_float(&mut self, repr: String, finite: bool) {
        self.out.push_str(&repr);
        if finite && !repr.contains(|c| matches!(c, '.' | 'e' | 'E')) {
            self.out.push_str(".0");
        }
    }

    fn write_escaped(&mut self, text: &str) {
        self.out.push('"');
        for ch in text.chars() {
            match ch {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                // non-standard but kept for output compatibility
                '/' => self.out.push_str("\\/"),
                '\u{0008}' => self.out.push_str("\\b"),
                '\u{000C}' => self.out.push_str("\\f"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                ch if (ch as u32) < 0x20 => {
                    self.out.push_str(&format!("\\u{:04x}", ch as u32));
                }
                ch => self.out.push(ch),
            }
        }
        self.out.push('"');
    }
}

impl Default for CompactSink {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonSink for CompactSink {
    fn start_object(&mut self) -> Result<()> {
        self.out.push('{');
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        self.out.push('}');
        Ok(())
    }

    fn start_array(&mut self) -> Result<()> {
        self.out.push('[');
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        self.out.push(']');
        Ok(())
    }

    fn start_field(&mut self, name: &str) -> Result<()> {
        self.write_escaped(name);
        self.out.push(':');
        Ok(())
    }

    fn separator(&mut self) -> Result<()> {
        self.out.push(',');
        Ok(())
    }

    fn null_value(&mut self) -> Result<()> {
        self.out.push_str("null");
        Ok(())
    }

    fn bool_value(&mut self, value: bool) -> Result<()> {
        self.out.push_str(if value { "true" } else { "false" });
        Ok(())
    }

    fn i64_value(&mut self, value: i64) -> Result<()> {
        self.out.push_str(&value.to_string());
        Ok(())
    }

    fn f32_value(&mut self, value: f32) -> Result<()> {
        self.write_float(value.to_string(), value.is_finite());
        Ok(())
    }

    fn f64_value(&mut self, value: f64) -> Result<()> {
        self.write_float(value.to_string(), value.is_finite());
        Ok(())
    }

    fn big_value(&mut self, value: &BigNumber) -> Result<()> {
        self.out.push_str(&value.to_string());
        Ok(())
    }

    fn string_value(&mut self, value: Option<&str>) -> Result<()> {
        match value {
            Some(text) => self.write_escaped(text),
            None => self.out.push_str("null"),
        }
        Ok(())
    }

    fn raw(&mut self, text: &str) -> Result<()> {
        self.out.push_str(text);
        Ok(())
    }
}

/// Formatting options for [`PrettySink`].
///
/// # Examples
///
/// ```rust
/// use pulljson::sink::PrettyOptions;
///
/// let options = PrettyOptions::new()
///     .with_indent("    ")
///     .with_newline_after_separator(false);
/// ```
#[derive(Clone, Debug)]
pub struct PrettyOptions {
    pub indent: String,
    pub newline: String,
    pub braces_on_own_line: bool,
    pub newline_after_separator: bool,
    pub newline_after_field_name: bool,
}

impl Default for PrettyOptions {
    fn default() -> Self {
        PrettyOptions {
            indent: "  ".to_string(),
            newline: "\n".to_string(),
            braces_on_own_line: false,
            newline_after_separator: true,
            newline_after_field_name: false,
        }
    }
}

impl PrettyOptions {
    /// Creates the default options (two-space indent, `\n` newlines,
    /// braces on the same line, newline after separators, space after
    /// field names).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indent unit written once per nesting level.
    #[must_use]
    pub fn with_indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }

    /// Sets the newline string.
    #[must_use]
    pub fn with_newline(mut self, newline: &str) -> Self {
        self.newline = newline.to_string();
        self
    }

    /// Places opening braces and brackets on their own line.
    #[must_use]
    pub fn with_braces_on_own_line(mut self, enabled: bool) -> Self {
        self.braces_on_own_line = enabled;
        self
    }

    /// Chooses comma-then-newline (`true`) or comma-then-space (`false`).
    #[must_use]
    pub fn with_newline_after_separator(mut self, enabled: bool) -> Self {
        self.newline_after_separator = enabled;
        self
    }

    /// Chooses field-name-then-newline (`true`) or field-name-then-space
    /// (`false`).
    #[must_use]
    pub fn with_newline_after_field_name(mut self, enabled: bool) -> Self {
        self.newline_after_field_name = enabled;
        self
    }
}

/// A decorator adding indentation and newlines to any sink.
///
/// Maintains an indent-level counter incremented on `start_object`/
/// `start_array` and decremented on the matching end. Decrementing below
/// zero is a defect and fails with [`Error::IllegalState`].
///
/// # Examples
///
/// ```rust
/// use pulljson::sink::{CompactSink, JsonSink, PrettySink};
///
/// let mut sink = PrettySink::new(CompactSink::new());
/// sink.start_object().unwrap();
/// sink.start_field("a").unwrap();
/// sink.i32_value(1).unwrap();
/// sink.end_object().unwrap();
/// assert_eq!(sink.into_inner().into_string(), "{\n  \"a\": 1\n}");
/// ```
pub struct PrettySink<S: JsonSink> {
    inner: S,
    options: PrettyOptions,
    level: usize,
    after_open: bool,
    started: bool,
}

impl<S: JsonSink> PrettySink<S> {
    /// Wraps a sink with the default options.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self::with_options(inner, PrettyOptions::default())
    }

    /// Wraps a sink with the given options.
    #[must_use]
    pub fn with_options(inner: S, options: PrettyOptions) -> Self {
        PrettySink {
            inner,
            options,
            level: 0,
            after_open: false,
            started: false,
        }
    }

    /// Unwraps the decorated sink.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn line_break(&mut self) -> Result<()> {
        self.inner.raw(&self.options.newline)?;
        for _ in 0..self.level {
            self.inner.raw(&self.options.indent)?;
        }
        Ok(())
    }

    /// Breaks the line when this is the first event inside a fresh scope.
    fn before_item(&mut self) -> Result<()> {
        if self.after_open {
            self.after_open = false;
            self.line_break()?;
        }
        self.started = true;
        Ok(())
    }

    /// Breaks before an opening brace, except at the very start of the
    /// document.
    fn open_scope(&mut self, mid_document: bool) -> Result<()> {
        if self.options.braces_on_own_line && mid_document {
            self.line_break()?;
        }
        Ok(())
    }

    fn close_scope(&mut self) -> Result<()> {
        if self.level == 0 {
            return Err(Error::illegal_state("indent underflow in pretty sink"));
        }
        self.level -= 1;
        if self.after_open {
            // empty container closes on the same line
            self.after_open = false;
        } else {
            self.line_break()?;
        }
        Ok(())
    }
}

impl<S: JsonSink> JsonSink for PrettySink<S> {
    fn start_object(&mut self) -> Result<()> {
        let mid_document = self.started;
        self.before_item()?;
        self.open_scope(mid_document)?;
        self.inner.start_object()?;
        self.level += 1;
        self.after_open = true;
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        self.close_scope()?;
        self.inner.end_object()
    }

    fn start_array(&mut self) -> Result<()> {
        let mid_document = self.started;
        self.before_item()?;
        self.open_scope(mid_document)?;
        self.inner.start_array()?;
        self.level += 1;
        self.after_open = true;
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        self.close_scope()?;
        self.inner.end_array()
    }

    fn start_field(&mut self, name: &str) -> Result<()> {
        self.before_item()?;
        self.inner.start_field(name)?;
        if self.options.newline_after_field_name {
            self.line_break()
        } else {
            self.inner.raw(" ")
        }
    }

    fn separator(&mut self) -> Result<()> {
        self.inner.separator()?;
        if self.options.newline_after_separator {
            self.line_break()
        } else {
            self.inner.raw(" ")
        }
    }

    fn null_value(&mut self) -> Result<()> {
        self.before_item()?;
        self.inner.null_value()
    }

    fn bool_value(&mut self, value: bool) -> Result<()> {
        self.before_item()?;
        self.inner.bool_value(value)
    }

    fn i64_value(&mut self, value: i64) -> Result<()> {
        self.before_item()?;
        self.inner.i64_value(value)
    }

    fn f32_value(&mut self, value: f32) -> Result<()> {
        self.before_item()?;
        self.inner.f32_value(value)
    }

    fn f64_value(&mut self, value: f64) -> Result<()> {
        self.before_item()?;
        self.inner.f64_value(value)
    }

    fn big_value(&mut self, value: &BigNumber) -> Result<()> {
        self.before_item()?;
        self.inner.big_value(value)
    }

    fn string_value(&mut self, value: Option<&str>) -> Result<()> {
        self.before_item()?;
        self.inner.string_value(value)
    }

    fn raw(&mut self, text: &str) -> Result<()> {
        self.inner.raw(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_escaping() {
        let mut sink = CompactSink::new();
        sink.string_value(Some("a/b\n\"c\"\\ \u{0001}")).unwrap();
        assert_eq!(sink.into_string(), r#""a\/b\n\"c\"\\ \u0001""#);
    }

    #[test]
    fn compact_short_escapes() {
        let mut sink = CompactSink::new();
        sink.string_value(Some("\u{0008}\u{000C}\r\t")).unwrap();
        assert_eq!(sink.into_string(), r#""\b\f\r\t""#);
    }

    #[test]
    fn compact_null_string() {
        let mut sink = CompactSink::new();
        sink.string_value(None).unwrap();
        assert_eq!(sink.into_string(), "null");
    }

    #[test]
    fn compact_assembles_structures() {
        let mut sink = CompactSink::new();
        sink.start_object().unwrap();
        sink.start_field("xs").unwrap();
        sink.start_array().unwrap();
        sink.i8_value(1).unwrap();
        sink.separator().unwrap();
        sink.f64_value(2.5).unwrap();
        sink.end_array().unwrap();
        sink.separator().unwrap();
        sink.start_field("ok").unwrap();
        sink.bool_value(true).unwrap();
        sink.end_object().unwrap();
        assert_eq!(sink.into_string(), "{\"xs\":[1,2.5],\"ok\":true}");
    }

    #[test]
    fn pretty_default_layout() {
        let mut sink = PrettySink::new(CompactSink::new());
        sink.start_object().unwrap();
        sink.start_field("a").unwrap();
        sink.i32_value(1).unwrap();
        sink.separator().unwrap();
        sink.start_field("b").unwrap();
        sink.start_array().unwrap();
        sink.i32_value(1).unwrap();
        sink.separator().unwrap();
        sink.i32_value(2).unwrap();
        sink.end_array().unwrap();
        sink.end_object().unwrap();
        assert_eq!(
            sink.into_inner().into_string(),
            "{\n  \"a\": 1,\n  \"b\": [\n    1,\n    2\n  ]\n}"
        );
    }

    #[test]
    fn pretty_empty_containers_stay_inline() {
        let mut sink = PrettySink::new(CompactSink::new());
        sink.start_object().unwrap();
        sink.start_field("a").unwrap();
        sink.start_array().unwrap();
        sink.end_array().unwrap();
        sink.end_object().unwrap();
        assert_eq!(sink.into_inner().into_string(), "{\n  \"a\": []\n}");
    }

    #[test]
    fn pretty_space_separators() {
        let options = PrettyOptions::new().with_newline_after_separator(false);
        let mut sink = PrettySink::with_options(CompactSink::new(), options);
        sink.start_array().unwrap();
        sink.i32_value(1).unwrap();
        sink.separator().unwrap();
        sink.i32_value(2).unwrap();
        sink.end_array().unwrap();
        assert_eq!(sink.into_inner().into_string(), "[\n  1, 2\n]");
    }

    #[test]
    fn pretty_newline_after_field_name() {
        let options = PrettyOptions::new().with_newline_after_field_name(true);
        let mut sink = PrettySink::with_options(CompactSink::new(), options);
        sink.start_object().unwrap();
        sink.start_field("a").unwrap();
        sink.i32_value(1).unwrap();
        sink.end_object().unwrap();
        assert_eq!(sink.into_inner().into_string(), "{\n  \"a\":\n  1\n}");
    }

    #[test]
    fn pretty_braces_on_own_line() {
        let options = PrettyOptions::new().with_braces_on_own_line(true);
        let mut sink = PrettySink::with_options(CompactSink::new(), options);
        sink.start_object().unwrap();
        sink.start_field("a").unwrap();
        sink.start_object().unwrap();
        sink.end_object().unwrap();
        sink.end_object().unwrap();
        // no break before the document's first brace; the nested one moves
        assert_eq!(
            sink.into_inner().into_string(),
            "{\n  \"a\": \n  {}\n}"
        );
    }

    #[test]
    fn indent_underflow_is_a_defect() {
        let mut sink = PrettySink::new(CompactSink::new());
        let err = sink.end_object().unwrap_err();
        assert!(matches!(err, Error::IllegalState(_)));
    }
}
