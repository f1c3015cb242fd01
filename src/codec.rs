//! Built-in codecs and the default registry.
//!
//! Each codec pairs a [`Serializer`] walking a value into sink events with a
//! [`Deserializer`] driving the token cursor back into a value. The
//! primitives cover the numeric family, booleans, and strings;
//! [`ValueSerializer`]/[`ValueDeserializer`] handle [`JsonValue`] trees of
//! arbitrary shape, bounded by [`MAX_DEPTH`].
//!
//! [`default_codecs`] returns a registry builder pre-populated with all of
//! them, which is what the engine facade uses unless given a custom
//! registry.
//!
//! ## Examples
//!
//! ```rust
//! use pulljson::codec::default_codecs;
//! use pulljson::registry::TypeInfo;
//!
//! let registry = default_codecs().build();
//! assert!(registry.serializer(&TypeInfo::of::<String>()).is_some());
//! assert!(registry.deserializer(&TypeInfo::of::<i64>()).is_some());
//! ```

use crate::config::{Customizations, DO_NOT_WRITE_NULL_OBJECT_VALUES};
use crate::map::JsonMap;
use crate::registry::{Deserializer, RegistryBuilder, Serializer};
use crate::sink::JsonSink;
use crate::stream::{TokenStream, MAX_DEPTH};
use crate::token::Token;
use crate::value::{JsonValue, Number};
use crate::{Error, Result};
use std::any::Any;

fn downcast<'v, T: Any>(value: &'v dyn Any, expected: &str) -> Result<&'v T> {
    value
        .downcast_ref()
        .ok_or_else(|| Error::type_mismatch(expected, "a different runtime type"))
}

fn narrow<T: TryFrom<i64>>(value: i64, label: &str) -> Result<T> {
    T::try_from(value).map_err(|_| Error::custom(format!("integer {} out of range for {}", value, label)))
}

/// Codec for `bool`.
pub struct BoolCodec;

impl Serializer for BoolCodec {
    fn encode(&self, value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
        sink.bool_value(*downcast::<bool>(value, "bool")?)
    }
}

impl Deserializer for BoolCodec {
    fn decode(&self, stream: &mut TokenStream<'_>) -> Result<Box<dyn Any>> {
        stream.advance()?;
        Ok(Box::new(stream.bool_value()?))
    }
}

/// Codec for `i8`.
pub struct I8Codec;

impl Serializer for I8Codec {
    fn encode(&self, value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
        sink.i8_value(*downcast::<i8>(value, "i8")?)
    }
}

impl Deserializer for I8Codec {
    fn decode(&self, stream: &mut TokenStream<'_>) -> Result<Box<dyn Any>> {
        stream.advance()?;
        Ok(Box::new(narrow::<i8>(stream.i64_value()?, "i8")?))
    }
}

/// Codec for `i16`.
pub struct I16Codec;

impl Serializer for I16Codec {
    fn encode(&self, value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
        sink.i16_value(*downcast::<i16>(value, "i16")?)
    }
}

impl Deserializer for I16Codec {
    fn decode(&self, stream: &mut TokenStream<'_>) -> Result<Box<dyn Any>> {
        stream.advance()?;
        Ok(Box::new(narrow::<i16>(stream.i64_value()?, "i16")?))
    }
}

/// Codec for `i32`.
pub struct I32Codec;

impl Serializer for I32Codec {
    fn encode(&self, value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
        sink.i32_value(*downcast::<i32>(value, "i32")?)
    }
}

impl Deserializer for I32Codec {
    fn decode(&self, stream: &mut TokenStream<'_>) -> Result<Box<dyn Any>> {
        stream.advance()?;
        Ok(Box::new(narrow::<i32>(stream.i64_value()?, "i32")?))
    }
}

/// Codec for `i64`.
pub struct I64Codec;

impl Serializer for I64Codec {
    fn encode(&self, value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
        sink.i64_value(*downcast::<i64>(value, "i64")?)
    }
}

impl Deserializer for I64Codec {
    fn decode(&self, stream: &mut TokenStream<'_>) -> Result<Box<dyn Any>> {
        stream.advance()?;
        Ok(Box::new(stream.i64_value()?))
    }
}

/// Codec for `u8`.
pub struct U8Codec;

impl Serializer for U8Codec {
    fn encode(&self, value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
        sink.i64_value(i64::from(*downcast::<u8>(value, "u8")?))
    }
}

impl Deserializer for U8Codec {
    fn decode(&self, stream: &mut TokenStream<'_>) -> Result<Box<dyn Any>> {
        stream.advance()?;
        Ok(Box::new(narrow::<u8>(stream.i64_value()?, "u8")?))
    }
}

/// Codec for `u16`.
pub struct U16Codec;

impl Serializer for U16Codec {
    fn encode(&self, value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
        sink.i64_value(i64::from(*downcast::<u16>(value, "u16")?))
    }
}

impl Deserializer for U16Codec {
    fn decode(&self, stream: &mut TokenStream<'_>) -> Result<Box<dyn Any>> {
        stream.advance()?;
        Ok(Box::new(narrow::<u16>(stream.i64_value()?, "u16")?))
    }
}

/// Codec for `u32`.
pub struct U32Codec;

impl Serializer for U32Codec {
    fn encode(&self, value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
        sink.i64_value(i64::from(*downcast::<u32>(value, "u32")?))
    }
}

impl Deserializer for U32Codec {
    fn decode(&self, stream: &mut TokenStream<'_>) -> Result<Box<dyn Any>> {
        stream.advance()?;
        Ok(Box::new(narrow::<u32>(stream.i64_value()?, "u32")?))
    }
}

/// Codec for `f32`.
pub struct F32Codec;

impl Serializer for F32Codec {
    fn encode(&self, value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
        sink.f32_value(*downcast::<f32>(value, "f32")?)
    }
}

impl Deserializer for F32Codec {
    fn decode(&self, stream: &mut TokenStream<'_>) -> Result<Box<dyn Any>> {
        stream.advance()?;
        Ok(Box::new(stream.f64_value()? as f32))
    }
}

/// Codec for `f64`.
pub struct F64Codec;

impl Serializer for F64Codec {
    fn encode(&self, value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
        sink.f64_value(*downcast::<f64>(value, "f64")?)
    }
}

impl Deserializer for F64Codec {
    fn decode(&self, stream: &mut TokenStream<'_>) -> Result<Box<dyn Any>> {
        stream.advance()?;
        Ok(Box::new(stream.f64_value()?))
    }
}

/// Codec for `String`.
pub struct StringCodec;

impl Serializer for StringCodec {
    fn encode(&self, value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
        sink.string_value(Some(downcast::<String>(value, "String")?))
    }
}

impl Deserializer for StringCodec {
    fn decode(&self, stream: &mut TokenStream<'_>) -> Result<Box<dyn Any>> {
        stream.advance()?;
        Ok(Box::new(stream.str_value()?.to_string()))
    }
}

/// Serializer for [`JsonValue`] trees.
///
/// Consults `DO_NOT_WRITE_NULL_OBJECT_VALUES`: when set, object members
/// whose value is null are omitted from the output.
pub struct ValueSerializer {
    omit_null_members: bool,
}

impl ValueSerializer {
    /// Creates a value serializer honoring the given customizations.
    #[must_use]
    pub fn new(customizations: &Customizations) -> Self {
        ValueSerializer {
            omit_null_members: customizations.is_true(&DO_NOT_WRITE_NULL_OBJECT_VALUES),
        }
    }
}

impl Serializer for ValueSerializer {
    fn encode(&self, value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
        write_value(
            downcast::<JsonValue>(value, "JsonValue")?,
            sink,
            self.omit_null_members,
            0,
        )
    }
}

/// Deserializer for [`JsonValue`] trees.
pub struct ValueDeserializer;

impl Deserializer for ValueDeserializer {
    fn decode(&self, stream: &mut TokenStream<'_>) -> Result<Box<dyn Any>> {
        Ok(Box::new(read_value(stream, 0)?))
    }
}

/// Walks a [`JsonValue`], emitting sink events.
pub(crate) fn write_value(
    value: &JsonValue,
    sink: &mut dyn JsonSink,
    omit_null_members: bool,
    depth: usize,
) -> Result<()> {
    if depth >= MAX_DEPTH {
        return Err(Error::DepthLimit(MAX_DEPTH));
    }
    match value {
        JsonValue::Null => sink.null_value(),
        JsonValue::Bool(b) => sink.bool_value(*b),
        JsonValue::Number(Number::Int(i)) => sink.i64_value(*i),
        JsonValue::Number(Number::Float(f)) => sink.f64_value(*f),
        JsonValue::Number(Number::Big(big)) => sink.big_value(big),
        JsonValue::String(s) => sink.string_value(Some(s)),
        JsonValue::Array(items) => {
            sink.start_array()?;
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    sink.separator()?;
                }
                write_value(item, sink, omit_null_members, depth + 1)?;
            }
            sink.end_array()
        }
        JsonValue::Object(members) => {
            sink.start_object()?;
            let mut first = true;
            for (name, member) in members.iter() {
                if omit_null_members && member.is_null() {
                    continue;
                }
                if !first {
                    sink.separator()?;
                }
                first = false;
                sink.start_field(name)?;
                write_value(member, sink, omit_null_members, depth + 1)?;
            }
            sink.end_object()
        }
    }
}

/// Reads one complete value, advancing the stream onto it first.
pub(crate) fn read_value(stream: &mut TokenStream<'_>, depth: usize) -> Result<JsonValue> {
    stream.advance()?;
    read_current(stream, depth)
}

/// Reads the value starting at the current token.
fn read_current(stream: &mut TokenStream<'_>, depth: usize) -> Result<JsonValue> {
    if depth >= MAX_DEPTH {
        return Err(Error::DepthLimit(MAX_DEPTH));
    }
    match stream.current()? {
        Token::Null => Ok(JsonValue::Null),
        Token::Bool(b) => Ok(JsonValue::Bool(*b)),
        Token::Str(s) => Ok(JsonValue::String(s.clone())),
        Token::I8(v) => Ok(JsonValue::Number(Number::Int(i64::from(*v)))),
        Token::I16(v) => Ok(JsonValue::Number(Number::Int(i64::from(*v)))),
        Token::I32(v) => Ok(JsonValue::Number(Number::Int(i64::from(*v)))),
        Token::I64(v) => Ok(JsonValue::Number(Number::Int(*v))),
        Token::F32(v) => Ok(JsonValue::Number(Number::Float(f64::from(*v)))),
        Token::F64(v) => Ok(JsonValue::Number(Number::Float(*v))),
        Token::Big(big) => Ok(JsonValue::Number(Number::Big(big.clone()))),
        Token::ObjectStart => {
            let mut members = JsonMap::new();
            while stream.has_more()? {
                stream.advance()?;
                let name = stream.field_name()?.to_string();
                stream.advance()?;
                let member = read_current(stream, depth + 1)?;
                members.insert(name, member);
            }
            Ok(JsonValue::Object(members))
        }
        Token::ArrayStart => {
            let mut items = Vec::new();
            while stream.has_more()? {
                stream.advance()?;
                items.push(read_current(stream, depth + 1)?);
            }
            Ok(JsonValue::Array(items))
        }
        other => Err(Error::type_mismatch("value", other.describe())),
    }
}

/// Returns a registry builder pre-populated with the built-in codecs.
#[must_use]
pub fn default_codecs() -> RegistryBuilder {
    RegistryBuilder::new()
        .serializer_for::<bool>("Bool", |_, _| Box::new(BoolCodec))
        .deserializer_for::<bool>("Bool", |_, _| Box::new(BoolCodec))
        .serializer_for::<i8>("I8", |_, _| Box::new(I8Codec))
        .deserializer_for::<i8>("I8", |_, _| Box::new(I8Codec))
        .serializer_for::<i16>("I16", |_, _| Box::new(I16Codec))
        .deserializer_for::<i16>("I16", |_, _| Box::new(I16Codec))
        .serializer_for::<i32>("I32", |_, _| Box::new(I32Codec))
        .deserializer_for::<i32>("I32", |_, _| Box::new(I32Codec))
        .serializer_for::<i64>("I64", |_, _| Box::new(I64Codec))
        .deserializer_for::<i64>("I64", |_, _| Box::new(I64Codec))
        .serializer_for::<u8>("U8", |_, _| Box::new(U8Codec))
        .deserializer_for::<u8>("U8", |_, _| Box::new(U8Codec))
        .serializer_for::<u16>("U16", |_, _| Box::new(U16Codec))
        .deserializer_for::<u16>("U16", |_, _| Box::new(U16Codec))
        .serializer_for::<u32>("U32", |_, _| Box::new(U32Codec))
        .deserializer_for::<u32>("U32", |_, _| Box::new(U32Codec))
        .serializer_for::<f32>("F32", |_, _| Box::new(F32Codec))
        .deserializer_for::<f32>("F32", |_, _| Box::new(F32Codec))
        .serializer_for::<f64>("F64", |_, _| Box::new(F64Codec))
        .deserializer_for::<f64>("F64", |_, _| Box::new(F64Codec))
        .serializer_for::<String>("String", |_, _| Box::new(StringCodec))
        .deserializer_for::<String>("String", |_, _| Box::new(StringCodec))
        .serializer_for::<JsonValue>("Value", |_, customizations| {
            Box::new(ValueSerializer::new(customizations))
        })
        .deserializer_for::<JsonValue>("Value", |_, _| Box::new(ValueDeserializer))
}
