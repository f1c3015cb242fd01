//! The runtime mapping from types to codecs.
//!
//! A [`SerializationRegistry`] holds two ordered entry lists — serializers
//! and deserializers — where each entry pairs a matcher with a factory and a
//! human-readable name for diagnostics. Matchers come in two styles:
//!
//! - **exact**: a [`TypeId`] registered for one concrete type
//! - **predicate**: an arbitrary test over the requested [`TypeInfo`]
//!
//! Resolution checks every exact entry first, then predicates in
//! registration order; the first match wins, and its factory is invoked
//! with the requested type and the active [`Customizations`] to materialize
//! a codec instance.
//!
//! The registry is built once through [`RegistryBuilder`], immutable
//! thereafter, and safe to share across threads for concurrent lookups.
//!
//! ## Examples
//!
//! ```rust
//! use pulljson::registry::{RegistryBuilder, TypeInfo};
//! use pulljson::codec::BoolCodec;
//!
//! let registry = RegistryBuilder::new()
//!     .serializer_for::<bool>("Bool", |_, _| Box::new(BoolCodec))
//!     .build();
//!
//! assert!(registry.serializer(&TypeInfo::of::<bool>()).is_some());
//! assert!(registry.required_serializer(&TypeInfo::of::<u128>()).is_err());
//! ```

use crate::config::Customizations;
use crate::sink::JsonSink;
use crate::stream::TokenStream;
use crate::{Error, Result};
use std::any::{Any, TypeId};

/// A runtime type descriptor: identity plus diagnostic name.
///
/// # Examples
///
/// ```rust
/// use pulljson::registry::TypeInfo;
///
/// let info = TypeInfo::of::<Vec<i32>>();
/// assert!(info.name().contains("Vec"));
/// assert_eq!(info.raw_name(), "alloc::vec::Vec");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// Describes the type `T`.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        TypeInfo {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns the type identity.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the type name with generic parameters stripped.
    ///
    /// `Vec<i32>` and `Vec<String>` share the raw name `alloc::vec::Vec`,
    /// which is what predicate registrations covering a whole generic
    /// family match on.
    #[must_use]
    pub fn raw_name(&self) -> &'static str {
        strip_generics(self.name)
    }
}

fn strip_generics(full: &str) -> &str {
    match full.find('<') {
        Some(idx) => &full[..idx],
        None => full,
    }
}

/// A predicate matching every type whose generic-stripped name equals
/// `name`.
///
/// Note: `std::any::type_name` output is not guaranteed stable across
/// compiler versions; prefer exact registrations where possible.
pub fn raw_type_is(name: &'static str) -> impl Fn(&TypeInfo) -> bool + Send + Sync {
    move |info| info.raw_name() == name
}

/// Walks a value, emitting sink events.
pub trait Serializer {
    /// Encodes `value` into `sink`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TypeMismatch`] when `value` is not of the type
    /// this codec was resolved for, or with any sink failure.
    fn encode(&self, value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()>;
}

impl std::fmt::Debug for dyn Serializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Serializer")
    }
}

/// Drives a token cursor, reconstructing a value.
pub trait Deserializer {
    /// Decodes one complete value from `stream`.
    fn decode(&self, stream: &mut TokenStream<'_>) -> Result<Box<dyn Any>>;
}

/// Factory materializing a serializer for a matched type.
pub type SerializerFactory =
    Box<dyn Fn(&TypeInfo, &Customizations) -> Box<dyn Serializer> + Send + Sync>;

/// Factory materializing a deserializer for a matched type.
pub type DeserializerFactory =
    Box<dyn Fn(&TypeInfo, &Customizations) -> Box<dyn Deserializer> + Send + Sync>;

enum Matcher {
    Exact(TypeId),
    Predicate(Box<dyn Fn(&TypeInfo) -> bool + Send + Sync>),
}

struct Entry<F> {
    name: String,
    matcher: Matcher,
    factory: F,
}

fn resolve<'e, F>(entries: &'e [Entry<F>], ty: &TypeInfo) -> Option<&'e Entry<F>> {
    let exact = entries
        .iter()
        .find(|entry| matches!(entry.matcher, Matcher::Exact(id) if id == ty.id()));
    exact.or_else(|| {
        entries.iter().find(|entry| match &entry.matcher {
            Matcher::Predicate(predicate) => predicate(ty),
            Matcher::Exact(_) => false,
        })
    })
}

/// The frozen type→codec mapping shared by all encode/decode operations.
///
/// Also owns the active [`Customizations`], handed to every factory it
/// invokes.
pub struct SerializationRegistry {
    serializers: Vec<Entry<SerializerFactory>>,
    deserializers: Vec<Entry<DeserializerFactory>>,
    customizations: Customizations,
}

impl SerializationRegistry {
    /// Starts building an empty registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Resolves and materializes a serializer for `ty`, if registered.
    #[must_use]
    pub fn serializer(&self, ty: &TypeInfo) -> Option<Box<dyn Serializer>> {
        resolve(&self.serializers, ty).map(|entry| (entry.factory)(ty, &self.customizations))
    }

    /// Resolves and materializes a deserializer for `ty`, if registered.
    #[must_use]
    pub fn deserializer(&self, ty: &TypeInfo) -> Option<Box<dyn Deserializer>> {
        resolve(&self.deserializers, ty).map(|entry| (entry.factory)(ty, &self.customizations))
    }

    /// Like [`SerializationRegistry::serializer`], but failing when no
    /// entry matches.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::CodecNotFound`] naming the requested type.
    pub fn required_serializer(&self, ty: &TypeInfo) -> Result<Box<dyn Serializer>> {
        self.serializer(ty)
            .ok_or_else(|| Error::serializer_not_found(ty.name()))
    }

    /// Like [`SerializationRegistry::deserializer`], but failing when no
    /// entry matches.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::CodecNotFound`] naming the requested type.
    pub fn required_deserializer(&self, ty: &TypeInfo) -> Result<Box<dyn Deserializer>> {
        self.deserializer(ty)
            .ok_or_else(|| Error::deserializer_not_found(ty.name()))
    }

    /// Returns the diagnostic name of the serializer entry matching `ty`.
    #[must_use]
    pub fn serializer_name(&self, ty: &TypeInfo) -> Option<&str> {
        resolve(&self.serializers, ty).map(|entry| entry.name.as_str())
    }

    /// Returns the diagnostic name of the deserializer entry matching `ty`.
    #[must_use]
    pub fn deserializer_name(&self, ty: &TypeInfo) -> Option<&str> {
        resolve(&self.deserializers, ty).map(|entry| entry.name.as_str())
    }

    /// Returns the customizations shared with every resolved codec.
    #[must_use]
    pub fn customizations(&self) -> &Customizations {
        &self.customizations
    }
}

/// Accumulates registrations, then freezes them into a
/// [`SerializationRegistry`].
pub struct RegistryBuilder {
    serializers: Vec<Entry<SerializerFactory>>,
    deserializers: Vec<Entry<DeserializerFactory>>,
    customizations: Customizations,
}

impl RegistryBuilder {
    /// Creates an empty builder with empty customizations.
    #[must_use]
    pub fn new() -> Self {
        RegistryBuilder {
            serializers: Vec::new(),
            deserializers: Vec::new(),
            customizations: Customizations::empty(),
        }
    }

    /// Registers a serializer factory for the exact type `T`.
    #[must_use]
    pub fn serializer_for<T: Any>(
        mut self,
        name: &str,
        factory: impl Fn(&TypeInfo, &Customizations) -> Box<dyn Serializer> + Send + Sync + 'static,
    ) -> Self {
        self.serializers.push(Entry {
            name: name.to_string(),
            matcher: Matcher::Exact(TypeId::of::<T>()),
            factory: Box::new(factory),
        });
        self
    }

    /// Registers a serializer factory behind a type predicate.
    ///
    /// Predicates are evaluated in registration order, after all exact
    /// entries.
    #[must_use]
    pub fn serializer_matching(
        mut self,
        name: &str,
        predicate: impl Fn(&TypeInfo) -> bool + Send + Sync + 'static,
        factory: impl Fn(&TypeInfo, &Customizations) -> Box<dyn Serializer> + Send + Sync + 'static,
    ) -> Self {
        self.serializers.push(Entry {
            name: name.to_string(),
            matcher: Matcher::Predicate(Box::new(predicate)),
            factory: Box::new(factory),
        });
        self
    }

    /// Registers a deserializer factory for the exact type `T`.
    #[must_use]
    pub fn deserializer_for<T: Any>(
        mut self,
        name: &str,
        factory: impl Fn(&TypeInfo, &Customizations) -> Box<dyn Deserializer> + Send + Sync + 'static,
    ) -> Self {
        self.deserializers.push(Entry {
            name: name.to_string(),
            matcher: Matcher::Exact(TypeId::of::<T>()),
            factory: Box::new(factory),
        });
        self
    }

    /// Registers a deserializer factory behind a type predicate.
    #[must_use]
    pub fn deserializer_matching(
        mut self,
        name: &str,
        predicate: impl Fn(&TypeInfo) -> bool + Send + Sync + 'static,
        factory: impl Fn(&TypeInfo, &Customizations) -> Box<dyn Deserializer> + Send + Sync + 'static,
    ) -> Self {
        self.deserializers.push(Entry {
            name: name.to_string(),
            matcher: Matcher::Predicate(Box::new(predicate)),
            factory: Box::new(factory),
        });
        self
    }

    /// Sets the customizations the frozen registry will carry.
    #[must_use]
    pub fn customizations(mut self, customizations: Customizations) -> Self {
        self.customizations = customizations;
        self
    }

    /// Freezes the registrations.
    #[must_use]
    pub fn build(self) -> SerializationRegistry {
        SerializationRegistry {
            serializers: self.serializers,
            deserializers: self.deserializers,
            customizations: self.customizations,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker(&'static str);

    impl Serializer for Marker {
        fn encode(&self, _value: &dyn Any, sink: &mut dyn JsonSink) -> Result<()> {
            sink.string_value(Some(self.0))
        }
    }

    fn marker(tag: &'static str) -> impl Fn(&TypeInfo, &Customizations) -> Box<dyn Serializer> {
        move |_, _| Box::new(Marker(tag))
    }

    fn tag_of(serializer: &dyn Serializer) -> String {
        let mut sink = crate::sink::CompactSink::new();
        serializer.encode(&(), &mut sink).unwrap();
        sink.into_string()
    }

    #[test]
    fn exact_entry_beats_predicate() {
        let registry = RegistryBuilder::new()
            .serializer_matching("any", |_| true, marker("predicate"))
            .serializer_for::<i32>("Int", marker("exact"))
            .build();
        let resolved = registry.serializer(&TypeInfo::of::<i32>()).unwrap();
        assert_eq!(tag_of(resolved.as_ref()), "\"exact\"");
        assert_eq!(
            registry.serializer_name(&TypeInfo::of::<i32>()),
            Some("Int")
        );
    }

    #[test]
    fn predicates_match_in_registration_order() {
        let registry = RegistryBuilder::new()
            .serializer_matching("first", |_| true, marker("first"))
            .serializer_matching("second", |_| true, marker("second"))
            .build();
        let resolved = registry.serializer(&TypeInfo::of::<String>()).unwrap();
        assert_eq!(tag_of(resolved.as_ref()), "\"first\"");
    }

    #[test]
    fn required_lookup_names_the_type() {
        let registry = RegistryBuilder::new().build();
        let err = registry
            .required_serializer(&TypeInfo::of::<Vec<u8>>())
            .unwrap_err();
        match err {
            Error::CodecNotFound { kind, type_name } => {
                assert_eq!(kind, "serializer");
                assert!(type_name.contains("Vec"));
            }
            other => panic!("expected CodecNotFound, got {:?}", other),
        }
    }

    #[test]
    fn raw_type_predicate_covers_a_generic_family() {
        let matches_vec = raw_type_is("alloc::vec::Vec");
        assert!(matches_vec(&TypeInfo::of::<Vec<i32>>()));
        assert!(matches_vec(&TypeInfo::of::<Vec<String>>()));
        assert!(!matches_vec(&TypeInfo::of::<String>()));
    }

    #[test]
    fn factories_see_the_requested_type() {
        let registry = RegistryBuilder::new()
            .serializer_matching(
                "named",
                raw_type_is("alloc::vec::Vec"),
                |ty, _| Box::new(Marker(ty.raw_name())),
            )
            .build();
        let resolved = registry.serializer(&TypeInfo::of::<Vec<i32>>()).unwrap();
        assert_eq!(tag_of(resolved.as_ref()), "\"alloc::vec::Vec\"");
    }
}
