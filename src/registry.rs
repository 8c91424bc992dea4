//! Bridge to the type registry that turns type headers into type handles.
//!
//! Identifiers in a type header are local to one decode pass: the encoder writes a type
//! name the first time it is used and a small number afterwards. [`TypeCache`] holds the
//! numbers assigned so far and is owned by the decoding session, which clears it whenever
//! a new pass begins. [`TypeRegistry`] is the shared part that knows about types.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use log::debug;

use crate::{DecodeError, PrimitiveBuf, ReadAhead, StringScratch, TypeRef};

/// Type header tag announcing that a type name follows.
pub const TYPE_TAG_NAME: u16 = 0;

/// Pass-local map from type identifiers to handles.
///
/// Identifiers are assigned in registration order starting at 1, since 0 is reserved
/// for [`TYPE_TAG_NAME`].
#[derive(Clone, Debug)]
pub struct TypeCache<H> {
    entries: Vec<H>,
}

impl<H> Default for TypeCache<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> TypeCache<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `handle` and returns the identifier later headers use to refer to it.
    pub fn register(&mut self, handle: H) -> usize {
        self.entries.push(handle);
        self.entries.len()
    }

    pub fn get(&self, id: usize) -> Option<&H> {
        id.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves type names to handles for every session of one configuration.
///
/// Implementations are shared between sessions and must synchronize their own
/// registrations. Per-pass state belongs in the [`TypeCache`] passed to each call.
pub trait TypeRegistry {
    /// Opaque reference to a resolved type.
    type Handle: Clone;

    /// Resolves a fully qualified type name.
    ///
    /// # Errors
    ///
    /// `ClassResolution` if the name is unknown.
    fn class_for_name(&self, name: &str) -> Result<Self::Handle, DecodeError>;

    /// Reads one type header from `buf` and resolves it.
    ///
    /// The header is a varint char tag. [`TYPE_TAG_NAME`] is followed by a UTF string
    /// holding the type name, which is resolved and registered in `cache` under the next
    /// identifier; any other tag names an identifier already in `cache`.
    ///
    /// # Errors
    ///
    /// `ClassResolution` for unknown names or identifiers, or any read error.
    fn decode_class<B: ReadAhead>(
        &self,
        cache: &mut TypeCache<Self::Handle>,
        buf: &mut B,
        strings: &mut StringScratch,
    ) -> Result<Self::Handle, DecodeError> {
        let tag = buf.get_var::<u16>()?;
        if tag == TYPE_TAG_NAME {
            let name = strings.read_utf(buf)?;
            let handle = self.class_for_name(&name)?;
            cache.register(handle.clone());
            return Ok(handle);
        }
        cache.get(tag.into()).cloned().ok_or_else(|| {
            debug!("type id {tag} not assigned in this pass ({} known)", cache.len());
            DecodeError::ClassResolution(TypeRef::Id(tag))
        })
    }
}

/// A thread-safe registry mapping type names to handles.
#[derive(Debug)]
pub struct NamedTypeRegistry<H> {
    types: RwLock<HashMap<String, H>>,
}

impl<H> Default for NamedTypeRegistry<H> {
    fn default() -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
        }
    }
}

impl<H: Clone> NamedTypeRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `name` resolvable, replacing any previous handle for it.
    pub fn register(&self, name: impl Into<String>, handle: H) {
        self.types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), handle);
    }

    pub fn len(&self) -> usize {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<H: Clone> TypeRegistry for NamedTypeRegistry<H> {
    type Handle = H;

    fn class_for_name(&self, name: &str) -> Result<H, DecodeError> {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        types.get(name).cloned().ok_or_else(|| {
            debug!("no type registered under `{name}`");
            DecodeError::ClassResolution(TypeRef::Name(name.to_owned()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> NamedTypeRegistry<u32> {
        let registry = NamedTypeRegistry::new();
        registry.register("com.example.Point", 7);
        registry.register("com.example.Line", 8);
        registry
    }

    #[test]
    fn ids_start_at_one() {
        let mut cache = TypeCache::new();
        assert_eq!(cache.register("a"), 1);
        assert_eq!(cache.register("b"), 2);
        assert_eq!(cache.get(0), None);
        assert_eq!(cache.get(2), Some(&"b"));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(1), None);
    }

    #[test]
    fn name_then_back_reference() {
        let registry = registry();
        let mut cache = TypeCache::new();
        let mut strings = StringScratch::new();
        let mut encoded = vec![0u8, 17];
        encoded.extend_from_slice(b"com.example.Point");
        encoded.push(1);
        let mut buf = encoded.as_slice();
        assert_eq!(
            registry
                .decode_class(&mut cache, &mut buf, &mut strings)
                .unwrap(),
            7
        );
        assert_eq!(
            registry
                .decode_class(&mut cache, &mut buf, &mut strings)
                .unwrap(),
            7
        );
        assert!(buf.is_empty());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn unknown_name_and_id() {
        let registry = registry();
        let mut cache = TypeCache::new();
        let mut strings = StringScratch::new();
        let mut encoded = vec![0u8, 3];
        encoded.extend_from_slice(b"Foo");
        assert!(matches!(
            registry.decode_class(&mut cache, &mut encoded.as_slice(), &mut strings),
            Err(DecodeError::ClassResolution(TypeRef::Name(name))) if name == "Foo"
        ));
        assert!(matches!(
            registry.decode_class(&mut cache, &mut &[4u8][..], &mut strings),
            Err(DecodeError::ClassResolution(TypeRef::Id(4)))
        ));
    }
}
