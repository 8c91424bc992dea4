use std::io::Read;
use std::sync::Arc;

use log::trace;

use crate::array::{self, ElementKind, PrimitiveArray, PrimitiveSliceMut};
use crate::{
    CursorBuffer, DecodeError, PrimitiveBuf, SessionConfig, StringScratch, TypeCache,
    TypeRegistry,
};

/// A reusable decoder for one byte stream at a time.
///
/// A session owns its input buffer, its string scratch space and the pass-local type
/// cache, and shares the type registry with every other session of the same
/// configuration. Bind it to input with one of the `bind_*` methods, decode with the
/// `read_*` methods, then [`release`](Self::release) it or bind it again.
///
/// Sessions are not reentrant. After any decode error the session must be rebound or
/// rewound before it decodes another message.
///
/// ```
/// use std::sync::Arc;
/// use fst_decode::{DecoderSession, NamedTypeRegistry};
///
/// let registry = Arc::new(NamedTypeRegistry::<u32>::new());
/// let mut session = DecoderSession::new(registry);
/// session.bind_to_owned_copy(&[0x2a, 0x80, 0x10, 0x27, 0x01], 0, 5).unwrap();
/// assert_eq!(session.read_int().unwrap(), 42);
/// assert_eq!(session.read_int().unwrap(), 10_000);
/// assert!(session.read_bool().unwrap());
/// assert_eq!(session.current_position(), 5);
/// ```
pub struct DecoderSession<R: TypeRegistry> {
    input: CursorBuffer,
    strings: StringScratch,
    types: TypeCache<R::Handle>,
    registry: Arc<R>,
}

impl<R: TypeRegistry> DecoderSession<R> {
    pub fn new(registry: Arc<R>) -> Self {
        Self::with_config(registry, &SessionConfig::default())
    }

    pub fn with_config(registry: Arc<R>, config: &SessionConfig) -> Self {
        Self {
            input: CursorBuffer::with_capacity(config.initial_capacity),
            strings: StringScratch::with_capacity(config.char_scratch_capacity),
            types: TypeCache::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    /// The identifiers resolved so far in the current pass.
    pub fn type_cache(&self) -> &TypeCache<R::Handle> {
        &self.types
    }

    /// Starts a pass over a copy of `bytes[offset..offset + len]`.
    pub fn bind_to_owned_copy(
        &mut self,
        bytes: &[u8],
        offset: usize,
        len: usize,
    ) -> Result<(), DecodeError> {
        self.types.clear();
        trace!("binding session to a copy of {len} bytes");
        self.input.replace_copy(bytes, offset, len)
    }

    /// Starts a pass over the first `len` bytes of `bytes`, taking ownership without
    /// copying.
    pub fn bind_to_borrowed_view(&mut self, bytes: Vec<u8>, len: usize) -> Result<(), DecodeError> {
        self.types.clear();
        trace!("binding session to a {len} byte view");
        self.input.replace_view(bytes, len)
    }

    /// Starts a pass over everything `source` yields. Returns the number of bytes read.
    pub fn bind_to_source(&mut self, source: impl Read) -> Result<usize, DecodeError> {
        self.types.clear();
        trace!("binding session to a byte source");
        self.input.fill_from(source)
    }

    /// Drops the current input and the pass-local type cache.
    pub fn rewind(&mut self) {
        trace!("rewinding session at position {}", self.input.position());
        self.input.reset();
        self.types.clear();
    }

    /// Ends the current pass before the session goes back to its pool.
    ///
    /// Buffers keep their capacity so the next pass can reuse it.
    pub fn release(&mut self) {
        trace!(
            "releasing session, {} types cached in last pass",
            self.types.len()
        );
        self.rewind();
    }

    /// Checks that the next `n` bytes are available.
    #[inline]
    pub fn ensure_available(&self, n: usize) -> Result<(), DecodeError> {
        self.input.ensure_available(n)
    }

    #[inline]
    pub fn read_byte(&mut self) -> Result<i8, DecodeError> {
        self.input.read_byte()
    }

    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        self.input.get_bool()
    }

    #[inline]
    pub fn read_int(&mut self) -> Result<i32, DecodeError> {
        self.input.get_var()
    }

    #[inline]
    pub fn read_long(&mut self) -> Result<i64, DecodeError> {
        self.input.get_var()
    }

    #[inline]
    pub fn read_short(&mut self) -> Result<i16, DecodeError> {
        self.input.get_var()
    }

    /// Reads one UTF-16 code unit.
    #[inline]
    pub fn read_char(&mut self) -> Result<u16, DecodeError> {
        self.input.get_var()
    }

    #[inline]
    pub fn read_float(&mut self) -> Result<f32, DecodeError> {
        self.input.get_float()
    }

    #[inline]
    pub fn read_double(&mut self) -> Result<f64, DecodeError> {
        self.input.get_double()
    }

    /// Reads 4 little-endian bytes without a varint header.
    #[inline]
    pub fn read_plain_int(&mut self) -> Result<i32, DecodeError> {
        self.input.get_plain_int()
    }

    pub fn read_string_utf(&mut self) -> Result<String, DecodeError> {
        self.strings.read_utf(&mut self.input)
    }

    /// Reads a UTF string as raw code units, borrowed until the next call.
    pub fn read_utf16_units(&mut self) -> Result<&[u16], DecodeError> {
        self.strings.read_utf16_units(&mut self.input)
    }

    pub fn read_string_ascii(&mut self) -> Result<String, DecodeError> {
        self.strings.read_ascii(&mut self.input)
    }

    /// Fills `dst` with elements of its kind. The array header and length must already
    /// have been read.
    pub fn read_array_into(&mut self, dst: PrimitiveSliceMut<'_>) -> Result<(), DecodeError> {
        array::read_array_into(&mut self.input, dst)
    }

    pub fn read_primitive_array(
        &mut self,
        kind: ElementKind,
        len: usize,
    ) -> Result<PrimitiveArray, DecodeError> {
        array::read_primitive_array(&mut self.input, kind, len)
    }

    pub fn read_int_array(&mut self, dst: &mut [i32]) -> Result<(), DecodeError> {
        self.input.ensure_available(dst.len())?;
        array::read_int_array(&mut self.input, dst)
    }

    /// Copies `dst.len()` raw bytes and advances past them.
    pub fn read_plain_bytes(&mut self, dst: &mut [u8]) -> Result<(), DecodeError> {
        dst.copy_from_slice(self.input.raw_slice(dst.len())?);
        Ok(())
    }

    /// Reads a type header and resolves it through the registry.
    pub fn read_class_header(&mut self) -> Result<R::Handle, DecodeError> {
        self.registry
            .decode_class(&mut self.types, &mut self.input, &mut self.strings)
    }

    pub fn resolve_type_by_name(&self, name: &str) -> Result<R::Handle, DecodeError> {
        self.registry.class_for_name(name)
    }

    /// Assigns `handle` the next pass-local identifier and returns it.
    pub fn register_type(&mut self, handle: R::Handle) -> usize {
        self.types.register(handle)
    }

    /// The whole bound input, consumed bytes included.
    pub fn raw_bytes(&self) -> &[u8] {
        self.input.raw_bytes()
    }

    #[inline]
    pub fn current_position(&self) -> usize {
        self.input.position()
    }

    /// Unread valid bytes.
    pub fn remaining(&self) -> usize {
        self.input.valid_length() - self.input.position()
    }

    /// Moves to an absolute position, used for back-references.
    pub fn seek(&mut self, position: usize) -> Result<(), DecodeError> {
        self.input.seek(position)
    }

    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.input.skip(n)
    }
}
