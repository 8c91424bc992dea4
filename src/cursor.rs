use bytes::Buf;

use crate::{DecodeError, ReadAhead};

/// An owned byte buffer with a read position and a valid-length bound.
///
/// `0 <= position <= valid_length <= bytes.len()` holds after every operation. Rebinding
/// replaces the contents wholesale; owned storage is kept so that repeated copy-in cycles
/// stop allocating once the buffer has grown to the largest message seen.
///
/// `CursorBuffer` implements [`Buf`] over the unread valid bytes, so the readers in
/// [`PrimitiveBuf`](crate::PrimitiveBuf) work on it directly.
#[derive(Debug, Default)]
pub struct CursorBuffer {
    bytes: Vec<u8>,
    pos: usize,
    limit: usize,
}

impl CursorBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` bytes of copied input.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            pos: 0,
            limit: 0,
        }
    }

    /// Guarantees the next `n` bytes starting at the cursor are present.
    ///
    /// Every read goes through here, directly or through [`ReadAhead`], before it touches
    /// the storage. With fully materialized input this is a bounds check; a chunked source
    /// would pull more input at this point.
    ///
    /// # Errors
    ///
    /// Returns `TruncatedStream` if fewer than `n` valid bytes remain.
    #[inline(always)]
    pub fn ensure_available(&self, n: usize) -> Result<(), DecodeError> {
        let remaining = self.limit - self.pos;
        if n > remaining {
            Err(DecodeError::truncated(n, remaining))
        } else {
            Ok(())
        }
    }

    /// Returns the byte at the cursor and advances past it.
    #[inline]
    pub fn read_byte(&mut self) -> Result<i8, DecodeError> {
        self.ensure_available(1)?;
        let b = self.bytes[self.pos] as i8;
        self.pos += 1;
        Ok(b)
    }

    /// Returns a view of the next `count` bytes without copying them and advances past
    /// them.
    #[inline]
    pub fn raw_slice(&mut self, count: usize) -> Result<&[u8], DecodeError> {
        self.ensure_available(count)?;
        let start = self.pos;
        self.pos += count;
        Ok(&self.bytes[start..self.pos])
    }

    /// Logically clears the buffer. Storage is retained.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.limit = 0;
    }

    /// Adopts `bytes` as the backing storage without copying, with the first `length`
    /// bytes valid.
    ///
    /// # Errors
    ///
    /// Returns `TruncatedStream` if `length` exceeds `bytes.len()`; the buffer is left
    /// empty in that case.
    pub fn replace_view(&mut self, bytes: Vec<u8>, length: usize) -> Result<(), DecodeError> {
        self.reset();
        if length > bytes.len() {
            return Err(DecodeError::truncated(length, bytes.len()));
        }
        self.bytes = bytes;
        self.limit = length;
        Ok(())
    }

    /// Copies `bytes[offset..offset + length]` into owned storage, growing it if needed.
    ///
    /// # Errors
    ///
    /// Returns `TruncatedStream` if the source range lies outside `bytes`; the buffer is
    /// left empty in that case.
    pub fn replace_copy(
        &mut self,
        bytes: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(), DecodeError> {
        self.reset();
        let src = offset
            .checked_add(length)
            .and_then(|end| bytes.get(offset..end))
            .ok_or_else(|| DecodeError::truncated(length, bytes.len().saturating_sub(offset)))?;
        self.bytes.clear();
        self.bytes.extend_from_slice(src);
        self.limit = length;
        Ok(())
    }

    /// Moves the cursor to an absolute offset, backwards or forwards.
    ///
    /// # Errors
    ///
    /// Returns `TruncatedStream` if `position` is past the end of valid input.
    pub fn seek(&mut self, position: usize) -> Result<(), DecodeError> {
        if position > self.limit {
            return Err(DecodeError::truncated(position, self.limit));
        }
        self.pos = position;
        Ok(())
    }

    /// Moves the cursor forward by `n` bytes without reading them.
    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.ensure_available(n)?;
        self.pos += n;
        Ok(())
    }

    /// Current read offset from the start of the input.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of valid input bytes.
    #[inline]
    pub fn valid_length(&self) -> usize {
        self.limit
    }

    /// The whole valid input, including bytes already consumed.
    #[inline]
    pub fn raw_bytes(&self) -> &[u8] {
        &self.bytes[..self.limit]
    }

    pub(crate) fn storage_mut(&mut self) -> &mut Vec<u8> {
        &mut self.bytes
    }

    pub(crate) fn set_valid_length(&mut self, limit: usize) {
        debug_assert!(limit <= self.bytes.len());
        self.pos = 0;
        self.limit = limit;
    }
}

impl Buf for CursorBuffer {
    #[inline]
    fn remaining(&self) -> usize {
        self.limit - self.pos
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.bytes[self.pos..self.limit]
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.remaining(),
            "cannot advance past the end of valid input: {} > {}",
            cnt,
            self.remaining()
        );
        self.pos += cnt;
    }
}

impl ReadAhead for CursorBuffer {
    #[inline(always)]
    fn ensure_available(&mut self, n: usize) -> Result<(), DecodeError> {
        CursorBuffer::ensure_available(self, n)
    }
}
