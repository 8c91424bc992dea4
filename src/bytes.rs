//! Extension trait that reads the wire primitives from any `bytes::Buf`.

use crate::{DecodeError, VarPrimitive};

use bytes::buf::Chain;
use bytes::{Buf, Bytes, BytesMut};

/// A `Buf` that is asked for input before every read.
///
/// Readers call [`ensure_available`](Self::ensure_available) with the number of bytes
/// they are about to consume and only touch the buffer once it has succeeded. This is
/// the one place a source that arrives in pieces can pull more input. Fully
/// materialized buffers use the provided bounds check.
pub trait ReadAhead: Buf {
    /// Guarantees that at least `n` bytes remain.
    ///
    /// # Errors
    ///
    /// Returns `TruncatedStream` if fewer than `n` bytes are, or can be made, available.
    #[inline(always)]
    fn ensure_available(&mut self, n: usize) -> Result<(), DecodeError> {
        if self.remaining() < n {
            Err(DecodeError::truncated(n, self.remaining()))
        } else {
            Ok(())
        }
    }
}

impl ReadAhead for &[u8] {}
impl ReadAhead for Bytes {}
impl ReadAhead for BytesMut {}
impl<T: Buf, U: Buf> ReadAhead for Chain<T, U> {}

impl<T: ReadAhead + ?Sized> ReadAhead for &mut T {
    #[inline(always)]
    fn ensure_available(&mut self, n: usize) -> Result<(), DecodeError> {
        (**self).ensure_available(n)
    }
}

fn get_var_slow<B: ReadAhead, V: VarPrimitive>(
    head: u8,
    n: usize,
    buf: &mut B,
) -> Result<V, DecodeError> {
    buf.advance(1);
    let mut payload = [0u8; 8];
    buf.copy_to_slice(&mut payload[..n]);
    Ok(V::from_parts(head, &payload[..n]))
}

/// Extension for `bytes::Buf` to read the primitive wire encodings.
///
/// Every read asks [`ReadAhead::ensure_available`] for the whole value before consuming
/// anything, so a failed read leaves the buffer where it was.
pub trait PrimitiveBuf {
    /// Reads a variable length value. After a successful read the buffer is advanced by
    /// the number of bytes the value occupied.
    ///
    /// # Examples
    ///
    /// ```
    /// use fst_decode::PrimitiveBuf;
    ///
    /// let encoded = [0x07, 0x80, 0x10, 0x27, 0xff, 0x3d, 0xd8];
    /// let mut buf = &encoded[..];
    /// assert_eq!(buf.get_var::<i32>().unwrap(), 7);
    /// assert_eq!(buf.get_var::<i32>().unwrap(), 10_000);
    /// assert_eq!(buf.get_var::<u16>().unwrap(), 0xd83d);
    /// assert!(buf.is_empty());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `TruncatedStream` if the buffer is empty or too short to hold the full
    /// encoded value.
    fn get_var<V: VarPrimitive>(&mut self) -> Result<V, DecodeError>;

    /// Reads one signed byte.
    fn get_byte(&mut self) -> Result<i8, DecodeError>;

    /// Reads one byte as a boolean, `0` is false and anything else true.
    fn get_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.get_byte()? != 0)
    }

    /// Reads 4 little-endian bytes without a header.
    fn get_plain_int(&mut self) -> Result<i32, DecodeError>;

    /// Reads 8 little-endian bytes without a header.
    fn get_plain_long(&mut self) -> Result<i64, DecodeError>;

    /// Reads an IEEE-754 single from its 4 byte little-endian bit pattern.
    fn get_float(&mut self) -> Result<f32, DecodeError> {
        Ok(f32::from_bits(self.get_plain_int()? as u32))
    }

    /// Reads an IEEE-754 double from its 8 byte little-endian bit pattern.
    fn get_double(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(self.get_plain_long()? as u64))
    }
}

impl<Inner: ReadAhead> PrimitiveBuf for Inner {
    #[inline]
    fn get_var<V: VarPrimitive>(&mut self) -> Result<V, DecodeError> {
        self.ensure_available(1)?;
        let head = self.chunk()[0];
        let n = V::payload_len(head);
        if n == 0 {
            self.advance(1);
            return Ok(V::from_parts(head, &[]));
        }

        self.ensure_available(n + 1)?;
        let chunk = self.chunk();
        if chunk.len() > n {
            // Header and payload are contiguous.
            let v = V::from_parts(head, &chunk[1..=n]);
            self.advance(n + 1);
            Ok(v)
        } else {
            get_var_slow(head, n, self)
        }
    }

    #[inline]
    fn get_byte(&mut self) -> Result<i8, DecodeError> {
        self.ensure_available(1)?;
        Ok(self.get_i8())
    }

    #[inline]
    fn get_plain_int(&mut self) -> Result<i32, DecodeError> {
        self.ensure_available(4)?;
        Ok(self.get_i32_le())
    }

    #[inline]
    fn get_plain_long(&mut self) -> Result<i64, DecodeError> {
        self.ensure_available(8)?;
        Ok(self.get_i64_le())
    }
}
