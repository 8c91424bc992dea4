use crate::{
    raw, DecodeError, CHAR_ESCAPE, INT_TAG_I16, INT_TAG_I32, LONG_TAG_I64, MAX_CHAR_LEN,
    MAX_INT_LEN, MAX_LONG_LEN,
};

/// Trait for the primitive types that have a variable length wire encoding.
///
/// Each implementation decides from the head byte alone how many payload bytes follow,
/// which is what lets readers bounds check a whole value before consuming any of it.
///
/// | Type  | Scheme                                                      |
/// |-------|-------------------------------------------------------------|
/// | `i32` | head in `-126..=127` is the value, `-128` + 2B, `-127` + 4B |
/// | `i64` | head in `-125..=127` is the value, `-126` adds an 8B tier   |
/// | `u16` | UTF-16 code unit, unsigned head `0..=254`, `255` + 2B       |
/// | `i16` | same layout as `u16`, reinterpreted as signed               |
pub trait VarPrimitive: Sized + Copy {
    /// Worst case encoded length, head byte included.
    const MAX_LEN: usize;

    /// Returns the number of payload bytes that follow `head`.
    fn payload_len(head: u8) -> usize;

    /// Builds the value from `head` and exactly `payload_len(head)` payload bytes.
    fn from_parts(head: u8, payload: &[u8]) -> Self;

    /// Decode a value from the front of `buf` and return it with the number of bytes
    /// consumed.
    ///
    /// # Errors
    ///
    /// Returns `TruncatedStream` if `buf` is empty or ends inside the payload.
    #[inline]
    fn decode_var(buf: &[u8]) -> Result<(Self, usize), DecodeError> {
        let (&head, rest) = buf
            .split_first()
            .ok_or_else(|| DecodeError::truncated(1, 0))?;
        let n = Self::payload_len(head);
        if n > rest.len() {
            return Err(DecodeError::truncated(n + 1, buf.len()));
        }
        Ok((Self::from_parts(head, &rest[..n]), n + 1))
    }
}

impl VarPrimitive for i32 {
    const MAX_LEN: usize = MAX_INT_LEN;

    #[inline(always)]
    fn payload_len(head: u8) -> usize {
        match head as i8 {
            INT_TAG_I16 => 2,
            INT_TAG_I32 => 4,
            _ => 0,
        }
    }

    #[inline(always)]
    fn from_parts(head: u8, payload: &[u8]) -> Self {
        match head as i8 {
            INT_TAG_I16 => raw::le_i16(payload).into(),
            INT_TAG_I32 => raw::le_i32(payload),
            v => v.into(),
        }
    }
}

impl VarPrimitive for i64 {
    const MAX_LEN: usize = MAX_LONG_LEN;

    #[inline(always)]
    fn payload_len(head: u8) -> usize {
        match head as i8 {
            INT_TAG_I16 => 2,
            INT_TAG_I32 => 4,
            LONG_TAG_I64 => 8,
            _ => 0,
        }
    }

    #[inline(always)]
    fn from_parts(head: u8, payload: &[u8]) -> Self {
        match head as i8 {
            INT_TAG_I16 => raw::le_i16(payload).into(),
            INT_TAG_I32 => raw::le_i32(payload).into(),
            LONG_TAG_I64 => raw::le_i64(payload),
            v => v.into(),
        }
    }
}

macro_rules! impl_char_scheme {
    ($int:ty) => {
        impl VarPrimitive for $int {
            const MAX_LEN: usize = MAX_CHAR_LEN;

            #[inline(always)]
            fn payload_len(head: u8) -> usize {
                if head == CHAR_ESCAPE {
                    2
                } else {
                    0
                }
            }

            #[inline(always)]
            fn from_parts(head: u8, payload: &[u8]) -> Self {
                if head == CHAR_ESCAPE {
                    raw::le_u16(payload) as $int
                } else {
                    <$int>::from(head)
                }
            }
        }
    };
}
impl_char_scheme!(u16);
impl_char_scheme!(i16);

#[cfg(test)]
mod tests {
    use super::VarPrimitive;

    #[test]
    fn int_heads() {
        assert_eq!(i32::decode_var(&[0x7f]).unwrap(), (127, 1));
        assert_eq!(i32::decode_var(&[0x82]).unwrap(), (-126, 1));
        assert_eq!(i32::decode_var(&[0x80, 0x10, 0x27]).unwrap(), (10_000, 3));
        assert_eq!(
            i32::decode_var(&[0x81, 0x00, 0x00, 0x00, 0x80]).unwrap(),
            (i32::MIN, 5)
        );
    }

    #[test]
    fn long_reserves_an_extra_sentinel() {
        // -126 is a literal for int but escapes to 8 bytes for long.
        assert_eq!(i32::decode_var(&[0x82]).unwrap(), (-126, 1));
        let mut buf = vec![0x82];
        buf.extend_from_slice(&i64::MAX.to_le_bytes());
        assert_eq!(i64::decode_var(&buf).unwrap(), (i64::MAX, 9));
        assert_eq!(i64::decode_var(&[0x83]).unwrap(), (-125, 1));
    }

    #[test]
    fn char_and_short_share_layout() {
        assert_eq!(u16::decode_var(&[254]).unwrap(), (254, 1));
        assert_eq!(u16::decode_var(&[255, 0x3d, 0xd8]).unwrap(), (0xd83d, 3));
        assert_eq!(i16::decode_var(&[255, 0xff, 0xff]).unwrap(), (-1, 3));
        assert_eq!(i16::decode_var(&[200]).unwrap(), (200, 1));
    }

    #[test]
    fn decode_with_trailing_bytes() {
        assert_eq!(i32::decode_var(&[0x05, 0xff, 0xff]).unwrap(), (5, 1));
    }
}
