//! String decoders and the scratch buffers they reuse between calls.

use crate::{DecodeError, PrimitiveBuf, ReadAhead, MAX_ASCII_LEN};

const MIN_SCRATCH: usize = 16;

/// Grows `v` to hold at least `n` elements. Never shrinks.
fn grow_to<T: Copy + Default>(v: &mut Vec<T>, n: usize) {
    if v.len() < n {
        v.resize(n.max(MIN_SCRATCH), T::default());
    }
}

/// Reusable buffers for string decoding.
///
/// Both buffers only grow, so after the longest string of a workload has been seen no
/// further allocation happens apart from the returned `String` itself.
#[derive(Debug, Default)]
pub struct StringScratch {
    chars: Vec<u16>,
    ascii: Vec<u8>,
}

impl StringScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates scratch space pre-sized for strings of `chars` code units.
    pub fn with_capacity(chars: usize) -> Self {
        let mut scratch = Self::default();
        grow_to(&mut scratch.chars, chars);
        scratch
    }

    /// Reads a varint length followed by that many varint code units and returns them.
    ///
    /// Surrogates are returned exactly as encoded, paired or not. The slice borrows the
    /// scratch buffer and is only valid until the next call.
    pub fn read_utf16_units<B: ReadAhead>(&mut self, buf: &mut B) -> Result<&[u16], DecodeError> {
        let len = buf.get_var::<i32>()?;
        let len = usize::try_from(len).map_err(|_| DecodeError::MalformedStringLength(len))?;
        // Every code unit takes at least one byte, so a longer header cannot be satisfied.
        buf.ensure_available(len)?;
        grow_to(&mut self.chars, len);
        for unit in &mut self.chars[..len] {
            *unit = buf.get_var::<u16>()?;
        }
        Ok(&self.chars[..len])
    }

    /// Reads a UTF-16 code unit string as a `String`.
    ///
    /// # Errors
    ///
    /// `InvalidUtf16` if the code units contain an unpaired surrogate, plus anything
    /// [`read_utf16_units`](Self::read_utf16_units) returns.
    pub fn read_utf<B: ReadAhead>(&mut self, buf: &mut B) -> Result<String, DecodeError> {
        let units = self.read_utf16_units(buf)?;
        String::from_utf16(units).map_err(|_| DecodeError::InvalidUtf16)
    }

    /// Reads a one byte length followed by that many single byte characters.
    ///
    /// Bytes are mapped one to one onto `U+0000..=U+00FF`.
    ///
    /// # Errors
    ///
    /// `MalformedAsciiLength` if the length byte is negative or above 126.
    pub fn read_ascii<B: ReadAhead>(&mut self, buf: &mut B) -> Result<String, DecodeError> {
        let len = buf.get_byte()?;
        if !(0..=MAX_ASCII_LEN).contains(&len) {
            return Err(DecodeError::MalformedAsciiLength(len));
        }
        let len = len as usize;
        buf.ensure_available(len)?;
        grow_to(&mut self.ascii, len);
        let dst = &mut self.ascii[..len];
        buf.copy_to_slice(dst);
        Ok(dst.iter().copied().map(char::from).collect())
    }

    /// Current size of the code unit scratch buffer.
    pub fn char_capacity(&self) -> usize {
        self.chars.len()
    }

    /// Current size of the single byte scratch buffer.
    pub fn ascii_capacity(&self) -> usize {
        self.ascii.len()
    }
}

#[cfg(test)]
mod tests {
    use super::StringScratch;
    use crate::DecodeError;

    #[test]
    fn latin1_bytes_map_to_code_points() {
        let mut scratch = StringScratch::new();
        let mut buf = &[3u8, b'a', 0xe9, b'z'][..];
        assert_eq!(scratch.read_ascii(&mut buf).unwrap(), "a\u{e9}z");
    }

    #[test]
    fn scratch_never_shrinks() {
        let mut scratch = StringScratch::new();
        let mut long = vec![40u8];
        long.extend(std::iter::repeat(b'x').take(40));
        scratch.read_ascii(&mut long.as_slice()).unwrap();
        assert_eq!(scratch.ascii_capacity(), 40);
        scratch.read_ascii(&mut &[1u8, b'y'][..]).unwrap();
        assert_eq!(scratch.ascii_capacity(), 40);
    }

    #[test]
    fn negative_lengths_rejected() {
        let mut scratch = StringScratch::new();
        assert!(matches!(
            scratch.read_ascii(&mut &[0xffu8][..]),
            Err(DecodeError::MalformedAsciiLength(-1))
        ));
        assert!(matches!(
            scratch.read_utf(&mut &[0xffu8][..]),
            Err(DecodeError::MalformedStringLength(-1))
        ));
    }

    #[test]
    fn unpaired_surrogate() {
        let mut scratch = StringScratch::new();
        let encoded = [1u8, 255, 0x00, 0xd8];
        assert_eq!(
            scratch.read_utf16_units(&mut &encoded[..]).unwrap(),
            &[0xd800]
        );
        assert!(matches!(
            scratch.read_utf(&mut &encoded[..]),
            Err(DecodeError::InvalidUtf16)
        ));
    }

    #[test]
    fn oversized_header_fails_before_allocating() {
        let mut scratch = StringScratch::new();
        let encoded = [0x81u8, 0xff, 0xff, 0xff, 0x7f, b'a'];
        assert!(matches!(
            scratch.read_utf(&mut &encoded[..]),
            Err(DecodeError::TruncatedStream { .. })
        ));
        assert_eq!(scratch.char_capacity(), 0);
    }
}
