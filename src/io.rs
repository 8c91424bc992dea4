//! Materializing a `std::io::Read` byte source, and interop with `std::io` errors.
use std::io::{Error, ErrorKind, Read};

use log::trace;

use crate::{CursorBuffer, DecodeError};

impl From<DecodeError> for Error {
    fn from(value: DecodeError) -> Self {
        let kind = match value {
            DecodeError::Io(inner) => return inner,
            DecodeError::TruncatedStream { .. } => ErrorKind::UnexpectedEof,
            _ => ErrorKind::InvalidData,
        };
        Error::new(kind, value)
    }
}

impl CursorBuffer {
    /// Replaces the contents with everything `reader` yields until end of stream and
    /// returns the number of valid bytes.
    ///
    /// Owned storage is reused. The whole message is read before decoding starts, so
    /// later reads never block.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Io` if the source fails; the buffer is left empty.
    pub fn fill_from(&mut self, mut reader: impl Read) -> Result<usize, DecodeError> {
        self.reset();
        let storage = self.storage_mut();
        storage.clear();
        if let Err(err) = reader.read_to_end(storage) {
            storage.clear();
            return Err(err.into());
        }
        let len = storage.len();
        self.set_valid_length(len);
        trace!("materialized {len} bytes from source");
        Ok(len)
    }
}
