//! Decoder for a compact binary object-serialization format.
//!
//! The format favours single byte encodings for the small values that dominate object
//! field data. A header byte either is the value or is an escape saying how many
//! little-endian bytes follow:
//!
//! | Encoding    | Literal head range       | Escapes                                   |
//! |-------------|--------------------------|-------------------------------------------|
//! | int         | `-126..=127` (signed)    | `-128` + 2 bytes, `-127` + 4 bytes        |
//! | long        | `-125..=127` (signed)    | `-128` + 2, `-127` + 4, `-126` + 8 bytes  |
//! | char, short | `0..=254` (unsigned)     | `255` + 2 bytes                           |
//!
//! Floats and doubles are their raw IEEE-754 bit patterns, 4 and 8 bytes little-endian.
//! Strings come in two flavours: a varint count of UTF-16 code units followed by one varint
//! char per unit, and short single byte strings with a one byte length below 127.
//!
//! [`VarPrimitive`] decodes the varint schemes from slices and [`PrimitiveBuf`] extends any
//! `bytes::Buf` implementing [`ReadAhead`] with every primitive read. Reads ask
//! [`ReadAhead::ensure_available`] for their bytes before consuming them. [`DecoderSession`] ties a reusable
//! [`CursorBuffer`], string scratch space and the pass-local [`TypeCache`] together behind
//! the read contract used by an object graph decoder, and [`SessionPool`] recycles
//! sessions between messages.
//!
//! ```
//! use bytes::Buf;
//! use fst_decode::PrimitiveBuf;
//!
//! // 100 as a literal, 70000 behind the 4 byte escape, then a long behind the 2 byte one.
//! let encoded = [0x64, 0x81, 0x70, 0x11, 0x01, 0x00, 0x80, 0x18, 0xfc];
//! let mut buf = &encoded[..];
//! assert_eq!(buf.get_var::<i32>().unwrap(), 100);
//! assert_eq!(buf.get_var::<i32>().unwrap(), 70_000);
//! assert_eq!(buf.get_var::<i64>().unwrap(), -1000);
//! assert!(!buf.has_remaining());
//! ```
pub mod array;
mod bytes;
pub(crate) mod core;
mod cursor;
mod error;
mod io;
mod pool;
mod raw;
mod registry;
mod session;
mod string;

pub use crate::array::{ElementKind, PrimitiveArray, PrimitiveSliceMut};
pub use crate::bytes::{PrimitiveBuf, ReadAhead};
pub use crate::core::VarPrimitive;
pub use crate::cursor::CursorBuffer;
pub use crate::error::{DecodeError, TypeRef};
pub use crate::pool::{SessionConfig, SessionPool};
pub use crate::registry::{NamedTypeRegistry, TypeCache, TypeRegistry, TYPE_TAG_NAME};
pub use crate::session::DecoderSession;
pub use crate::string::StringScratch;

/// Maximum number of bytes a single encoded int will occupy.
pub const MAX_INT_LEN: usize = 5;

/// Maximum number of bytes a single encoded long will occupy.
pub const MAX_LONG_LEN: usize = 9;

/// Maximum number of bytes a single encoded char or short will occupy.
pub const MAX_CHAR_LEN: usize = 3;

/// Longest string the single byte string encoding can carry.
pub const MAX_ASCII_LEN: i8 = 126;

/// Int and long head announcing a 2 byte payload.
pub(crate) const INT_TAG_I16: i8 = -128;
/// Int and long head announcing a 4 byte payload.
pub(crate) const INT_TAG_I32: i8 = -127;
/// Long head announcing an 8 byte payload.
pub(crate) const LONG_TAG_I64: i8 = -126;
/// Char and short head announcing a 2 byte payload.
pub(crate) const CHAR_ESCAPE: u8 = u8::MAX;
