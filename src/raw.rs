//! Routines for the fixed-width little-endian payloads that follow an escape header.
//!
//! Callers are responsible for checking that the slice holds the full payload; every
//! function here reads exactly its width from the front of `p` and panics otherwise.

#[inline(always)]
pub(crate) fn le_u16(p: &[u8]) -> u16 {
    u16::from_le_bytes([p[0], p[1]])
}

#[inline(always)]
pub(crate) fn le_i16(p: &[u8]) -> i16 {
    le_u16(p) as i16
}

#[inline(always)]
pub(crate) fn le_i32(p: &[u8]) -> i32 {
    i32::from_le_bytes([p[0], p[1], p[2], p[3]])
}

#[inline(always)]
pub(crate) fn le_i64(p: &[u8]) -> i64 {
    i64::from_le_bytes([p[0], p[1], p[2], p[3], p[4], p[5], p[6], p[7]])
}
