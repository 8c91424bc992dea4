use std::fmt;

/// Identifier that a type header or lookup failed to resolve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeRef {
    /// A fully qualified type name.
    Name(String),
    /// A pass-local identifier that was never assigned in this decode pass.
    Id(u16),
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Name(name) => write!(f, "name `{name}`"),
            TypeRef::Id(id) => write!(f, "id {id}"),
        }
    }
}

/// Errors that may occur while decoding.
///
/// Every failure aborts the message being decoded. The session that produced it must be
/// rebound or rewound before it decodes anything else.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A read needed more bytes than remain before the end of valid input.
    #[error("truncated stream: needed {needed} bytes, {remaining} remaining")]
    TruncatedStream { needed: usize, remaining: usize },

    /// An array decode was requested for something other than the 8 primitive kinds.
    #[error("unsupported array element kind {0}")]
    UnsupportedElementKind(String),

    /// The type registry could not resolve a type header or name.
    #[error("cannot resolve type {0}")]
    ClassResolution(TypeRef),

    /// ASCII string header outside `0..127`.
    #[error("malformed ascii string length {0}")]
    MalformedAsciiLength(i8),

    /// UTF string header with a negative code unit count.
    #[error("malformed utf string length {0}")]
    MalformedStringLength(i32),

    /// Decoded code units are not well-formed UTF-16.
    #[error("string is not valid utf-16")]
    InvalidUtf16,

    /// The byte source failed while the input was being materialized.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    #[inline(never)]
    #[cold]
    pub(crate) fn truncated(needed: usize, remaining: usize) -> Self {
        DecodeError::TruncatedStream { needed, remaining }
    }
}
