//! Primitive array decoding.
//!
//! The element count and array header are decoded by the caller; this module only fills
//! the elements. Object arrays never come through here.

use std::fmt;

use crate::{DecodeError, PrimitiveBuf, ReadAhead};

/// The closed set of primitive element kinds an array can hold.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ElementKind {
    Byte,
    Char,
    Short,
    Int,
    Float,
    Double,
    Long,
    Boolean,
}

impl ElementKind {
    pub const ALL: [ElementKind; 8] = [
        ElementKind::Byte,
        ElementKind::Char,
        ElementKind::Short,
        ElementKind::Int,
        ElementKind::Float,
        ElementKind::Double,
        ElementKind::Long,
        ElementKind::Boolean,
    ];

    /// The primitive type name as the encoder's type registry spells it.
    pub fn type_name(self) -> &'static str {
        match self {
            ElementKind::Byte => "byte",
            ElementKind::Char => "char",
            ElementKind::Short => "short",
            ElementKind::Int => "int",
            ElementKind::Float => "float",
            ElementKind::Double => "double",
            ElementKind::Long => "long",
            ElementKind::Boolean => "boolean",
        }
    }

    /// Looks up a kind by primitive type name.
    ///
    /// # Errors
    ///
    /// `UnsupportedElementKind` for anything that is not one of the 8 primitive names.
    pub fn from_type_name(name: &str) -> Result<Self, DecodeError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.type_name() == name)
            .ok_or_else(|| DecodeError::UnsupportedElementKind(name.to_owned()))
    }
}

impl TryFrom<&str> for ElementKind {
    type Error = DecodeError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::from_type_name(name)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A decoded primitive array.
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveArray {
    Byte(Vec<u8>),
    Char(Vec<u16>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Long(Vec<i64>),
    Boolean(Vec<bool>),
}

impl PrimitiveArray {
    /// A zero filled array of `len` elements of `kind`.
    pub fn zeroed(kind: ElementKind, len: usize) -> Self {
        match kind {
            ElementKind::Byte => PrimitiveArray::Byte(vec![0; len]),
            ElementKind::Char => PrimitiveArray::Char(vec![0; len]),
            ElementKind::Short => PrimitiveArray::Short(vec![0; len]),
            ElementKind::Int => PrimitiveArray::Int(vec![0; len]),
            ElementKind::Float => PrimitiveArray::Float(vec![0.0; len]),
            ElementKind::Double => PrimitiveArray::Double(vec![0.0; len]),
            ElementKind::Long => PrimitiveArray::Long(vec![0; len]),
            ElementKind::Boolean => PrimitiveArray::Boolean(vec![false; len]),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            PrimitiveArray::Byte(_) => ElementKind::Byte,
            PrimitiveArray::Char(_) => ElementKind::Char,
            PrimitiveArray::Short(_) => ElementKind::Short,
            PrimitiveArray::Int(_) => ElementKind::Int,
            PrimitiveArray::Float(_) => ElementKind::Float,
            PrimitiveArray::Double(_) => ElementKind::Double,
            PrimitiveArray::Long(_) => ElementKind::Long,
            PrimitiveArray::Boolean(_) => ElementKind::Boolean,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PrimitiveArray::Byte(v) => v.len(),
            PrimitiveArray::Char(v) => v.len(),
            PrimitiveArray::Short(v) => v.len(),
            PrimitiveArray::Int(v) => v.len(),
            PrimitiveArray::Float(v) => v.len(),
            PrimitiveArray::Double(v) => v.len(),
            PrimitiveArray::Long(v) => v.len(),
            PrimitiveArray::Boolean(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows the elements as a destination for [`read_array_into`].
    pub fn as_slice_mut(&mut self) -> PrimitiveSliceMut<'_> {
        match self {
            PrimitiveArray::Byte(v) => PrimitiveSliceMut::Byte(v),
            PrimitiveArray::Char(v) => PrimitiveSliceMut::Char(v),
            PrimitiveArray::Short(v) => PrimitiveSliceMut::Short(v),
            PrimitiveArray::Int(v) => PrimitiveSliceMut::Int(v),
            PrimitiveArray::Float(v) => PrimitiveSliceMut::Float(v),
            PrimitiveArray::Double(v) => PrimitiveSliceMut::Double(v),
            PrimitiveArray::Long(v) => PrimitiveSliceMut::Long(v),
            PrimitiveArray::Boolean(v) => PrimitiveSliceMut::Boolean(v),
        }
    }
}

/// A caller owned destination already sized to the element count.
#[derive(Debug)]
pub enum PrimitiveSliceMut<'a> {
    Byte(&'a mut [u8]),
    Char(&'a mut [u16]),
    Short(&'a mut [i16]),
    Int(&'a mut [i32]),
    Float(&'a mut [f32]),
    Double(&'a mut [f64]),
    Long(&'a mut [i64]),
    Boolean(&'a mut [bool]),
}

impl PrimitiveSliceMut<'_> {
    pub fn len(&self) -> usize {
        match self {
            PrimitiveSliceMut::Byte(v) => v.len(),
            PrimitiveSliceMut::Char(v) => v.len(),
            PrimitiveSliceMut::Short(v) => v.len(),
            PrimitiveSliceMut::Int(v) => v.len(),
            PrimitiveSliceMut::Float(v) => v.len(),
            PrimitiveSliceMut::Double(v) => v.len(),
            PrimitiveSliceMut::Long(v) => v.len(),
            PrimitiveSliceMut::Boolean(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads `dst.len()` varint ints.
#[inline]
pub fn read_int_array<B: ReadAhead>(buf: &mut B, dst: &mut [i32]) -> Result<(), DecodeError> {
    for v in dst.iter_mut() {
        *v = buf.get_var::<i32>()?;
    }
    Ok(())
}

/// Copies `dst.len()` raw bytes.
#[inline]
pub fn read_byte_array<B: ReadAhead>(buf: &mut B, dst: &mut [u8]) -> Result<(), DecodeError> {
    buf.ensure_available(dst.len())?;
    buf.copy_to_slice(dst);
    Ok(())
}

/// Fills every element of `dst` from `buf`, dispatching once on the element kind.
///
/// Every element occupies at least one byte, so input shorter than the element count
/// fails before any element is decoded.
pub fn read_array_into<B: ReadAhead>(
    buf: &mut B,
    dst: PrimitiveSliceMut<'_>,
) -> Result<(), DecodeError> {
    buf.ensure_available(dst.len())?;
    match dst {
        PrimitiveSliceMut::Byte(arr) => read_byte_array(buf, arr)?,
        PrimitiveSliceMut::Int(arr) => read_int_array(buf, arr)?,
        PrimitiveSliceMut::Char(arr) => {
            for v in arr.iter_mut() {
                *v = buf.get_var::<u16>()?;
            }
        }
        PrimitiveSliceMut::Short(arr) => {
            for v in arr.iter_mut() {
                *v = buf.get_var::<i16>()?;
            }
        }
        PrimitiveSliceMut::Float(arr) => {
            for v in arr.iter_mut() {
                *v = buf.get_float()?;
            }
        }
        PrimitiveSliceMut::Double(arr) => {
            for v in arr.iter_mut() {
                *v = buf.get_double()?;
            }
        }
        PrimitiveSliceMut::Long(arr) => {
            for v in arr.iter_mut() {
                *v = buf.get_var::<i64>()?;
            }
        }
        PrimitiveSliceMut::Boolean(arr) => {
            for v in arr.iter_mut() {
                *v = buf.get_bool()?;
            }
        }
    }
    Ok(())
}

/// Allocates an array of `len` elements of `kind` and fills it from `buf`.
pub fn read_primitive_array<B: ReadAhead>(
    buf: &mut B,
    kind: ElementKind,
    len: usize,
) -> Result<PrimitiveArray, DecodeError> {
    buf.ensure_available(len)?;
    let mut arr = PrimitiveArray::zeroed(kind, len);
    read_array_into(buf, arr.as_slice_mut())?;
    Ok(arr)
}
