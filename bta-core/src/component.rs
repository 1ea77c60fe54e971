//! Component type enumeration.
//!
//! Every element of an array is a fixed-size record of typed components.
//! The type set is closed: integers from 8 to 128 bits in both signednesses,
//! IEEE floats and complex floats at 32/64/128 bits, and an opaque blob with
//! an explicit byte width.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Component types storable in an array element.
///
/// All widths are fixed except [`Type::Blob`], which carries its own byte
/// size. Complex types are two interleaved real slots of the same base width,
/// so `Cfloat32` occupies 8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// 8-bit signed integer (i8)
    Int8,
    /// 8-bit unsigned integer (u8)
    Uint8,
    /// 16-bit signed integer (i16)
    Int16,
    /// 16-bit unsigned integer (u16)
    Uint16,
    /// 32-bit signed integer (i32)
    Int32,
    /// 32-bit unsigned integer (u32)
    Uint32,
    /// 64-bit signed integer (i64)
    Int64,
    /// 64-bit unsigned integer (u64)
    Uint64,
    /// 128-bit signed integer
    Int128,
    /// 128-bit unsigned integer
    Uint128,
    /// IEEE 754 binary32 float (f32)
    Float32,
    /// IEEE 754 binary64 float (f64)
    Float64,
    /// IEEE 754 binary128 float (no native Rust equivalent)
    Float128,
    /// Complex of two binary32 floats, real slot first
    Cfloat32,
    /// Complex of two binary64 floats, real slot first
    Cfloat64,
    /// Complex of two binary128 floats, real slot first
    Cfloat128,
    /// Opaque bytes of a fixed, caller-chosen width
    Blob {
        /// Byte width of the blob. Must be greater than zero.
        size: u64,
    },
}

/// Wire tag byte of the blob type, which is followed by an explicit size.
pub(crate) const BLOB_TAG: u8 = 0x11;

/// Classification of a component type, used for operation dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// Two's-complement signed integer.
    SignedInt,
    /// Unsigned integer.
    UnsignedInt,
    /// IEEE real float.
    Float,
    /// IEEE complex float (two interleaved real slots).
    ComplexFloat,
    /// Opaque bytes with no numeric interpretation.
    Opaque,
}

impl Type {
    /// Byte width of one component of this type.
    pub const fn width(&self) -> u64 {
        match self {
            Type::Int8 | Type::Uint8 => 1,
            Type::Int16 | Type::Uint16 => 2,
            Type::Int32 | Type::Uint32 | Type::Float32 => 4,
            Type::Int64 | Type::Uint64 | Type::Float64 | Type::Cfloat32 => 8,
            Type::Int128 | Type::Uint128 | Type::Float128 | Type::Cfloat64 => 16,
            Type::Cfloat128 => 32,
            Type::Blob { size } => *size,
        }
    }

    /// Classification of this type.
    pub const fn class(&self) -> Class {
        match self {
            Type::Int8 | Type::Int16 | Type::Int32 | Type::Int64 | Type::Int128 => {
                Class::SignedInt
            }
            Type::Uint8 | Type::Uint16 | Type::Uint32 | Type::Uint64 | Type::Uint128 => {
                Class::UnsignedInt
            }
            Type::Float32 | Type::Float64 | Type::Float128 => Class::Float,
            Type::Cfloat32 | Type::Cfloat64 | Type::Cfloat128 => Class::ComplexFloat,
            Type::Blob { .. } => Class::Opaque,
        }
    }

    /// Check if this type carries numeric values.
    ///
    /// False only for [`Type::Blob`]. Note that arithmetic *support* is
    /// narrower than this predicate: operations on 128-bit and complex
    /// components are rejected by the commands that cannot express them.
    pub const fn is_arithmetic(&self) -> bool {
        !matches!(self, Type::Blob { .. })
    }

    /// Wire tag byte for this type.
    pub(crate) const fn tag(&self) -> u8 {
        match self {
            Type::Int8 => 0x01,
            Type::Uint8 => 0x02,
            Type::Int16 => 0x03,
            Type::Uint16 => 0x04,
            Type::Int32 => 0x05,
            Type::Uint32 => 0x06,
            Type::Int64 => 0x07,
            Type::Uint64 => 0x08,
            Type::Int128 => 0x09,
            Type::Uint128 => 0x0A,
            Type::Float32 => 0x0B,
            Type::Float64 => 0x0C,
            Type::Float128 => 0x0D,
            Type::Cfloat32 => 0x0E,
            Type::Cfloat64 => 0x0F,
            Type::Cfloat128 => 0x10,
            Type::Blob { .. } => BLOB_TAG,
        }
    }

    /// Reconstruct a type from its wire tag byte.
    ///
    /// `blob_size` is consulted only for the blob tag; it must be greater
    /// than zero.
    pub(crate) fn from_tag(tag: u8, blob_size: u64) -> Result<Self> {
        Ok(match tag {
            0x01 => Type::Int8,
            0x02 => Type::Uint8,
            0x03 => Type::Int16,
            0x04 => Type::Uint16,
            0x05 => Type::Int32,
            0x06 => Type::Uint32,
            0x07 => Type::Int64,
            0x08 => Type::Uint64,
            0x09 => Type::Int128,
            0x0A => Type::Uint128,
            0x0B => Type::Float32,
            0x0C => Type::Float64,
            0x0D => Type::Float128,
            0x0E => Type::Cfloat32,
            0x0F => Type::Cfloat64,
            0x10 => Type::Cfloat128,
            BLOB_TAG => {
                if blob_size == 0 {
                    return Err(Error::invalid_format("blob component with zero size"));
                }
                Type::Blob { size: blob_size }
            }
            _ => {
                return Err(Error::invalid_format(format!(
                    "unknown component type tag 0x{tag:02X}"
                )));
            }
        })
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int8 => write!(f, "int8"),
            Type::Uint8 => write!(f, "uint8"),
            Type::Int16 => write!(f, "int16"),
            Type::Uint16 => write!(f, "uint16"),
            Type::Int32 => write!(f, "int32"),
            Type::Uint32 => write!(f, "uint32"),
            Type::Int64 => write!(f, "int64"),
            Type::Uint64 => write!(f, "uint64"),
            Type::Int128 => write!(f, "int128"),
            Type::Uint128 => write!(f, "uint128"),
            Type::Float32 => write!(f, "float32"),
            Type::Float64 => write!(f, "float64"),
            Type::Float128 => write!(f, "float128"),
            Type::Cfloat32 => write!(f, "cfloat32"),
            Type::Cfloat64 => write!(f, "cfloat64"),
            Type::Cfloat128 => write!(f, "cfloat128"),
            Type::Blob { size } => write!(f, "blob:{size}"),
        }
    }
}

impl FromStr for Type {
    type Err = Error;

    /// Parse a canonical type spelling such as `uint8`, `cfloat64`, or
    /// `blob:16`.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(size) = s.strip_prefix("blob:") {
            let size: u64 = size
                .parse()
                .map_err(|_| Error::invalid_format(format!("invalid blob size in '{s}'")))?;
            if size == 0 {
                return Err(Error::invalid_format("blob component with zero size"));
            }
            return Ok(Type::Blob { size });
        }
        Ok(match s {
            "int8" => Type::Int8,
            "uint8" => Type::Uint8,
            "int16" => Type::Int16,
            "uint16" => Type::Uint16,
            "int32" => Type::Int32,
            "uint32" => Type::Uint32,
            "int64" => Type::Int64,
            "uint64" => Type::Uint64,
            "int128" => Type::Int128,
            "uint128" => Type::Uint128,
            "float32" => Type::Float32,
            "float64" => Type::Float64,
            "float128" => Type::Float128,
            "cfloat32" => Type::Cfloat32,
            "cfloat64" => Type::Cfloat64,
            "cfloat128" => Type::Cfloat128,
            _ => return Err(Error::invalid_format(format!("unknown component type '{s}'"))),
        })
    }
}
