//! Typed access to component bytes.
//!
//! Commands that transform values need to get native scalars out of raw
//! little-endian component bytes and back. [`Scalar`] does that for the ten
//! arithmetic widths; [`Value`] widens any arithmetic component losslessly
//! (integers into i128, floats into f64) so a single pair of
//! [`decode`]/[`encode`] calls can retype a component without a 10×10
//! conversion matrix.

use bta_core::Type;

use crate::error::{Error, Result};

/// Native scalar that maps to a fixed-width arithmetic component.
///
/// Bytes are little-endian, matching the container's payload encoding.
pub trait Scalar: Copy {
    /// Byte width of one value.
    const WIDTH: usize;

    /// Decode a value from the first `WIDTH` bytes.
    ///
    /// Named to stay clear of the inherent `from_le` on the integer
    /// primitives, which takes `self` and wins path-syntax resolution.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than `WIDTH`.
    fn get_le(bytes: &[u8]) -> Self;

    /// Encode this value into the first `WIDTH` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `WIDTH`.
    fn put_le(self, out: &mut [u8]);

    /// Lossless widening into the i128/f64 carrier.
    fn widen(self) -> Value;

    /// Narrow an integer carrier value, `None` if out of range.
    fn from_i128(value: i128) -> Option<Self>;

    /// Narrow a float carrier value with native rounding/saturation.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_scalar_int {
    ($($t:ty),* $(,)?) => {$(
        impl Scalar for $t {
            const WIDTH: usize = size_of::<$t>();

            fn get_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; size_of::<$t>()];
                buf.copy_from_slice(&bytes[..Self::WIDTH]);
                <$t>::from_le_bytes(buf)
            }

            fn put_le(self, out: &mut [u8]) {
                out[..Self::WIDTH].copy_from_slice(&self.to_le_bytes());
            }

            fn widen(self) -> Value {
                Value::Int(self as i128)
            }

            fn from_i128(value: i128) -> Option<Self> {
                <$t>::try_from(value).ok()
            }

            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

macro_rules! impl_scalar_float {
    ($($t:ty),* $(,)?) => {$(
        impl Scalar for $t {
            const WIDTH: usize = size_of::<$t>();

            fn get_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; size_of::<$t>()];
                buf.copy_from_slice(&bytes[..Self::WIDTH]);
                <$t>::from_le_bytes(buf)
            }

            fn put_le(self, out: &mut [u8]) {
                out[..Self::WIDTH].copy_from_slice(&self.to_le_bytes());
            }

            fn widen(self) -> Value {
                Value::Float(self as f64)
            }

            fn from_i128(value: i128) -> Option<Self> {
                Some(value as $t)
            }

            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

impl_scalar_int!(i8, u8, i16, u16, i32, u32, i64, u64);
impl_scalar_float!(f32, f64);

/// One component value widened to a lossless carrier.
///
/// Integers up to 64 bits fit exactly in `Int`; both float widths fit
/// exactly in `Float`; complex components carry their two real slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Any integer component value, exactly.
    Int(i128),
    /// Any real float component value, exactly.
    Float(f64),
    /// A complex component value as (real, imaginary).
    Complex(f64, f64),
}

impl Value {
    /// Real numeric view for accumulation: integers round to the nearest
    /// f64, complex values have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Complex(..) => None,
        }
    }
}

/// Decode the component bytes of type `ty` into a widened [`Value`].
///
/// # Errors
///
/// [`Error::Usage`] for types the engine cannot compute with (128-bit
/// integers and floats, 128-bit complex, blobs).
pub fn decode(ty: Type, bytes: &[u8]) -> Result<Value> {
    Ok(match ty {
        Type::Int8 => i8::get_le(bytes).widen(),
        Type::Uint8 => u8::get_le(bytes).widen(),
        Type::Int16 => i16::get_le(bytes).widen(),
        Type::Uint16 => u16::get_le(bytes).widen(),
        Type::Int32 => i32::get_le(bytes).widen(),
        Type::Uint32 => u32::get_le(bytes).widen(),
        Type::Int64 => i64::get_le(bytes).widen(),
        Type::Uint64 => u64::get_le(bytes).widen(),
        Type::Float32 => f32::get_le(bytes).widen(),
        Type::Float64 => f64::get_le(bytes).widen(),
        Type::Cfloat32 => Value::Complex(
            f32::get_le(&bytes[..4]) as f64,
            f32::get_le(&bytes[4..8]) as f64,
        ),
        Type::Cfloat64 => Value::Complex(f64::get_le(&bytes[..8]), f64::get_le(&bytes[8..16])),
        Type::Int128
        | Type::Uint128
        | Type::Float128
        | Type::Cfloat128
        | Type::Blob { .. } => {
            return Err(unsupported(ty));
        }
    })
}

/// Encode a widened [`Value`] as component bytes of type `ty`.
///
/// Integer targets are overflow-checked against integer carriers; targets or
/// carriers involving floats follow native rounding/saturation and cannot
/// fail. Real values convert to complex targets with a zero imaginary slot;
/// complex values cannot convert to real targets.
///
/// # Errors
///
/// [`Error::Overflow`] when an integer value does not fit the target;
/// [`Error::Usage`] for unsupported targets or complex→real conversions.
pub fn encode(value: Value, ty: Type, out: &mut [u8]) -> Result<()> {
    match ty {
        Type::Int8 => encode_num::<i8>(ty, value, out),
        Type::Uint8 => encode_num::<u8>(ty, value, out),
        Type::Int16 => encode_num::<i16>(ty, value, out),
        Type::Uint16 => encode_num::<u16>(ty, value, out),
        Type::Int32 => encode_num::<i32>(ty, value, out),
        Type::Uint32 => encode_num::<u32>(ty, value, out),
        Type::Int64 => encode_num::<i64>(ty, value, out),
        Type::Uint64 => encode_num::<u64>(ty, value, out),
        Type::Float32 => encode_num::<f32>(ty, value, out),
        Type::Float64 => encode_num::<f64>(ty, value, out),
        Type::Cfloat32 => encode_complex::<f32>(ty, value, out),
        Type::Cfloat64 => encode_complex::<f64>(ty, value, out),
        Type::Int128
        | Type::Uint128
        | Type::Float128
        | Type::Cfloat128
        | Type::Blob { .. } => Err(unsupported(ty)),
    }
}

fn encode_num<T: Scalar>(ty: Type, value: Value, out: &mut [u8]) -> Result<()> {
    match value {
        Value::Int(v) => match T::from_i128(v) {
            Some(x) => {
                x.put_le(out);
                Ok(())
            }
            None => Err(Error::overflow(format!("value {v} does not fit in {ty}"))),
        },
        Value::Float(v) => {
            T::from_f64(v).put_le(out);
            Ok(())
        }
        Value::Complex(..) => Err(Error::usage(format!(
            "cannot convert a complex value to {ty}"
        ))),
    }
}

fn encode_complex<T: Scalar>(_ty: Type, value: Value, out: &mut [u8]) -> Result<()> {
    let (re, im) = match value {
        Value::Int(v) => (v as f64, 0.0),
        Value::Float(v) => (v, 0.0),
        Value::Complex(re, im) => (re, im),
    };
    T::from_f64(re).put_le(&mut out[..T::WIDTH]);
    T::from_f64(im).put_le(&mut out[T::WIDTH..2 * T::WIDTH]);
    Ok(())
}

fn unsupported(ty: Type) -> Error {
    Error::usage(format!("unsupported type {ty}"))
}
