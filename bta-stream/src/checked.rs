//! Overflow-checked arithmetic primitives.
//!
//! The container can encode the same data at many native widths, and a
//! silently wrapped result would be indistinguishable from a legitimate one.
//! Every narrowing or sign-sensitive operation here either returns the exact
//! mathematical result or fails with [`Error::Overflow`].
//!
//! The primitives are generic over the ten arithmetic component widths the
//! engine computes with: `i8..i64`, `u8..u64`, `f32`, `f64`. Float
//! operations follow IEEE semantics (inf/NaN propagate) and never fail.

use std::fmt;

use crate::error::{Error, Result};

/// Scalar with overflow-checked subtraction, negation, and absolute value.
///
/// Implementations return `None` exactly where the mathematical result is
/// not representable in the same type. For unsigned types the absolute value
/// is the identity; for floats nothing ever fails.
pub trait Checked: Copy + PartialOrd + fmt::Display {
    /// Canonical container spelling of this type, used in diagnostics.
    const NAME: &'static str;

    /// `self - rhs` if representable.
    fn checked_sub(self, rhs: Self) -> Option<Self>;

    /// `-self` if representable.
    fn checked_neg(self) -> Option<Self>;

    /// `|self|` if representable.
    fn checked_abs(self) -> Option<Self>;
}

/// Scalar with an infallible absolute difference.
///
/// For unsigned integers this is `max(a,b) - min(a,b)`, which never
/// overflows; for floats it is `|a - b|`. Signed integers deliberately do
/// not implement this: their absolute difference can exceed the type's
/// range, so callers must compose `checked_sub` and `checked_abs` instead.
pub trait AbsDiff: Checked {
    /// Absolute difference of `self` and `rhs`.
    fn abs_diff(self, rhs: Self) -> Self;
}

macro_rules! impl_checked_signed {
    ($($t:ty => $name:literal),* $(,)?) => {$(
        impl Checked for $t {
            const NAME: &'static str = $name;

            fn checked_sub(self, rhs: Self) -> Option<Self> {
                <$t>::checked_sub(self, rhs)
            }

            fn checked_neg(self) -> Option<Self> {
                <$t>::checked_neg(self)
            }

            fn checked_abs(self) -> Option<Self> {
                <$t>::checked_abs(self)
            }
        }
    )*};
}

macro_rules! impl_checked_unsigned {
    ($($t:ty => $name:literal),* $(,)?) => {$(
        impl Checked for $t {
            const NAME: &'static str = $name;

            fn checked_sub(self, rhs: Self) -> Option<Self> {
                <$t>::checked_sub(self, rhs)
            }

            fn checked_neg(self) -> Option<Self> {
                <$t>::checked_neg(self)
            }

            fn checked_abs(self) -> Option<Self> {
                Some(self)
            }
        }

        impl AbsDiff for $t {
            fn abs_diff(self, rhs: Self) -> Self {
                <$t>::abs_diff(self, rhs)
            }
        }
    )*};
}

macro_rules! impl_checked_float {
    ($($t:ty => $name:literal),* $(,)?) => {$(
        impl Checked for $t {
            const NAME: &'static str = $name;

            fn checked_sub(self, rhs: Self) -> Option<Self> {
                Some(self - rhs)
            }

            fn checked_neg(self) -> Option<Self> {
                Some(-self)
            }

            fn checked_abs(self) -> Option<Self> {
                Some(self.abs())
            }
        }

        impl AbsDiff for $t {
            fn abs_diff(self, rhs: Self) -> Self {
                (self - rhs).abs()
            }
        }
    )*};
}

impl_checked_signed!(i8 => "int8", i16 => "int16", i32 => "int32", i64 => "int64");
impl_checked_unsigned!(u8 => "uint8", u16 => "uint16", u32 => "uint32", u64 => "uint64");
impl_checked_float!(f32 => "float32", f64 => "float64");

/// Convert `value` to `Target`, failing if it is out of range.
///
/// Integer narrowing and sign changes are checked via `TryFrom`. Casts with
/// a float on either side do not go through here; they follow native
/// rounding/saturation and cannot fail.
///
/// # Example
///
/// ```
/// use bta_stream::checked::checked_cast;
///
/// assert_eq!(checked_cast::<u8, u64>(200).unwrap(), 200u8);
/// assert!(checked_cast::<u8, u64>(300).is_err());
/// assert!(checked_cast::<u32, i64>(-1).is_err());
/// ```
pub fn checked_cast<Target, Source>(value: Source) -> Result<Target>
where
    Target: TryFrom<Source>,
    Source: Copy + fmt::Display,
{
    Target::try_from(value).map_err(|_| {
        Error::overflow(format!(
            "value {value} does not fit in {}",
            std::any::type_name::<Target>()
        ))
    })
}

/// `a - b`, failing if the exact result is not representable.
pub fn checked_sub<T: Checked>(a: T, b: T) -> Result<T> {
    Checked::checked_sub(a, b)
        .ok_or_else(|| Error::overflow(format!("{a} - {b} does not fit in {}", T::NAME)))
}

/// `-a`, failing if the exact result is not representable.
pub fn checked_neg<T: Checked>(a: T) -> Result<T> {
    Checked::checked_neg(a)
        .ok_or_else(|| Error::overflow(format!("negating {a} does not fit in {}", T::NAME)))
}

/// `|a|`, failing only for the most-negative value of a signed type.
pub fn checked_abs<T: Checked>(a: T) -> Result<T> {
    Checked::checked_abs(a)
        .ok_or_else(|| Error::overflow(format!("|{a}| does not fit in {}", T::NAME)))
}

/// Absolute difference; saturating by construction, never fails.
pub fn abs_diff<T: AbsDiff>(a: T, b: T) -> T {
    AbsDiff::abs_diff(a, b)
}
