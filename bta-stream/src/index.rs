//! Linear index ↔ per-dimension coordinate conversion.
//!
//! Array payloads store elements in linear order with dimension 0 varying
//! fastest, so for a shape `[3, 2]` the element at linear index 4 sits at
//! coordinates `[1, 1]`. Both directions validate their input and fail with
//! [`Error::Index`] rather than wrapping or truncating.

use crate::error::{Error, Result};

/// Convert a linear element index into per-dimension coordinates.
///
/// Dimension 0 varies fastest. A zero-dimensional shape has exactly one
/// valid index (0, mapping to the empty coordinate vector); a shape with any
/// zero-size axis has none.
///
/// # Errors
///
/// [`Error::Index`] if `index >= product(shape)`.
///
/// # Example
///
/// ```
/// use bta_stream::index::linear_to_coords;
///
/// assert_eq!(linear_to_coords(&[3, 2], 4)?, vec![1, 1]);
/// assert_eq!(linear_to_coords(&[], 0)?, Vec::<u64>::new());
/// # Ok::<(), bta_stream::Error>(())
/// ```
pub fn linear_to_coords(shape: &[u64], index: u64) -> Result<Vec<u64>> {
    let mut coords = Vec::with_capacity(shape.len());
    let mut rest = index;
    for &size in shape {
        if size == 0 {
            return Err(Error::index(format!(
                "index {index} into a shape with a zero-size axis"
            )));
        }
        coords.push(rest % size);
        rest /= size;
    }
    if rest != 0 {
        return Err(Error::index(format!(
            "index {index} out of range for shape {shape:?}"
        )));
    }
    Ok(coords)
}

/// Convert per-dimension coordinates back into a linear element index.
///
/// Exact inverse of [`linear_to_coords`] over valid inputs.
///
/// # Errors
///
/// [`Error::Index`] if the coordinate rank does not match the shape rank or
/// any coordinate is out of its axis bound.
pub fn coords_to_linear(shape: &[u64], coords: &[u64]) -> Result<u64> {
    if coords.len() != shape.len() {
        return Err(Error::index(format!(
            "{} coordinates given for {} dimensions",
            coords.len(),
            shape.len()
        )));
    }
    let mut linear: u64 = 0;
    for (&size, &coord) in shape.iter().zip(coords).rev() {
        if coord >= size {
            return Err(Error::index(format!(
                "coordinate {coord} out of range for an axis of size {size}"
            )));
        }
        linear = linear
            .checked_mul(size)
            .and_then(|l| l.checked_add(coord))
            .ok_or_else(|| Error::index("linear index overflows u64"))?;
    }
    Ok(linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(shape: &[u64]) -> u64 {
        shape.iter().product()
    }

    #[test]
    fn test_roundtrip_all_indices() {
        let shapes: &[&[u64]] = &[
            &[],
            &[1],
            &[4],
            &[3, 2],
            &[2, 3, 4],
            &[1, 1, 1],
            &[5, 1, 3],
        ];
        for shape in shapes {
            for i in 0..count(shape) {
                let coords = linear_to_coords(shape, i).unwrap();
                assert_eq!(coords.len(), shape.len());
                assert_eq!(coords_to_linear(shape, &coords).unwrap(), i, "shape {shape:?}");
            }
            // First index past the end is always rejected.
            assert!(linear_to_coords(shape, count(shape)).is_err());
        }
    }

    #[test]
    fn test_dimension_zero_fastest() {
        assert_eq!(linear_to_coords(&[3, 2], 0).unwrap(), vec![0, 0]);
        assert_eq!(linear_to_coords(&[3, 2], 1).unwrap(), vec![1, 0]);
        assert_eq!(linear_to_coords(&[3, 2], 3).unwrap(), vec![0, 1]);
        assert_eq!(linear_to_coords(&[3, 2], 4).unwrap(), vec![1, 1]);
        assert_eq!(coords_to_linear(&[3, 2], &[2, 1]).unwrap(), 5);
    }

    #[test]
    fn test_zero_dimensions() {
        assert_eq!(linear_to_coords(&[], 0).unwrap(), Vec::<u64>::new());
        assert!(linear_to_coords(&[], 1).is_err());
        assert_eq!(coords_to_linear(&[], &[]).unwrap(), 0);
    }

    #[test]
    fn test_zero_size_axis() {
        assert!(linear_to_coords(&[0], 0).is_err());
        assert!(linear_to_coords(&[3, 0, 7], 0).is_err());
        assert!(coords_to_linear(&[3, 0], &[0, 0]).is_err());
    }

    #[test]
    fn test_bounds_errors() {
        let err = coords_to_linear(&[3, 2], &[3, 0]).unwrap_err();
        assert!(matches!(err, Error::Index { .. }));
        assert!(coords_to_linear(&[3, 2], &[0]).is_err());
        assert!(coords_to_linear(&[3, 2], &[0, 0, 0]).is_err());
    }
}
