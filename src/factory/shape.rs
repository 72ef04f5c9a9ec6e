//! Validation of runtime (signed) shapes.

use std::mem::size_of;

use ndarray::IxDyn;

use crate::error::{ArrayError, ArrayResult};

/// Convert signed dimensions into an [`IxDyn`] shape for an array of `T`.
///
/// Fails on negative dimensions, and on shapes whose element count or byte size does not fit
/// in `isize` (the most a single allocation may hold).
pub fn checked_shape<T>(dims: &[i64]) -> ArrayResult<IxDyn> {
    let mut out = Vec::with_capacity(dims.len());
    let mut count: usize = 1;
    for (axis, &d) in dims.iter().enumerate() {
        let len = usize::try_from(d).map_err(|_| ArrayError::InvalidShape {
            message: format!("negative dimension {d} on axis {axis} in {dims:?}"),
        })?;
        count = count
            .checked_mul(len)
            .filter(|&n| n <= isize::MAX as usize)
            .ok_or_else(|| ArrayError::InvalidShape {
                message: format!("element count of shape {dims:?} overflows isize"),
            })?;
        out.push(len);
    }

    count
        .checked_mul(size_of::<T>())
        .filter(|&bytes| bytes <= isize::MAX as usize)
        .ok_or_else(|| ArrayError::InvalidShape {
            message: format!(
                "shape {dims:?} of {}-byte elements overflows isize bytes",
                size_of::<T>()
            ),
        })?;
    Ok(IxDyn(&out))
}

#[cfg(test)]
mod tests {
    use ndarray::Dimension;

    use super::checked_shape;

    #[test]
    fn accepts_zero_length_axes() {
        let shape = checked_shape::<f64>(&[0, 3]).unwrap();
        assert_eq!(shape.slice(), &[0, 3]);
        assert_eq!(shape.size(), 0);
    }

    #[test]
    fn scalar_shape_is_allowed() {
        assert_eq!(checked_shape::<i32>(&[]).unwrap().ndim(), 0);
    }

    #[test]
    fn rejects_negative_dimension() {
        let err = checked_shape::<i32>(&[10, -1]).unwrap_err();
        assert!(err.to_string().contains("negative dimension -1 on axis 1"));
    }

    #[test]
    fn rejects_overflowing_element_count() {
        let err = checked_shape::<u8>(&[i64::MAX, 4]).unwrap_err();
        assert!(err.to_string().contains("element count"));
    }

    #[test]
    fn rejects_overflowing_byte_size() {
        // 2^62 elements fit in isize, 2^62 * 8 bytes do not.
        let dims = [1i64 << 61, 2];
        assert!(checked_shape::<u8>(&dims).is_ok());
        let err = checked_shape::<f64>(&dims).unwrap_err();
        assert!(err.to_string().contains("8-byte elements overflows isize bytes"));
    }

    #[test]
    fn zero_sized_elements_only_bound_the_count() {
        assert!(checked_shape::<()>(&[1i64 << 40, 1 << 20]).is_ok());
    }
}
