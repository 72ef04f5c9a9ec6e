//! Array factories: allocate arrays of a given shape and element type.
//!
//! - [`zeros()`], [`ones()`], [`full()`]: every element set to a known value
//! - [`empty()`]: contents unspecified; callers must overwrite before relying on them
//! - [`uninit()`]: raw `MaybeUninit` storage for callers that write every element themselves
//! - [`create_dyn()`]: runtime, signed shapes that are validated instead of trusted
//!
//! Shapes are anything implementing [`ndarray::ShapeBuilder`]: `n` for 1-D, `(r, c)` for 2-D,
//! and so on.
//!
//! ```rust
//! use ndarray::{Array1, Array2};
//! use numeric_arrays::factory::{ones, zeros};
//!
//! let z: Array1<i32> = zeros(100);
//! assert!(z.iter().all(|&v| v == 0));
//!
//! let o: Array2<f32> = ones((10, 10));
//! assert_eq!(o.dim(), (10, 10));
//! assert!(o.iter().all(|&v| v == 1.0));
//! ```

pub mod shape;

use std::mem::MaybeUninit;

use ndarray::{Array, ArrayD, ShapeBuilder};

use crate::error::ArrayResult;
use crate::types::Element;

pub use shape::checked_shape;

/// Initial-contents policy for a newly allocated array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Every element is zero (`false` for `bool`).
    Zeros,
    /// Every element is one (`true` for `bool`).
    Ones,
    /// Contents are unspecified.
    Empty,
}

/// Allocate an array filled according to `fill`.
///
/// # Panics
///
/// Panics if the element count overflows `isize`; use [`create_dyn`] for untrusted shapes.
pub fn create<T, Sh>(shape: Sh, fill: Fill) -> Array<T, Sh::Dim>
where
    T: Element,
    Sh: ShapeBuilder,
{
    match fill {
        Fill::Zeros => zeros(shape),
        Fill::Ones => ones(shape),
        Fill::Empty => empty(shape),
    }
}

/// An array of zeros.
pub fn zeros<T, Sh>(shape: Sh) -> Array<T, Sh::Dim>
where
    T: Element,
    Sh: ShapeBuilder,
{
    full(shape, T::zero())
}

/// An array of ones.
pub fn ones<T, Sh>(shape: Sh) -> Array<T, Sh::Dim>
where
    T: Element,
    Sh: ShapeBuilder,
{
    full(shape, T::one())
}

/// An array with every element set to `value`.
pub fn full<T, Sh>(shape: Sh, value: T) -> Array<T, Sh::Dim>
where
    T: Element,
    Sh: ShapeBuilder,
{
    Array::from_elem(shape, value)
}

/// An array whose contents are unspecified.
///
/// The storage is initialised (reading it is sound), but no particular value is guaranteed.
pub fn empty<T, Sh>(shape: Sh) -> Array<T, Sh::Dim>
where
    T: Element,
    Sh: ShapeBuilder,
{
    full(shape, T::default())
}

/// Uninitialised storage for an array of `T`.
///
/// Every element must be written before calling `assume_init` on the result.
pub fn uninit<T, Sh>(shape: Sh) -> Array<MaybeUninit<T>, Sh::Dim>
where
    T: Element,
    Sh: ShapeBuilder,
{
    Array::<T, Sh::Dim>::uninit(shape)
}

/// Allocate a dynamically shaped array from signed dimensions.
///
/// Negative dimensions, and shapes too large to allocate as `T`, fail with
/// [`crate::ArrayError::InvalidShape`] before anything is allocated.
pub fn create_dyn<T: Element>(dims: &[i64], fill: Fill) -> ArrayResult<ArrayD<T>> {
    let shape = checked_shape::<T>(dims)?;
    Ok(create(shape, fill))
}

#[cfg(test)]
mod tests {
    use ndarray::{Array1, Array2};

    use super::*;
    use crate::ArrayError;

    #[test]
    fn bool_ones_are_true() {
        let a: Array1<bool> = ones(50);
        assert_eq!(a.len(), 50);
        assert!(a.iter().all(|&v| v));
    }

    #[test]
    fn bool_zeros_are_false() {
        let a: Array1<bool> = zeros(3);
        assert!(a.iter().all(|&v| !v));
    }

    #[test]
    fn empty_has_requested_shape() {
        let a: Array2<f32> = empty((10, 10));
        assert_eq!(a.dim(), (10, 10));
    }

    #[test]
    fn create_matches_fill_policy() {
        let a: Array2<i64> = create((2, 3), Fill::Ones);
        assert_eq!(a, Array2::from_elem((2, 3), 1));
    }

    #[test]
    fn full_sets_every_element() {
        let a = full((2, 2), 7.5f64);
        assert!(a.iter().all(|&v| v == 7.5));
    }

    #[test]
    fn uninit_can_be_written_then_assumed_init() {
        let mut buf = uninit::<f64, _>((3, 4));
        assert_eq!(buf.dim(), (3, 4));
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = MaybeUninit::new(i as f64);
        }
        // SAFETY: every element was written above.
        let a = unsafe { buf.assume_init() };
        assert_eq!(a[[2, 3]], 11.0);
    }

    #[test]
    fn create_dyn_rejects_negative_dims() {
        let err = create_dyn::<i32>(&[-1], Fill::Zeros).unwrap_err();
        assert!(matches!(err, ArrayError::InvalidShape { .. }));
    }

    #[test]
    fn create_dyn_rejects_shapes_too_large_in_bytes() {
        let err = create_dyn::<f64>(&[1 << 61, 2], Fill::Zeros).unwrap_err();
        assert!(matches!(err, ArrayError::InvalidShape { .. }));
    }

    #[test]
    fn create_dyn_builds_requested_shape() {
        let a = create_dyn::<f32>(&[2, 5], Fill::Ones).unwrap();
        assert_eq!(a.shape(), &[2, 5]);
        assert!(a.iter().all(|&v| v == 1.0));
    }
}
