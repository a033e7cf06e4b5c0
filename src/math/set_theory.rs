//! # Set Theory Helpers
//!
//! Cartesian products, set difference of coordinate pairs and (modular)
//! range membership.

use std::collections::BTreeSet;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use num_traits::{Euclid, Zero};

use crate::error::{Result, ToolboxError};

/// Lazy N-dimensional cartesian product.
///
/// Yields one `Vec<T>` per combination with the leftmost sequence varying
/// slowest. Zero input sequences yield exactly one empty tuple; any empty
/// input sequence yields nothing.
///
/// ```rust
/// use toolbelt::math::cartesian_product;
///
/// let pairs: Vec<_> = cartesian_product(&[vec![1, 2], vec![3, 4]]).collect();
/// assert_eq!(pairs, vec![vec![1, 3], vec![1, 4], vec![2, 3], vec![2, 4]]);
/// ```
pub fn cartesian_product<T, S>(sequences: &[S]) -> CartesianProduct<'_, T, S>
where
    S: AsRef<[T]>,
    T: Clone,
{
    CartesianProduct::new(sequences)
}

/// Iterator returned by [`cartesian_product`]
#[derive(Debug)]
pub struct CartesianProduct<'a, T, S> {
    sequences: &'a [S],
    /// Odometer: current position within each sequence
    indices: Vec<usize>,
    remaining: usize,
    _item: PhantomData<fn() -> T>,
}

impl<'a, T, S> CartesianProduct<'a, T, S>
where
    S: AsRef<[T]>,
    T: Clone,
{
    fn new(sequences: &'a [S]) -> Self {
        // saturates instead of overflowing for absurdly large products
        let remaining = sequences
            .iter()
            .map(|s| s.as_ref().len())
            .fold(1usize, usize::saturating_mul);
        Self {
            sequences,
            indices: vec![0; sequences.len()],
            remaining,
            _item: PhantomData,
        }
    }
}

impl<T, S> Iterator for CartesianProduct<'_, T, S>
where
    S: AsRef<[T]>,
    T: Clone,
{
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.remaining == 0 {
            return None;
        }
        let item = self
            .indices
            .iter()
            .zip(self.sequences)
            .map(|(&i, seq)| seq.as_ref()[i].clone())
            .collect();
        self.remaining -= 1;

        // advance the rightmost position, carrying leftwards
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.sequences[pos].as_ref().len() {
                break;
            }
            self.indices[pos] = 0;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, S> ExactSizeIterator for CartesianProduct<'_, T, S>
where
    S: AsRef<[T]>,
    T: Clone,
{
}

impl<T, S> FusedIterator for CartesianProduct<'_, T, S>
where
    S: AsRef<[T]>,
    T: Clone,
{
}

/// Set difference between two lists of pairs.
///
/// Returns the unique pairs of `a` that do not occur in `b`, sorted.
pub fn setdiff2d<T>(a: &[[T; 2]], b: &[[T; 2]]) -> Vec<[T; 2]>
where
    T: Ord + Copy,
{
    let exclude: BTreeSet<[T; 2]> = b.iter().copied().collect();
    a.iter()
        .copied()
        .filter(|pair| !exclude.contains(pair))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Check whether `value` lies in the inclusive range `[min, max]`.
///
/// With a modulo, all three values are reduced first (Euclidean remainder);
/// if the reduced range wraps (`min > max`) the check accepts values at
/// either end, e.g. angles in `[350°, 10°]`. The modulo must be positive.
pub fn is_in_range<T>(value: T, range: (T, T), modulo: Option<T>) -> Result<bool>
where
    T: Copy + PartialOrd + Euclid + Zero,
{
    check_modulo(modulo)?;
    Ok(in_range(value, range, modulo))
}

/// Elementwise [`is_in_range`]
pub fn mask_in_range<T>(values: &[T], range: (T, T), modulo: Option<T>) -> Result<Vec<bool>>
where
    T: Copy + PartialOrd + Euclid + Zero,
{
    check_modulo(modulo)?;
    Ok(values
        .iter()
        .map(|&v| in_range(v, range, modulo))
        .collect())
}

fn check_modulo<T: PartialOrd + Zero>(modulo: Option<T>) -> Result<()> {
    match modulo {
        // also rejects NaN
        Some(m) if !(m > T::zero()) => Err(ToolboxError::invalid_input("modulo must be positive")),
        _ => Ok(()),
    }
}

fn in_range<T>(value: T, (min, max): (T, T), modulo: Option<T>) -> bool
where
    T: Copy + PartialOrd + Euclid,
{
    match modulo {
        Some(m) => {
            let (min, max, value) = (min.rem_euclid(&m), max.rem_euclid(&m), value.rem_euclid(&m));
            if min > max {
                value <= max || min <= value
            } else {
                min <= value && value <= max
            }
        }
        None => min <= value && value <= max,
    }
}
