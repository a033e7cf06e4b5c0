//! # Analysis Helpers
//!
//! Piecewise selection and crossing points of sampled functions.

use num_traits::Float;

use crate::error::{Result, ToolboxError};

/// Which neighbour of a crossing to report
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    /// Index just before the crossing
    #[default]
    Left,
    /// Index just after the crossing
    Right,
}

/// Elementwise case distinction.
///
/// Each case is a `(choices, conditions)` pair of equal length. For every
/// index the first case whose condition holds supplies the value; indices
/// where no condition holds get `default`.
pub fn case_distinction<T: Clone>(cases: &[(&[T], &[bool])], default: T) -> Result<Vec<T>> {
    let (first_choices, _) = cases
        .first()
        .ok_or_else(|| ToolboxError::invalid_input("case_distinction needs at least one case"))?;
    let n = first_choices.len();
    for (choices, conditions) in cases {
        if choices.len() != n {
            return Err(ToolboxError::shape(n, choices.len()));
        }
        if conditions.len() != n {
            return Err(ToolboxError::shape(n, conditions.len()));
        }
    }

    Ok((0..n)
        .map(|i| {
            cases
                .iter()
                .find(|(_, conditions)| conditions[i])
                .map_or_else(|| default.clone(), |(choices, _)| choices[i].clone())
        })
        .collect())
}

/// Indices of the intersection points of two sampled functions.
///
/// Crossings are the places where the sign of `f1 - f2` changes between
/// neighbouring samples (touching zero counts as a change).
pub fn intersect_functions<T: Float>(f1: &[T], f2: &[T], side: Side) -> Result<Vec<usize>> {
    if f1.len() != f2.len() {
        return Err(ToolboxError::shape(f1.len(), f2.len()));
    }
    let offset = match side {
        Side::Left => 0,
        Side::Right => 1,
    };
    let signs: Vec<T> = f1.iter().zip(f2).map(|(&a, &b)| sign(a - b)).collect();

    Ok(signs
        .windows(2)
        .enumerate()
        // NaN differences never compare equal to zero, so they count as crossings
        .filter(|(_, w)| w[1] - w[0] != T::zero())
        .map(|(i, _)| i + offset)
        .collect())
}

/// Sign with zero mapped to zero (unlike `Float::signum`)
fn sign<T: Float>(x: T) -> T {
    if x > T::zero() {
        T::one()
    } else if x < T::zero() {
        -T::one()
    } else if x.is_nan() {
        x
    } else {
        T::zero()
    }
}
