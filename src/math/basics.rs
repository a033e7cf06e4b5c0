//! Elementwise arithmetic helpers.

use num_traits::Float;

use crate::error::{Result, ToolboxError};

/// Divide `a` by `b` elementwise, using `default` wherever `b` is zero.
pub fn safe_div<T: Float>(a: &[T], b: &[T], default: T) -> Result<Vec<T>> {
    if a.len() != b.len() {
        return Err(ToolboxError::shape(a.len(), b.len()));
    }
    Ok(a.iter()
        .zip(b)
        .map(|(&num, &den)| if den.is_zero() { default } else { num / den })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_div_default() {
        let out = safe_div(&[1.0, 4.0, 3.0], &[2.0, 0.0, 3.0], -1.0).unwrap();
        assert_eq!(out, vec![0.5, -1.0, 1.0]);
    }

    #[test]
    fn test_safe_div_nan_default() {
        let out = safe_div(&[0.0_f32], &[0.0], f32::NAN).unwrap();
        assert!(out[0].is_nan());
    }

    #[test]
    fn test_safe_div_shape() {
        assert!(matches!(
            safe_div(&[1.0], &[1.0, 2.0], 0.0),
            Err(ToolboxError::ShapeMismatch { expected: 1, got: 2 })
        ));
    }
}
