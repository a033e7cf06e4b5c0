//! # Mixture Distributions
//!
//! Weighted mixtures of continuous distributions. Any `statrs` continuous
//! distribution that can also be sampled with `rand` works as a component.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use statrs::distribution::Continuous;
use statrs::statistics::Distribution as Moments;

use crate::error::{Result, ToolboxError};

/// Tolerance for the weights summing to one
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// A distribution usable inside a [`MixtureDistribution`]
pub trait Component {
    fn pdf(&self, x: f64) -> f64;
    fn mean(&self) -> f64;
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;
}

impl<D> Component for D
where
    D: Continuous<f64, f64> + Moments<f64> + Distribution<f64>,
{
    fn pdf(&self, x: f64) -> f64 {
        Continuous::pdf(self, x)
    }

    fn mean(&self) -> f64 {
        Moments::mean(self).unwrap_or(f64::NAN)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        Distribution::sample(self, rng)
    }
}

/// Weighted mixture `p(x) = Σ wᵢ pᵢ(x)`
#[derive(Clone, Debug)]
pub struct MixtureDistribution<C> {
    weights: Vec<f64>,
    components: Vec<C>,
    chooser: WeightedIndex<f64>,
}

impl<C: Component> MixtureDistribution<C> {
    /// Build a mixture from `(weight, component)` pairs.
    ///
    /// Weights must be finite, non-negative and sum to one.
    pub fn new(parts: Vec<(f64, C)>) -> Result<Self> {
        if parts.is_empty() {
            return Err(ToolboxError::invalid_input("mixture needs at least one component"));
        }
        let (weights, components): (Vec<f64>, Vec<C>) = parts.into_iter().unzip();

        if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(ToolboxError::invalid_input(format!(
                "mixture weight {} is not a finite non-negative number",
                w
            )));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ToolboxError::invalid_input(format!(
                "mixture weights sum to {}, expected 1",
                sum
            )));
        }
        let chooser = WeightedIndex::new(&weights)
            .map_err(|e| ToolboxError::invalid_input(format!("mixture weights: {}", e)))?;

        Ok(Self {
            weights,
            components,
            chooser,
        })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn components(&self) -> &[C] {
        &self.components
    }

    /// Draw one value: pick a component by weight, then sample it
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let idx = self.chooser.sample(rng);
        self.components[idx].sample(rng)
    }

    pub fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.sample(rng)).collect()
    }

    pub fn pdf(&self, x: f64) -> f64 {
        self.weights
            .iter()
            .zip(&self.components)
            .map(|(w, c)| w * c.pdf(x))
            .sum()
    }

    pub fn mean(&self) -> f64 {
        self.weights
            .iter()
            .zip(&self.components)
            .map(|(w, c)| w * c.mean())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use statrs::distribution::Normal;

    fn bimodal() -> MixtureDistribution<Normal> {
        MixtureDistribution::new(vec![
            (0.25, Normal::new(-2.0, 1.0).unwrap()),
            (0.75, Normal::new(2.0, 0.5).unwrap()),
        ])
        .unwrap()
    }

    #[test]
    fn test_mean_is_weighted() {
        assert_relative_eq!(bimodal().mean(), 0.25 * -2.0 + 0.75 * 2.0);
    }

    #[test]
    fn test_pdf_is_weighted() {
        let mix = bimodal();
        let a = Normal::new(-2.0, 1.0).unwrap();
        let b = Normal::new(2.0, 0.5).unwrap();
        let x = 0.3;
        let expected = 0.25 * Continuous::pdf(&a, x) + 0.75 * Continuous::pdf(&b, x);
        assert_relative_eq!(mix.pdf(x), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_mean_converges() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = bimodal().sample_n(&mut rng, 20_000);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((mean - 1.0).abs() < 0.1, "sample mean {}", mean);
    }

    #[test]
    fn test_invalid_weights() {
        let normal = || Normal::new(0.0, 1.0).unwrap();
        assert!(MixtureDistribution::<Normal>::new(vec![]).is_err());
        assert!(MixtureDistribution::new(vec![(0.5, normal()), (0.4, normal())]).is_err());
        assert!(MixtureDistribution::new(vec![(1.5, normal()), (-0.5, normal())]).is_err());
        assert!(MixtureDistribution::new(vec![(f64::NAN, normal())]).is_err());
    }
}
