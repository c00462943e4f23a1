//! Real-valued vector genome
//!
//! This module provides a fixed-length real-valued vector genome, the
//! representation produced by codec genome factories.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genome::bounds::{NumericDomain, ParameterRangeSet};
use crate::genome::traits::RealValuedGenome;

/// Fixed-length real-valued vector genome
///
/// Each allele at position `i` is expected to lie within range `i` of the
/// parameter ranges it was generated from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RealVector {
    /// The genes (values) of this genome
    genes: Vec<f64>,
}

impl RealVector {
    /// Create a new real vector with the given genes
    pub fn new(genes: Vec<f64>) -> Self {
        Self { genes }
    }

    /// Generate a random genome within the given ranges
    ///
    /// Real ranges are sampled uniformly over `[min, max]`; integer ranges
    /// are sampled uniformly over the integers of `[min, max]`.
    pub fn generate<R: Rng>(rng: &mut R, ranges: &ParameterRangeSet) -> Self {
        let genes = match ranges.domain() {
            NumericDomain::Real => ranges
                .iter()
                .map(|r| {
                    // max - min may overflow for finite bounds
                    let u: f64 = rng.gen_range(0.0..=1.0);
                    r.clamp(r.min() * (1.0 - u) + r.max() * u)
                })
                .collect(),
            NumericDomain::Integer => ranges
                .iter()
                .map(|r| rng.gen_range(r.min() as i64..=r.max() as i64) as f64)
                .collect(),
        };
        Self { genes }
    }

    /// Get the underlying vector
    pub fn into_inner(self) -> Vec<f64> {
        self.genes
    }

    /// Number of alleles
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the genome has no alleles
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Check if every allele lies within its range
    pub fn is_within(&self, ranges: &ParameterRangeSet) -> bool {
        ranges.contains(&self.genes)
    }
}

impl RealValuedGenome for RealVector {
    fn genes(&self) -> &[f64] {
        &self.genes
    }
}

impl std::ops::Index<usize> for RealVector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.genes[index]
    }
}

impl From<Vec<f64>> for RealVector {
    fn from(genes: Vec<f64>) -> Self {
        Self { genes }
    }
}

impl From<RealVector> for Vec<f64> {
    fn from(genome: RealVector) -> Self {
        genome.genes
    }
}

impl<const N: usize> From<[f64; N]> for RealVector {
    fn from(arr: [f64; N]) -> Self {
        Self {
            genes: arr.to_vec(),
        }
    }
}

impl FromIterator<f64> for RealVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            genes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RealVector {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.genes.into_iter()
    }
}

impl<'a> IntoIterator for &'a RealVector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.genes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::genome::bounds::ParameterRange;

    #[test]
    fn test_real_vector_new() {
        let v = RealVector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.dimension(), 3);
        assert_eq!(v.genes(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_real_vector_from_array() {
        let v: RealVector = [1.0, 2.0, 3.0].into();
        assert_eq!(v.genes(), &[1.0, 2.0, 3.0]);
        assert_eq!(v[1], 2.0);
    }

    #[test]
    fn test_generate_extreme_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let ranges = ParameterRangeSet::new([
            (-1e308, 1e308),
            (f64::MAX, f64::MAX),
            (-f64::MAX, f64::MAX),
        ])
        .unwrap();

        for _ in 0..100 {
            let genome = RealVector::generate(&mut rng, &ranges);
            assert!(genome.genes().iter().all(|g| g.is_finite()));
            assert!(genome.is_within(&ranges));
            assert_eq!(genome[1], f64::MAX);
        }
    }

    #[test]
    fn test_real_vector_generate() {
        let mut rng = StdRng::seed_from_u64(42);
        let ranges = ParameterRangeSet::uniform(ParameterRange::symmetric(5.0).unwrap(), 10);
        let v = RealVector::generate(&mut rng, &ranges);

        assert_eq!(v.dimension(), 10);
        assert!(v.is_within(&ranges));
    }

    #[test]
    fn test_real_vector_generate_mixed_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let ranges = ParameterRangeSet::new([(0.0, 1.0), (100.0, 100.0), (-3.0, -2.0)]).unwrap();
        for _ in 0..100 {
            let v = RealVector::generate(&mut rng, &ranges);
            assert!(v.is_within(&ranges));
            assert_eq!(v[1], 100.0);
        }
    }

    #[test]
    fn test_real_vector_generate_integer() {
        let mut rng = StdRng::seed_from_u64(3);
        let ranges = ParameterRangeSet::integer([(1, 6), (-2, 2)]).unwrap();
        for _ in 0..100 {
            let v = RealVector::generate(&mut rng, &ranges);
            assert!(v.is_within(&ranges));
            assert!(v.genes().iter().all(|g| g.fract() == 0.0));
        }
    }

    #[test]
    fn test_real_vector_generate_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let ranges = ParameterRangeSet::new(Vec::<(f64, f64)>::new()).unwrap();
        assert!(RealVector::generate(&mut rng, &ranges).is_empty());
    }

    #[test]
    fn test_real_vector_iteration() {
        let v = RealVector::new(vec![1.0, 2.0, 3.0]);
        let sum: f64 = (&v).into_iter().sum();
        assert_relative_eq!(sum, 6.0);
        let collected: RealVector = v.clone().into_iter().map(|x| x * 2.0).collect();
        assert_eq!(collected.into_inner(), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_real_vector_serialization() {
        let v = RealVector::new(vec![1.0, 2.0, 3.0]);
        let serialized = serde_json::to_string(&v).unwrap();
        let deserialized: RealVector = serde_json::from_str(&serialized).unwrap();
        assert_eq!(v, deserialized);
    }
}
