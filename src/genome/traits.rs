//! Core genome traits
//!
//! The codec never owns the genome container. Anything that can expose its
//! alleles as an ordered `f64` slice can be decoded.

/// Trait for genomes that can be read as real vectors
pub trait RealValuedGenome {
    /// Get the genes as a slice of f64 values
    fn genes(&self) -> &[f64];

    /// Number of alleles
    fn dimension(&self) -> usize {
        self.genes().len()
    }
}

impl RealValuedGenome for [f64] {
    fn genes(&self) -> &[f64] {
        self
    }
}

impl RealValuedGenome for Vec<f64> {
    fn genes(&self) -> &[f64] {
        self
    }
}

impl<const N: usize> RealValuedGenome for [f64; N] {
    fn genes(&self) -> &[f64] {
        self
    }
}

impl<G: RealValuedGenome + ?Sized> RealValuedGenome for &G {
    fn genes(&self) -> &[f64] {
        (**self).genes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total<G: RealValuedGenome + ?Sized>(genome: &G) -> f64 {
        genome.genes().iter().sum()
    }

    #[test]
    fn test_slice_like_genomes() {
        let v = vec![1.0, 2.0, 3.0];
        assert_eq!(v.dimension(), 3);
        assert_eq!(total(&v), 6.0);
        assert_eq!(total(&[0.5, 0.5]), 1.0);
        assert_eq!(total(&v[..2]), 3.0);
    }

    #[test]
    fn test_reference_genome() {
        let v = vec![4.0];
        let r = &v;
        assert_eq!(r.genes(), &[4.0]);
        assert_eq!(RealValuedGenome::dimension(&r), 1);
    }
}
