//! Codec traits
//!
//! This module defines the interface an evolutionary engine uses to create
//! genomes and turn them back into domain values.

use rand::Rng;

use crate::genome::real_vector::RealVector;
use crate::genome::traits::RealValuedGenome;

/// Mapping between real-valued genomes and a domain value type
///
/// Implementations must be usable from many threads at once; decoding is a
/// pure function of the genome.
pub trait Codec: Send + Sync {
    /// The decoded value type
    type Value;

    /// Error raised when a genome cannot be decoded
    type Error: std::error::Error;

    /// Number of alleles per genome
    fn dimension(&self) -> usize;

    /// Create a fresh genome whose alleles lie within the codec's ranges
    fn new_genome<R: Rng>(&self, rng: &mut R) -> RealVector;

    /// Decode a genome into a value
    fn decode<G: RealValuedGenome + ?Sized>(&self, genome: &G) -> Result<Self::Value, Self::Error>;

    /// Create `count` fresh genomes
    fn new_genomes<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<RealVector> {
        (0..count).map(|_| self.new_genome(rng)).collect()
    }
}
