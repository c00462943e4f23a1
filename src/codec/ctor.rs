//! Constructor codec
//!
//! [`CtorCodec`] maps real-valued genomes onto a target type by calling one of
//! its declared constructors. The constructor is resolved once, when the codec
//! is built; afterwards the codec only holds immutable shared state and can
//! be cloned into any number of worker threads.

use std::fmt;
use std::sync::Arc;

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

use crate::codec::binding::ConstructorBinding;
use crate::codec::descriptor::{Constructible, Constructor, TypeDescriptor};
use crate::codec::traits::Codec;
use crate::config::CodecConfig;
use crate::error::{ConfigurationError, DecodeError, DecodeResult};
use crate::genome::bounds::ParameterRangeSet;
use crate::genome::real_vector::RealVector;
use crate::genome::traits::RealValuedGenome;

/// Codec decoding genomes through a resolved constructor of `T`
///
/// `E` is the error type of the constructor's own validation logic.
pub struct CtorCodec<T, E> {
    ranges: Arc<ParameterRangeSet>,
    binding: Arc<ConstructorBinding<T, E>>,
}

impl<T, E> CtorCodec<T, E> {
    /// Build a codec for the type described by `descriptor`
    ///
    /// Fails if the descriptor does not declare exactly one constructor
    /// taking one parameter per range in the ranges' numeric domain.
    #[instrument(
        level = "debug",
        skip_all,
        fields(type_name = %descriptor.name(), arity = ranges.len())
    )]
    pub fn build(
        descriptor: TypeDescriptor<T, E>,
        ranges: ParameterRangeSet,
    ) -> Result<Self, ConfigurationError> {
        let binding = ConstructorBinding::resolve(descriptor, &ranges)?;
        tracing::debug!(constructor = %binding.constructor(), "built constructor codec");

        Ok(Self {
            ranges: Arc::new(ranges),
            binding: Arc::new(binding),
        })
    }

    /// Build a codec from a parsed configuration
    pub fn from_config(
        descriptor: TypeDescriptor<T, E>,
        config: &CodecConfig,
    ) -> Result<Self, ConfigurationError> {
        Self::build(descriptor, config.range_set()?)
    }

    /// Parameter ranges of this codec
    pub fn ranges(&self) -> &ParameterRangeSet {
        &self.ranges
    }

    /// The resolved constructor
    pub fn constructor(&self) -> &Constructor<T, E> {
        self.binding.constructor()
    }

    /// Factory for fresh genomes within the codec's ranges
    pub fn encoding(&self) -> GenomeFactory {
        GenomeFactory {
            ranges: Arc::clone(&self.ranges),
        }
    }

    /// Decoder from genomes to values of `T`
    pub fn decoder(&self) -> Decoder<T, E> {
        Decoder {
            binding: Arc::clone(&self.binding),
        }
    }
}

impl<T: Constructible> CtorCodec<T, T::Error> {
    /// Build a codec from the type's own descriptor
    pub fn of(ranges: ParameterRangeSet) -> Result<Self, ConfigurationError> {
        Self::build(T::descriptor(), ranges)
    }
}

impl<T, E> Clone for CtorCodec<T, E> {
    fn clone(&self) -> Self {
        Self {
            ranges: Arc::clone(&self.ranges),
            binding: Arc::clone(&self.binding),
        }
    }
}

impl<T, E> fmt::Debug for CtorCodec<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CtorCodec")
            .field("ranges", &self.ranges)
            .field("binding", &self.binding)
            .finish()
    }
}

impl<T, E> Codec for CtorCodec<T, E>
where
    E: std::error::Error + 'static,
{
    type Value = T;
    type Error = DecodeError<E>;

    fn dimension(&self) -> usize {
        self.ranges.len()
    }

    fn new_genome<R: Rng>(&self, rng: &mut R) -> RealVector {
        RealVector::generate(rng, &self.ranges)
    }

    fn decode<G: RealValuedGenome + ?Sized>(&self, genome: &G) -> DecodeResult<T, E> {
        self.binding.invoke(genome.genes())
    }
}

/// Creates genomes within a fixed set of parameter ranges
///
/// The factory holds no random state; callers supply the generator and are
/// responsible for serializing access to a shared one.
#[derive(Debug, Clone)]
pub struct GenomeFactory {
    ranges: Arc<ParameterRangeSet>,
}

impl GenomeFactory {
    /// Create one genome
    pub fn create<R: Rng>(&self, rng: &mut R) -> RealVector {
        RealVector::generate(rng, &self.ranges)
    }

    /// Create `count` independent genomes
    pub fn create_many<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<RealVector> {
        (0..count).map(|_| self.create(rng)).collect()
    }

    /// Ranges genomes are drawn from
    pub fn ranges(&self) -> &ParameterRangeSet {
        &self.ranges
    }

    /// Number of alleles per genome
    pub fn dimension(&self) -> usize {
        self.ranges.len()
    }
}

/// Decodes genomes by invoking a resolved constructor
pub struct Decoder<T, E> {
    binding: Arc<ConstructorBinding<T, E>>,
}

impl<T, E> Decoder<T, E> {
    /// Decode one genome
    ///
    /// Errors raised by the target type's constructor are returned as
    /// [`DecodeError::Domain`] holding the original error value.
    pub fn decode<G: RealValuedGenome + ?Sized>(&self, genome: &G) -> DecodeResult<T, E> {
        self.decode_values(genome.genes())
    }

    /// Decode a raw allele slice
    pub fn decode_values(&self, values: &[f64]) -> DecodeResult<T, E> {
        let result = self.binding.invoke(values);
        if let Err(e) = &result {
            tracing::trace!(
                type_name = self.binding.type_name(),
                domain = e.is_domain(),
                "genome decode failed"
            );
        }
        result
    }

    /// Decode every genome, preserving input order
    #[cfg(feature = "parallel")]
    pub fn decode_all<G>(&self, genomes: &[G]) -> Vec<DecodeResult<T, E>>
    where
        G: RealValuedGenome + Sync,
        T: Send,
        E: Send,
    {
        genomes.par_iter().map(|g| self.decode(g)).collect()
    }

    /// Decode every genome, preserving input order
    #[cfg(not(feature = "parallel"))]
    pub fn decode_all<G>(&self, genomes: &[G]) -> Vec<DecodeResult<T, E>>
    where
        G: RealValuedGenome + Sync,
        T: Send,
        E: Send,
    {
        genomes.iter().map(|g| self.decode(g)).collect()
    }

    /// Number of alleles expected per genome
    pub fn arity(&self) -> usize {
        self.binding.arity()
    }

    /// Turn this decoder into a plain function
    pub fn into_fn(self) -> impl Fn(&RealVector) -> DecodeResult<T, E> + Clone + Send + Sync {
        move |genome: &RealVector| self.decode(genome)
    }
}

impl<T, E> Clone for Decoder<T, E> {
    fn clone(&self) -> Self {
        Self {
            binding: Arc::clone(&self.binding),
        }
    }
}

impl<T, E> fmt::Debug for Decoder<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("binding", &self.binding)
            .finish()
    }
}
