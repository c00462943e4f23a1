//! Constructor binding
//!
//! Resolution picks the single declared constructor whose signature matches a
//! parameter range set. The resulting [`ConstructorBinding`] coerces genome
//! alleles into arguments, invokes the constructor and classifies the outcome.

use std::fmt;

use tracing::instrument;

use crate::codec::descriptor::{Arg, Constructor, Invocation, ParamType, TypeDescriptor, Visibility};
use crate::error::{
    CoercionError, ConfigurationError, DecodeError, DecodeResult, InvocationError,
};
use crate::genome::bounds::{NumericDomain, ParameterRangeSet};

/// Constructor of a target type resolved against a parameter range set
pub struct ConstructorBinding<T, E> {
    type_name: String,
    instantiable: bool,
    domain: NumericDomain,
    constructor: Constructor<T, E>,
}

impl<T, E> ConstructorBinding<T, E> {
    /// Resolve the unique constructor of `descriptor` taking one parameter per
    /// range, each accepting values from the ranges' domain.
    ///
    /// A parameter too narrow for its range (an `f32` against bounds beyond
    /// `f32::MAX`) does not match, so decoding a genome within the ranges
    /// never fails to coerce.
    #[instrument(
        level = "debug",
        skip_all,
        fields(type_name = %descriptor.name(), arity = ranges.len(), domain = %ranges.domain())
    )]
    pub fn resolve(
        descriptor: TypeDescriptor<T, E>,
        ranges: &ParameterRangeSet,
    ) -> Result<Self, ConfigurationError> {
        let arity = ranges.len();
        let domain = ranges.domain();
        let type_name = descriptor.name().to_string();
        let instantiable = descriptor.is_instantiable();

        let mut candidates: Vec<Constructor<T, E>> = descriptor
            .constructors()
            .iter()
            .filter(|c| c.fits(ranges))
            .cloned()
            .collect();

        match candidates.len() {
            0 => {
                tracing::warn!(type_name = %type_name, arity, %domain, "no matching constructor");
                Err(ConfigurationError::NoMatchingConstructor {
                    type_name,
                    arity,
                    domain,
                })
            }
            1 => {
                let constructor = candidates.remove(0);
                tracing::debug!(constructor = %constructor, "resolved constructor");
                Ok(Self {
                    type_name,
                    instantiable,
                    domain,
                    constructor,
                })
            }
            _ => {
                let candidates: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
                tracing::warn!(type_name = %type_name, arity, %domain, ?candidates, "ambiguous constructors");
                Err(ConfigurationError::AmbiguousConstructor {
                    type_name,
                    arity,
                    domain,
                    candidates,
                })
            }
        }
    }

    /// Name of the target type
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The bound constructor
    pub fn constructor(&self) -> &Constructor<T, E> {
        &self.constructor
    }

    /// Number of parameters of the bound constructor
    pub fn arity(&self) -> usize {
        self.constructor.arity()
    }

    /// Coerce `values` and invoke the bound constructor
    pub fn invoke(&self, values: &[f64]) -> DecodeResult<T, E> {
        let args = self.coerce(values)?;
        classify(self.call(args))
    }

    fn coerce(&self, values: &[f64]) -> Result<Vec<Arg>, CoercionError> {
        if values.len() != self.arity() {
            return Err(CoercionError::LengthMismatch {
                expected: self.arity(),
                actual: values.len(),
            });
        }

        self.constructor
            .params()
            .iter()
            .zip(values)
            .enumerate()
            .map(|(position, (&target, &value))| coerce(position, value, target, self.domain))
            .collect()
    }

    fn call(&self, args: Vec<Arg>) -> Invocation<T, E> {
        if !self.instantiable {
            return Invocation::Broken(InvocationError::Uninstantiable {
                type_name: self.type_name.clone(),
            });
        }
        if self.constructor.visibility() == Visibility::Restricted {
            return Invocation::Broken(InvocationError::Inaccessible {
                constructor: self.constructor.to_string(),
            });
        }
        self.constructor.call(args)
    }
}

impl<T, E> fmt::Debug for ConstructorBinding<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorBinding")
            .field("type_name", &self.type_name)
            .field("instantiable", &self.instantiable)
            .field("domain", &self.domain)
            .field("constructor", &self.constructor)
            .finish()
    }
}

/// Convert one allele into an argument of the target parameter type
///
/// Real alleles pass through unchanged (or narrowed to `f32`). Integer
/// alleles are rounded to the nearest integer, ties away from zero.
pub fn coerce(
    position: usize,
    value: f64,
    target: ParamType,
    domain: NumericDomain,
) -> Result<Arg, CoercionError> {
    let out_of_range = || CoercionError::OutOfRange {
        position,
        value,
        target,
    };

    match (domain, target) {
        (NumericDomain::Real, ParamType::F64) => Ok(Arg::F64(value)),
        (NumericDomain::Real, ParamType::F32) => {
            let narrowed = value as f32;
            if value.is_finite() && !narrowed.is_finite() {
                Err(out_of_range())
            } else {
                Ok(Arg::F32(narrowed))
            }
        }
        (NumericDomain::Integer, ParamType::I64 | ParamType::I32) => {
            let rounded = value.round();
            // i64::MAX as f64 rounds up to 2^63, which is already out of range
            if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
                return Err(out_of_range());
            }
            let wide = rounded as i64;
            match target {
                ParamType::I32 => i32::try_from(wide)
                    .map(Arg::I32)
                    .map_err(|_| out_of_range()),
                _ => Ok(Arg::I64(wide)),
            }
        }
        _ => Err(CoercionError::Incompatible {
            position,
            target,
            domain,
        }),
    }
}

/// Map an invocation outcome onto the decode result
///
/// Rejections from the target type pass through as [`DecodeError::Domain`]
/// with the original error value; mechanism failures become
/// [`DecodeError::Invocation`]. Panics raised by a constructor are not
/// outcomes and unwind past this point untouched.
pub fn classify<T, E>(outcome: Invocation<T, E>) -> DecodeResult<T, E> {
    match outcome {
        Invocation::Constructed(value) => Ok(value),
        Invocation::Rejected(e) => Err(DecodeError::Domain(e)),
        Invocation::Broken(e) => Err(DecodeError::Invocation(e)),
    }
}
