//! Error types for evo-codec
//!
//! This module defines all error types used throughout the library.
//!
//! Build-time problems surface as [`ConfigurationError`]; everything raised
//! while decoding a genome is a [`DecodeError`], which keeps the target type's
//! own validation errors apart from failures of the construction machinery.

use thiserror::Error;

use crate::codec::descriptor::ParamType;
use crate::genome::bounds::NumericDomain;

/// Error type for a single parameter range
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RangeError {
    /// Lower bound is greater than the upper bound
    #[error("Invalid bounds: min ({min}) must be <= max ({max})")]
    Inverted { min: f64, max: f64 },

    /// A bound is NaN or infinite
    #[error("Invalid bounds: {value} is not a finite number")]
    NonFinite { value: f64 },
}

/// Error type for codec configuration, raised only at build time
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    /// A parameter range is malformed
    #[error("Invalid range at position {position}: {source}")]
    InvalidRange {
        position: usize,
        #[source]
        source: RangeError,
    },

    /// The target type declares no constructor matching the ranges
    #[error("No constructor of {type_name} takes {arity} {domain} parameter(s)")]
    NoMatchingConstructor {
        type_name: String,
        arity: usize,
        domain: NumericDomain,
    },

    /// The target type declares several constructors matching the ranges
    #[error(
        "Ambiguous constructors of {type_name} for {arity} {domain} parameter(s): {}",
        candidates.join(", ")
    )]
    AmbiguousConstructor {
        type_name: String,
        arity: usize,
        domain: NumericDomain,
        candidates: Vec<String>,
    },

    /// A predicate combinator was given an absent predicate
    #[error("Missing predicate: {0}")]
    MissingPredicate(&'static str),

    /// Configuration could not be parsed or is ill-formed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Position lookup outside a parameter range set
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Index {index} out of range for {len} parameter range(s)")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

/// Failure to convert genome alleles into constructor arguments.
///
/// Decoding only reaches coercion after the constructor was resolved against
/// the same ranges, so these errors signal inconsistent input or a bug.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoercionError {
    /// Genome length differs from the bound constructor's arity
    #[error("Genome length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Allele cannot be represented by the target parameter type
    #[error("Value {value} at position {position} does not fit into {target}")]
    OutOfRange {
        position: usize,
        value: f64,
        target: ParamType,
    },

    /// Parameter type is incompatible with the numeric domain of the ranges
    #[error("Parameter {position} of type {target} is not a {domain} parameter")]
    Incompatible {
        position: usize,
        target: ParamType,
        domain: NumericDomain,
    },
}

/// Failure of the construction mechanism itself
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvocationError {
    /// Constructor is not accessible to the codec
    #[error("Constructor {constructor} is not accessible")]
    Inaccessible { constructor: String },

    /// Target type cannot be instantiated
    #[error("Type {type_name} cannot be instantiated")]
    Uninstantiable { type_name: String },

    /// Wrong number of arguments reached the constructor
    #[error("Constructor expects {expected} argument(s), got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// Argument could not be marshalled into the declared parameter type
    #[error("Argument {position}: expected {expected}, got {actual}")]
    ArgumentMismatch {
        position: usize,
        expected: ParamType,
        actual: ParamType,
    },
}

/// Error type for decoding a genome into a value
#[derive(Debug, Error)]
pub enum DecodeError<E> {
    /// Rejection raised by the target type's own constructor logic,
    /// passed through untouched
    #[error(transparent)]
    Domain(E),

    /// Genome alleles could not be coerced to the constructor's parameters
    #[error("Coercion failed: {0}")]
    Coercion(#[from] CoercionError),

    /// The construction mechanism failed
    #[error("Constructor invocation failed: {0}")]
    Invocation(#[from] InvocationError),
}

impl<E> DecodeError<E> {
    /// Returns true if the target type itself rejected the input
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// Returns the domain error, if any
    pub fn domain(&self) -> Option<&E> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }

    /// Unwraps the domain error, returning any other error unchanged
    pub fn into_domain(self) -> Result<E, Self> {
        match self {
            Self::Domain(e) => Ok(e),
            other => Err(other),
        }
    }
}

/// Result type alias for decode operations
pub type DecodeResult<T, E> = Result<T, DecodeError<E>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error, PartialEq)]
    #[error("radius must be positive, got {0}")]
    struct InvalidRadius(f64);

    #[test]
    fn test_range_error_display() {
        let err = RangeError::Inverted { min: 5.0, max: -5.0 };
        assert_eq!(err.to_string(), "Invalid bounds: min (5) must be <= max (-5)");
    }

    #[test]
    fn test_configuration_error_display() {
        let err = ConfigurationError::InvalidRange {
            position: 2,
            source: RangeError::NonFinite { value: f64::INFINITY },
        };
        assert_eq!(
            err.to_string(),
            "Invalid range at position 2: Invalid bounds: inf is not a finite number"
        );

        let err = ConfigurationError::NoMatchingConstructor {
            type_name: "Point".to_string(),
            arity: 3,
            domain: NumericDomain::Real,
        };
        assert_eq!(
            err.to_string(),
            "No constructor of Point takes 3 real parameter(s)"
        );

        let err = ConfigurationError::AmbiguousConstructor {
            type_name: "Point".to_string(),
            arity: 2,
            domain: NumericDomain::Real,
            candidates: vec!["new".to_string(), "polar".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Ambiguous constructors of Point for 2 real parameter(s): new, polar"
        );
    }

    #[test]
    fn test_index_error_display() {
        let err = IndexError { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Index 4 out of range for 2 parameter range(s)");
    }

    #[test]
    fn test_domain_error_is_transparent() {
        let err: DecodeError<InvalidRadius> = DecodeError::Domain(InvalidRadius(-1.0));
        assert_eq!(err.to_string(), "radius must be positive, got -1");
        assert!(err.is_domain());
        assert_eq!(err.domain(), Some(&InvalidRadius(-1.0)));
        assert_eq!(err.into_domain().ok(), Some(InvalidRadius(-1.0)));
    }

    #[test]
    fn test_decode_error_from_mechanism_errors() {
        let err: DecodeError<InvalidRadius> =
            CoercionError::LengthMismatch { expected: 2, actual: 1 }.into();
        assert!(matches!(err, DecodeError::Coercion(_)));
        assert!(!err.is_domain());

        let err: DecodeError<InvalidRadius> = InvocationError::Uninstantiable {
            type_name: "Shape".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Constructor invocation failed: Type Shape cannot be instantiated"
        );
        assert!(err.into_domain().is_err());
    }
}
