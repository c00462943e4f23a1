//! Parameter ranges
//!
//! This module provides the bounds types that constrain genome alleles, one
//! range per constructor parameter position.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ConfigurationError, IndexError, RangeError};

/// Numeric domain of a parameter range set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericDomain {
    /// Floating-point parameters
    #[default]
    Real,
    /// Integer parameters, decoded by rounding alleles
    Integer,
}

impl fmt::Display for NumericDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real => f.write_str("real"),
            Self::Integer => f.write_str("integer"),
        }
    }
}

/// Legal interval for a single constructor argument
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterRange {
    min: f64,
    max: f64,
}

impl ParameterRange {
    /// Create a new range
    ///
    /// Both bounds must be finite and `min <= max`.
    pub fn new(min: f64, max: f64) -> Result<Self, RangeError> {
        for value in [min, max] {
            if !value.is_finite() {
                return Err(RangeError::NonFinite { value });
            }
        }
        if min > max {
            return Err(RangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Create symmetric bounds centered at 0
    pub fn symmetric(half_width: f64) -> Result<Self, RangeError> {
        Self::new(-half_width, half_width)
    }

    /// Create unit bounds [0, 1]
    pub fn unit() -> Self {
        Self { min: 0.0, max: 1.0 }
    }

    /// Lower bound (inclusive)
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound (inclusive)
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of the range (max - min)
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the range
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Check if a value is within the range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value into the range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl TryFrom<(f64, f64)> for ParameterRange {
    type Error = RangeError;

    fn try_from((min, max): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

/// Ordered ranges, one per constructor parameter
///
/// Position `i` constrains the allele passed to formal parameter `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterRangeSet {
    ranges: Vec<ParameterRange>,
    domain: NumericDomain,
}

impl ParameterRangeSet {
    /// Create a real-valued range set from `(min, max)` pairs
    #[instrument(level = "debug", skip(pairs))]
    pub fn new<I>(pairs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let ranges = pairs
            .into_iter()
            .enumerate()
            .map(|(position, (min, max))| {
                ParameterRange::new(min, max)
                    .map_err(|source| ConfigurationError::InvalidRange { position, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(arity = ranges.len(), "created parameter ranges");
        Ok(Self {
            ranges,
            domain: NumericDomain::Real,
        })
    }

    /// Create an integer range set from `(min, max)` pairs
    ///
    /// Bounds are stored exactly as `f64`; decoding rounds alleles to the
    /// nearest integer.
    #[instrument(level = "debug", skip(pairs))]
    pub fn integer<I>(pairs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut set = Self::new(
            pairs
                .into_iter()
                .map(|(min, max)| (f64::from(min), f64::from(max))),
        )?;
        set.domain = NumericDomain::Integer;
        Ok(set)
    }

    /// Create a real range set using the same range for every position
    pub fn uniform(range: ParameterRange, arity: usize) -> Self {
        Self {
            ranges: vec![range; arity],
            domain: NumericDomain::Real,
        }
    }

    /// Number of ranges (the constructor arity)
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether this set has no ranges
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Numeric domain of the ranges
    pub fn domain(&self) -> NumericDomain {
        self.domain
    }

    /// Range at `index`, failing if the index is out of range
    pub fn range_at(&self, index: usize) -> Result<&ParameterRange, IndexError> {
        self.ranges.get(index).ok_or(IndexError {
            index,
            len: self.ranges.len(),
        })
    }

    /// Range at `index`, if present
    pub fn get(&self, index: usize) -> Option<&ParameterRange> {
        self.ranges.get(index)
    }

    /// Iterate over the ranges in position order
    pub fn iter(&self) -> std::slice::Iter<'_, ParameterRange> {
        self.ranges.iter()
    }

    /// Check that `values` has one entry per range and each entry lies in
    /// its range
    pub fn contains(&self, values: &[f64]) -> bool {
        values.len() == self.ranges.len()
            && self
                .ranges
                .iter()
                .zip(values)
                .all(|(range, &value)| range.contains(value))
    }
}

impl<'a> IntoIterator for &'a ParameterRangeSet {
    type Item = &'a ParameterRange;
    type IntoIter = std::slice::Iter<'a, ParameterRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
