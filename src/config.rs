//! Codec configuration
//!
//! Parameter ranges and the random seed can be described in JSON:
//!
//! ```json
//! {
//!   "domain": "real",
//!   "ranges": [{ "min": -10.0, "max": 10.0 }, { "min": -10.0, "max": 10.0 }],
//!   "seed": 42
//! }
//! ```

use std::io::Read;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::genome::bounds::{NumericDomain, ParameterRangeSet};

/// Bounds of one parameter as written in a configuration file
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl From<(f64, f64)> for RangeConfig {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

/// Configuration for a constructor codec
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Numeric domain of the constructor parameters
    #[serde(default)]
    pub domain: NumericDomain,
    /// One range per constructor parameter
    pub ranges: Vec<RangeConfig>,
    /// Random seed for genome creation (entropy when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl CodecConfig {
    /// Create a real-domain configuration with the given ranges
    pub fn new<I, R>(ranges: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RangeConfig>,
    {
        Self {
            domain: NumericDomain::Real,
            ranges: ranges.into_iter().map(Into::into).collect(),
            seed: None,
        }
    }

    /// Set the numeric domain
    pub fn with_domain(mut self, domain: NumericDomain) -> Self {
        self.domain = domain;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(json).map_err(|e| ConfigurationError::InvalidConfig(e.to_string()))
    }

    /// Read a configuration from a JSON reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigurationError> {
        serde_json::from_reader(reader)
            .map_err(|e| ConfigurationError::InvalidConfig(e.to_string()))
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String, ConfigurationError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConfigurationError::InvalidConfig(e.to_string()))
    }

    /// Validate the ranges and build the range set
    pub fn range_set(&self) -> Result<ParameterRangeSet, ConfigurationError> {
        match self.domain {
            NumericDomain::Real => {
                ParameterRangeSet::new(self.ranges.iter().map(|r| (r.min, r.max)))
            }
            NumericDomain::Integer => {
                let pairs = self
                    .ranges
                    .iter()
                    .enumerate()
                    .map(|(position, r)| {
                        Ok((
                            integer_bound(position, r.min)?,
                            integer_bound(position, r.max)?,
                        ))
                    })
                    .collect::<Result<Vec<_>, ConfigurationError>>()?;
                ParameterRangeSet::integer(pairs)
            }
        }
    }

    /// Random generator for genome creation
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn integer_bound(position: usize, value: f64) -> Result<i32, ConfigurationError> {
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(ConfigurationError::InvalidConfig(format!(
            "bound {} at position {} is not a 32-bit integer",
            value, position
        )));
    }
    Ok(value as i32)
}
