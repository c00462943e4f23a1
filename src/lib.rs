//! # evo-codec
//!
//! Constructor-based codecs for evolutionary optimization.
//!
//! A search algorithm works on fixed-length vectors of real numbers; the
//! problem usually lives in some domain type. A [`CtorCodec`](codec::ctor::CtorCodec)
//! bridges the two: given a type's declared constructors and one numeric range
//! per constructor parameter, it produces a factory for random genomes within
//! those ranges and a decoder that rebuilds values by calling the matching
//! constructor.
//!
//! ## Core Concepts
//!
//! - **Resolution at build time**: the constructor is chosen once, by arity and
//!   parameter types, when the codec is built. Missing or ambiguous
//!   constructors fail immediately.
//! - **Numeric coercion**: alleles are `f64`; they are narrowed to `f32` or
//!   rounded to integers according to the constructor's declared parameters.
//! - **Error pass-through**: validation errors raised by the target type come
//!   back untouched as [`DecodeError::Domain`](error::DecodeError::Domain),
//!   separate from failures of the construction machinery.
//!
//! ## Quick Start
//!
//! ```rust
//! use evo_codec::prelude::*;
//! use rand::SeedableRng;
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: f64,
//!     y: f64,
//! }
//!
//! impl Constructible for Point {
//!     type Error = std::convert::Infallible;
//!
//!     fn descriptor() -> TypeDescriptor<Self, Self::Error> {
//!         TypeDescriptor::new("Point")
//!             .with_constructor(Constructor::new("Point::new", |x: f64, y: f64| Ok(Point { x, y })))
//!     }
//! }
//!
//! let ranges = ParameterRangeSet::new([(-10.0, 10.0), (-10.0, 10.0)])?;
//! let codec = CtorCodec::<Point, _>::of(ranges)?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let genome = codec.encoding().create(&mut rng);
//! let point = codec.decoder().decode(&genome).unwrap();
//! assert_eq!(point, Point { x: genome[0], y: genome[1] });
//! # Ok::<(), ConfigurationError>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod functions;
pub mod genome;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::codec::prelude::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::genome::prelude::*;
}
