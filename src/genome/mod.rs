//! Genome abstractions
//!
//! This module provides parameter ranges and the real-valued genome the codec
//! works on.

pub mod bounds;
pub mod real_vector;
pub mod traits;

pub mod prelude {
    pub use super::bounds::*;
    pub use super::real_vector::*;
    pub use super::traits::*;
}
