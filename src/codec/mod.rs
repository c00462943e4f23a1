//! Constructor codecs
//!
//! This module turns a target type's declared constructors into a genome
//! factory and a decoder.

pub mod binding;
pub mod ctor;
pub mod descriptor;
pub mod traits;

pub mod prelude {
    pub use super::binding::ConstructorBinding;
    pub use super::ctor::*;
    pub use super::descriptor::*;
    pub use super::traits::*;
}
