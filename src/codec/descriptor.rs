//! Type descriptors
//!
//! A [`TypeDescriptor`] is the introspection surface of a target type: its
//! name, whether it can be instantiated, and the constructors it declares.
//! Each [`Constructor`] records its ordered parameter types next to an opaque
//! invocation handle, so the codec can pick a constructor by signature at
//! build time and call it with coerced arguments at decode time.
//!
//! Typed closures convert into constructors directly:
//!
//! ```rust
//! use evo_codec::prelude::*;
//!
//! #[derive(Debug)]
//! struct Point {
//!     x: f64,
//!     y: f64,
//! }
//!
//! let descriptor = TypeDescriptor::<Point, std::convert::Infallible>::new("Point")
//!     .with_constructor(Constructor::new("Point::new", |x: f64, y: f64| Ok(Point { x, y })));
//!
//! assert_eq!(descriptor.constructors()[0].params(), &[ParamType::F64, ParamType::F64]);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::InvocationError;
use crate::genome::bounds::{NumericDomain, ParameterRange, ParameterRangeSet};

/// Declared type of a constructor parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// 64-bit float
    F64,
    /// 32-bit float
    F32,
    /// 64-bit signed integer
    I64,
    /// 32-bit signed integer
    I32,
    /// Any non-numeric type, identified by name
    Other(&'static str),
}

impl ParamType {
    /// Whether a real allele can be passed to this parameter
    pub fn is_real(self) -> bool {
        matches!(self, Self::F64 | Self::F32)
    }

    /// Whether an integer allele can be passed to this parameter
    pub fn is_integer(self) -> bool {
        matches!(self, Self::I64 | Self::I32)
    }

    /// Whether this parameter accepts values from the given domain
    pub fn accepts(self, domain: NumericDomain) -> bool {
        match domain {
            NumericDomain::Real => self.is_real(),
            NumericDomain::Integer => self.is_integer(),
        }
    }

    /// Whether every value of `range` is representable by this parameter
    pub fn admits(self, range: &ParameterRange) -> bool {
        let (lo, hi) = match self {
            Self::F64 | Self::I64 | Self::Other(_) => return true,
            Self::F32 => (-f64::from(f32::MAX), f64::from(f32::MAX)),
            Self::I32 => (f64::from(i32::MIN), f64::from(i32::MAX)),
        };
        range.min() >= lo && range.max() <= hi
    }

    /// Rust name of the type
    pub fn name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::I64 => "i64",
            Self::I32 => "i32",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A coerced constructor argument
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg {
    F64(f64),
    F32(f32),
    I64(i64),
    I32(i32),
}

impl Arg {
    /// Type carried by this argument
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::F64(_) => ParamType::F64,
            Self::F32(_) => ParamType::F32,
            Self::I64(_) => ParamType::I64,
            Self::I32(_) => ParamType::I32,
        }
    }
}

/// Rust type usable as a constructor parameter
pub trait Parameter: Sized + 'static {
    /// Declared type reported to constructor resolution
    const TYPE: ParamType;

    /// Extract a value from an argument of exactly this type
    fn from_arg(arg: Arg) -> Option<Self>;
}

macro_rules! numeric_parameter {
    ($ty:ty, $variant:ident) => {
        impl Parameter for $ty {
            const TYPE: ParamType = ParamType::$variant;

            fn from_arg(arg: Arg) -> Option<Self> {
                match arg {
                    Arg::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

numeric_parameter!(f64, F64);
numeric_parameter!(f32, F32);
numeric_parameter!(i64, I64);
numeric_parameter!(i32, I32);

// Non-numeric parameters never receive a genome value.
macro_rules! opaque_parameter {
    ($ty:ty, $name:literal) => {
        impl Parameter for $ty {
            const TYPE: ParamType = ParamType::Other($name);

            fn from_arg(_arg: Arg) -> Option<Self> {
                None
            }
        }
    };
}

opaque_parameter!(bool, "bool");
opaque_parameter!(String, "String");
opaque_parameter!(Vec<f64>, "Vec<f64>");

/// Outcome of invoking a constructor
#[derive(Debug)]
pub enum Invocation<T, E> {
    /// The constructor returned a value
    Constructed(T),
    /// The constructor's own logic rejected its arguments
    Rejected(E),
    /// The construction mechanism failed
    Broken(InvocationError),
}

/// Closure usable as a constructor body
///
/// Implemented for `Fn(P1, ..., Pn) -> Result<T, E>` with up to eight
/// [`Parameter`] arguments. `Args` is the tuple of parameter types and only
/// serves to tell the implementations apart.
pub trait ConstructorFn<T, E, Args>: Send + Sync + 'static {
    /// Declared parameter types in order
    fn param_types() -> Vec<ParamType>;

    /// Marshal the arguments and run the closure
    fn invoke(&self, args: Vec<Arg>) -> Invocation<T, E>;
}

macro_rules! constructor_fn {
    ($($P:ident),*) => {
        impl<F, T, E, $($P,)*> ConstructorFn<T, E, ($($P,)*)> for F
        where
            F: Fn($($P),*) -> Result<T, E> + Send + Sync + 'static,
            $($P: Parameter,)*
        {
            fn param_types() -> Vec<ParamType> {
                vec![$($P::TYPE),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables, unused_assignments)]
            fn invoke(&self, args: Vec<Arg>) -> Invocation<T, E> {
                let expected = <Self as ConstructorFn<T, E, ($($P,)*)>>::param_types().len();
                if args.len() != expected {
                    return Invocation::Broken(InvocationError::ArityMismatch {
                        expected,
                        actual: args.len(),
                    });
                }

                let mut args = args.into_iter();
                let mut position = 0usize;
                $(
                    let $P = match args.next() {
                        Some(arg) => match $P::from_arg(arg) {
                            Some(value) => value,
                            None => {
                                return Invocation::Broken(InvocationError::ArgumentMismatch {
                                    position,
                                    expected: $P::TYPE,
                                    actual: arg.param_type(),
                                })
                            }
                        },
                        None => {
                            return Invocation::Broken(InvocationError::ArityMismatch {
                                expected,
                                actual: position,
                            })
                        }
                    };
                    position += 1;
                )*

                match self($($P),*) {
                    Ok(value) => Invocation::Constructed(value),
                    Err(e) => Invocation::Rejected(e),
                }
            }
        }
    };
}

constructor_fn!();
constructor_fn!(P1);
constructor_fn!(P1, P2);
constructor_fn!(P1, P2, P3);
constructor_fn!(P1, P2, P3, P4);
constructor_fn!(P1, P2, P3, P4, P5);
constructor_fn!(P1, P2, P3, P4, P5, P6);
constructor_fn!(P1, P2, P3, P4, P5, P6, P7);
constructor_fn!(P1, P2, P3, P4, P5, P6, P7, P8);

/// Accessibility of a declared constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Callable by the codec
    #[default]
    Public,
    /// Declared but not callable from outside the type
    Restricted,
}

type InvokeFn<T, E> = dyn Fn(Vec<Arg>) -> Invocation<T, E> + Send + Sync;

/// A declared constructor of a target type
pub struct Constructor<T, E> {
    name: Cow<'static, str>,
    params: Vec<ParamType>,
    visibility: Visibility,
    invoke: Arc<InvokeFn<T, E>>,
}

impl<T: 'static, E: 'static> Constructor<T, E> {
    /// Create a constructor from a typed closure
    pub fn new<Args, F>(name: impl Into<Cow<'static, str>>, body: F) -> Self
    where
        F: ConstructorFn<T, E, Args>,
    {
        Self {
            name: name.into(),
            params: F::param_types(),
            visibility: Visibility::Public,
            invoke: Arc::new(move |args| body.invoke(args)),
        }
    }

    /// Create a constructor from an explicit signature and an untyped body
    ///
    /// The body receives the coerced arguments and is responsible for
    /// marshalling them itself.
    pub fn raw<F>(name: impl Into<Cow<'static, str>>, params: Vec<ParamType>, body: F) -> Self
    where
        F: Fn(Vec<Arg>) -> Invocation<T, E> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params,
            visibility: Visibility::Public,
            invoke: Arc::new(body),
        }
    }
}

impl<T, E> Constructor<T, E> {
    /// Mark this constructor as not callable from outside the type
    pub fn restricted(mut self) -> Self {
        self.visibility = Visibility::Restricted;
        self
    }

    /// Constructor name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter types in order
    pub fn params(&self) -> &[ParamType] {
        &self.params
    }

    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Accessibility of this constructor
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether this constructor takes exactly `arity` parameters, all
    /// accepting values from `domain`
    pub fn matches(&self, arity: usize, domain: NumericDomain) -> bool {
        self.params.len() == arity && self.params.iter().all(|p| p.accepts(domain))
    }

    /// Whether this constructor can take every genome drawn from `ranges`
    ///
    /// On top of [`Constructor::matches`], each parameter must be able to
    /// represent the whole range at its position.
    pub fn fits(&self, ranges: &ParameterRangeSet) -> bool {
        self.matches(ranges.len(), ranges.domain())
            && self.params.iter().zip(ranges).all(|(p, r)| p.admits(r))
    }

    /// Call the constructor body with already-coerced arguments
    pub(crate) fn call(&self, args: Vec<Arg>) -> Invocation<T, E> {
        (self.invoke)(args)
    }
}

impl<T, E> Clone for Constructor<T, E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            params: self.params.clone(),
            visibility: self.visibility,
            invoke: Arc::clone(&self.invoke),
        }
    }
}

impl<T, E> fmt::Debug for Constructor<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

impl<T, E> fmt::Display for Constructor<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        f.write_str(")")
    }
}

/// Declared constructors of a target type
pub struct TypeDescriptor<T, E> {
    name: Cow<'static, str>,
    instantiable: bool,
    constructors: Vec<Constructor<T, E>>,
}

impl<T, E> TypeDescriptor<T, E> {
    /// Create a descriptor with no constructors
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            instantiable: true,
            constructors: Vec::new(),
        }
    }

    /// Create a descriptor named after `T`
    pub fn of() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    /// Add a declared constructor
    pub fn with_constructor(mut self, constructor: Constructor<T, E>) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Mark the type as not instantiable
    ///
    /// Constructors still resolve, but every invocation fails.
    pub fn uninstantiable(mut self) -> Self {
        self.instantiable = false;
        self
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the type can be instantiated
    pub fn is_instantiable(&self) -> bool {
        self.instantiable
    }

    /// Declared constructors in declaration order
    pub fn constructors(&self) -> &[Constructor<T, E>] {
        &self.constructors
    }
}

impl<T, E> Clone for TypeDescriptor<T, E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            instantiable: self.instantiable,
            constructors: self.constructors.clone(),
        }
    }
}

impl<T, E> fmt::Debug for TypeDescriptor<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("instantiable", &self.instantiable)
            .field("constructors", &self.constructors)
            .finish()
    }
}

/// Types that describe their own constructors
pub trait Constructible: Sized + 'static {
    /// Error raised by the type's own validation logic
    type Error: std::error::Error + 'static;

    /// Descriptor listing the declared constructors
    fn descriptor() -> TypeDescriptor<Self, Self::Error>;
}
