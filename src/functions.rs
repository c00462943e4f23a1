//! Small general purpose functions
//!
//! Text and numeric conversions plus named predicates with `not`, `and` and
//! `or` combinators. Combinators take `Option<Predicate<T>>` so an absent
//! operand is rejected when the predicates are combined, before anything is
//! evaluated.

use std::fmt;
use std::num::ParseIntError;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Render a value as text, `"null"` when absent
pub fn to_text<T: fmt::Display + ?Sized>(value: Option<&T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}

/// Parse a decimal `i32`
pub fn parse_int(value: &str) -> Result<i32, ParseIntError> {
    value.trim().parse()
}

/// Boxed 64-bit float
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Float64(pub f64);

/// Boxed 64-bit integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Integer64(pub i64);

impl From<f64> for Float64 {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Float64> for f64 {
    fn from(value: Float64) -> Self {
        value.0
    }
}

impl From<i64> for Integer64 {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Integer64> for i64 {
    fn from(value: Integer64) -> Self {
        value.0
    }
}

/// Unbox a [`Float64`]
pub fn float64_to_f64(value: Float64) -> f64 {
    value.into()
}

/// Box an `f64`
pub fn f64_to_float64(value: f64) -> Float64 {
    value.into()
}

/// Unbox an [`Integer64`]
pub fn integer64_to_i64(value: Integer64) -> i64 {
    value.into()
}

/// Box an `i64`
pub fn i64_to_integer64(value: i64) -> Integer64 {
    value.into()
}

/// Named single-argument boolean function
pub struct Predicate<T: ?Sized> {
    name: String,
    test: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: ?Sized> Predicate<T> {
    /// Create a named predicate
    pub fn new<F>(name: impl Into<String>, test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            test: Arc::new(test),
        }
    }

    /// Evaluate the predicate
    pub fn test(&self, value: &T) -> bool {
        (self.test)(value)
    }

    /// Predicate name, including the names of combined operands
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: ?Sized> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            test: Arc::clone(&self.test),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").field("name", &self.name).finish()
    }
}

impl<T: ?Sized> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Predicate that holds for absent values
pub fn is_none<T: 'static>() -> Predicate<Option<T>> {
    Predicate::new("Null", |value: &Option<T>| value.is_none())
}

/// Negate a predicate
pub fn not<T: ?Sized + 'static>(
    a: Option<Predicate<T>>,
) -> Result<Predicate<T>, ConfigurationError> {
    let a = a.ok_or(ConfigurationError::MissingPredicate("not: operand"))?;
    Ok(Predicate::new(format!("Not[{}]", a), move |value: &T| {
        !a.test(value)
    }))
}

/// Conjunction of two predicates, short-circuiting on the first
pub fn and<T: ?Sized + 'static>(
    a: Option<Predicate<T>>,
    b: Option<Predicate<T>>,
) -> Result<Predicate<T>, ConfigurationError> {
    let a = a.ok_or(ConfigurationError::MissingPredicate("and: first operand"))?;
    let b = b.ok_or(ConfigurationError::MissingPredicate("and: second operand"))?;
    Ok(Predicate::new(
        format!("And[{}, {}]", a, b),
        move |value: &T| a.test(value) && b.test(value),
    ))
}

/// Disjunction of two predicates, short-circuiting on the first
pub fn or<T: ?Sized + 'static>(
    a: Option<Predicate<T>>,
    b: Option<Predicate<T>>,
) -> Result<Predicate<T>, ConfigurationError> {
    let a = a.ok_or(ConfigurationError::MissingPredicate("or: first operand"))?;
    let b = b.ok_or(ConfigurationError::MissingPredicate("or: second operand"))?;
    Ok(Predicate::new(
        format!("Or[{}, {}]", a, b),
        move |value: &T| a.test(value) || b.test(value),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn positive() -> Predicate<f64> {
        Predicate::new("Positive", |v: &f64| *v > 0.0)
    }

    fn small() -> Predicate<f64> {
        Predicate::new("Small", |v: &f64| v.abs() < 10.0)
    }

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(Some(&42)), "42");
        assert_eq!(to_text(Some("abc")), "abc");
        assert_eq!(to_text::<i32>(None), "null");
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("17"), Ok(17));
        assert_eq!(parse_int(" -3 "), Ok(-3));
        assert!(parse_int("3.5").is_err());
        assert!(parse_int("99999999999").is_err());
    }

    #[test]
    fn test_boxed_conversions() {
        assert_eq!(float64_to_f64(f64_to_float64(1.5)), 1.5);
        assert_eq!(integer64_to_i64(i64_to_integer64(-9)), -9);
        assert_eq!(serde_json::to_string(&Float64(0.25)).unwrap(), "0.25");
    }

    #[test]
    fn test_is_none() {
        let p = is_none::<u8>();
        assert!(p.test(&None));
        assert!(!p.test(&Some(1)));
        assert_eq!(p.to_string(), "Null");
    }

    #[test]
    fn test_not() {
        let p = not(Some(positive())).unwrap();
        assert!(p.test(&-1.0));
        assert!(!p.test(&1.0));
        assert_eq!(p.name(), "Not[Positive]");
    }

    #[test]
    fn test_and_or() {
        let both = and(Some(positive()), Some(small())).unwrap();
        assert!(both.test(&5.0));
        assert!(!both.test(&50.0));
        assert!(!both.test(&-5.0));
        assert_eq!(both.to_string(), "And[Positive, Small]");

        let either = or(Some(positive()), Some(small())).unwrap();
        assert!(either.test(&50.0));
        assert!(either.test(&-5.0));
        assert!(!either.test(&-50.0));
        assert_eq!(either.to_string(), "Or[Positive, Small]");
    }

    #[test]
    fn test_nested_names() {
        let p = not(Some(and(Some(positive()), Some(small())).unwrap())).unwrap();
        assert_eq!(p.name(), "Not[And[Positive, Small]]");
    }

    #[test]
    fn test_missing_operand_rejected_before_evaluation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counted = Predicate::new("Counted", move |_: &f64| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        assert_eq!(
            and(Some(counted.clone()), None).unwrap_err(),
            ConfigurationError::MissingPredicate("and: second operand")
        );
        assert!(or(None, Some(counted)).is_err());
        assert!(not::<f64>(None).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_short_circuit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counted = Predicate::new("Counted", move |_: &f64| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        let p = and(Some(positive()), Some(counted)).unwrap();
        assert!(!p.test(&-1.0));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
