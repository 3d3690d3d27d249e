use crate::assert::{describe, Assert};
use crate::error::AssertError;
use crate::shape::Shape;
use crate::Result;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Guard for object-like containers: anything but a JSON object is rejected
pub fn object_like<'a>(name: &str, value: Option<&'a Value>) -> Result<&'a Map<String, Value>> {
    match value {
        Some(Value::Object(map)) => Ok(map),
        other => Err(AssertError::type_mismatch(name, "an Object", describe(other))),
    }
}

/// [`object_like`] as an assertion, producing an open string-keyed mapping
#[derive(Debug, Clone, Copy)]
pub struct ObjectLike(pub(crate) &'static str);

impl Assert for ObjectLike {
    type Output = HashMap<String, Value>;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        let map = object_like(name, value)?;
        Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }

    fn accepts(&self) -> Shape { Shape::Named(self.0) }
}

#[derive(Debug, Clone, Copy)]
pub struct AssertString;

pub fn string() -> AssertString { AssertString }

impl Assert for AssertString {
    type Output = String;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        match value {
            Some(Value::String(s)) => Ok(s.clone()),
            other => Err(AssertError::type_mismatch(name, "a string", describe(other))),
        }
    }

    fn accepts(&self) -> Shape { Shape::String }
}

#[derive(Debug, Clone, Copy)]
pub struct AssertBoolean;

pub fn boolean() -> AssertBoolean { AssertBoolean }

impl Assert for AssertBoolean {
    type Output = bool;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        match value {
            Some(Value::Bool(b)) => Ok(*b),
            other => Err(AssertError::type_mismatch(name, "a boolean", describe(other))),
        }
    }

    fn accepts(&self) -> Shape { Shape::Boolean }
}

#[derive(Debug, Clone, Copy)]
pub struct AssertNumber;

pub fn number() -> AssertNumber { AssertNumber }

impl Assert for AssertNumber {
    type Output = f64;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        match value.and_then(Value::as_f64) {
            Some(n) => Ok(n),
            None => Err(AssertError::type_mismatch(name, "a number", describe(value))),
        }
    }

    fn accepts(&self) -> Shape { Shape::Number }
}

/// 2^63 and 2^64: the smallest floats past `i64::MAX` and `u64::MAX`
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

/// Integral value of a number, also for floats like `34.0`
fn integral(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite() && n.fract() == 0.0)
}

#[derive(Debug, Clone, Copy)]
pub struct AssertInteger;

pub fn integer() -> AssertInteger { AssertInteger }

impl Assert for AssertInteger {
    type Output = i64;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        let found = value.and_then(|v| {
            v.as_i64().or_else(|| {
                integral(v)
                    .filter(|n| *n >= -I64_BOUND && *n < I64_BOUND)
                    .map(|n| n as i64)
            })
        });
        found.ok_or_else(|| AssertError::type_mismatch(name, "an integer", describe(value)))
    }

    fn accepts(&self) -> Shape { Shape::Integer }
}

#[derive(Debug, Clone, Copy)]
pub struct AssertNaturalNumber;

/// Non-negative integers
pub fn natural_number() -> AssertNaturalNumber { AssertNaturalNumber }

impl Assert for AssertNaturalNumber {
    type Output = u64;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        let found = value.and_then(|v| {
            v.as_u64().or_else(|| {
                integral(v).filter(|n| *n >= 0.0 && *n < U64_BOUND).map(|n| n as u64)
            })
        });
        found.ok_or_else(|| AssertError::type_mismatch(name, "a natural number", describe(value)))
    }

    fn accepts(&self) -> Shape { Shape::NaturalNumber }
}

/// Only lets an absent member through
#[derive(Debug, Clone, Copy)]
pub struct AssertUndefined;

pub fn undefined() -> AssertUndefined { AssertUndefined }

impl Assert for AssertUndefined {
    type Output = ();

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        match value {
            None => Ok(()),
            other => Err(AssertError::type_mismatch(name, "undefined", describe(other))),
        }
    }

    fn accepts(&self) -> Shape { Shape::Absent }

    fn is_optional(&self) -> bool { true }
}

#[derive(Debug, Clone)]
pub struct Literal<T>(T);

pub fn literal<T: Clone + Into<Value>>(expected: T) -> Literal<T> { Literal(expected) }

impl<T: Clone + Into<Value>> Assert for Literal<T> {
    type Output = T;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        let expected: Value = self.0.clone().into();
        match value {
            Some(v) if *v == expected => Ok(self.0.clone()),
            other => Err(AssertError::type_mismatch(name, expected, describe(other))),
        }
    }

    fn accepts(&self) -> Shape { Shape::Literal(self.0.clone().into()) }

    fn is_nullable(&self) -> bool {
        let expected: Value = self.0.clone().into();
        expected.is_null()
    }
}
