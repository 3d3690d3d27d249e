//! Validator combinators over an already decoded `serde_json::Value` tree.
//!
//! A validator is an [`Assert`]: a check that either returns a typed value or fails with an
//! [`AssertError`](crate::AssertError), carrying two static witnesses of the shapes it accepts
//! and produces. Members that are not set at all are passed as `None`, a JSON `null` as
//! `Some(&Value::Null)`.

pub mod combinator;
pub mod primitive;

pub use combinator::{
    array, dictionary, intersect, maybe, member, nested, not_maybe, object, or, Array,
    Dictionary, Intersect, Map, Maybe, Member, Nested, NotMaybe, ObjectSchema, Or,
};
pub use primitive::{
    boolean, integer, literal, natural_number, number, object_like, string, undefined,
    AssertBoolean, AssertInteger, AssertNaturalNumber, AssertNumber, AssertString,
    AssertUndefined, Literal, ObjectLike,
};

use crate::shape::Shape;
use crate::Result;
use log::trace;
use serde_json::{Map as JsonMap, Value};

static NULL: Value = Value::Null;

pub trait Assert {
    type Output;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output>;

    /// Shape of the input this assertion accepts
    fn accepts(&self) -> Shape;

    /// Shape of the value this assertion produces
    fn produces(&self) -> Shape { self.accepts() }

    /// Whether an absent member passes
    fn is_optional(&self) -> bool { false }

    /// Whether a JSON `null` passes
    fn is_nullable(&self) -> bool { false }

    fn assert_value(&self, name: &str, value: &Value) -> Result<Self::Output> {
        self.assert(name, Some(value))
    }

    fn map<F, T>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> T,
    {
        Map::new(self, f)
    }
}

impl<A: Assert + ?Sized> Assert for &A {
    type Output = A::Output;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        (**self).assert(name, value)
    }

    fn accepts(&self) -> Shape { (**self).accepts() }

    fn produces(&self) -> Shape { (**self).produces() }

    fn is_optional(&self) -> bool { (**self).is_optional() }

    fn is_nullable(&self) -> bool { (**self).is_nullable() }
}

/// A named entity type that knows how to assert itself out of a value tree
pub trait Schema: Sized {
    const NAME: &'static str;

    fn assert(name: &str, value: Option<&Value>) -> Result<Self>;

    /// The object shape of this entity, `produced` selects the output side
    fn describe(produced: bool) -> Shape;

    fn accepts() -> Shape { Self::describe(false) }

    fn produces() -> Shape { Self::describe(true) }
}

/// Whether `assert` lets an unset member through, either absent or `null`.
///
/// Pure inspection of the validator, usable before any value is validated.
pub fn absence_permissive<A: Assert + ?Sized>(assert: &A) -> bool {
    assert.is_optional() || assert.is_nullable()
}

/// The input to hand to an absence-permissive assertion for an unset member
pub(crate) fn absent_input<A: Assert + ?Sized>(assert: &A) -> Option<&'static Value> {
    if assert.is_optional() {
        None
    } else {
        Some(&NULL)
    }
}

pub(crate) fn is_set(value: Option<&Value>) -> bool { value.map_or(false, |v| !v.is_null()) }

pub(crate) fn member_path(name: &str, member: &str) -> String { format!("{}.{}", name, member) }

pub(crate) fn trace_unknown_members(name: &str, object: &JsonMap<String, Value>, known: &[&str]) {
    for key in object.keys().filter(|k| !known.contains(&k.as_str())) {
        trace!("ignoring unknown member `{}` of {}", key, name);
    }
}

/// Human readable kind and value of a candidate, used in `TypeMismatch` errors
pub(crate) fn describe(value: Option<&Value>) -> String {
    match value {
        None => "undefined".into(),
        Some(Value::Null) => "null".into(),
        Some(v @ Value::Bool(_)) => format!("boolean({})", v),
        Some(v @ Value::Number(_)) => format!("number({})", v),
        Some(v @ Value::String(_)) => format!("string({})", v),
        Some(v @ Value::Array(_)) => format!("array({})", v),
        Some(v @ Value::Object(_)) => format!("object({})", v),
    }
}

#[cfg(test)]
mod tests {
    use crate::assert::*;
    use crate::AssertError;
    use serde_json::json;

    #[test]
    fn absence_permissive_test() {
        assert!(!absence_permissive(&string()));
        assert!(!absence_permissive(&natural_number()));
        assert!(absence_permissive(&undefined()));
        assert!(absence_permissive(&maybe(number())));
        assert!(absence_permissive(&or(undefined(), undefined())));
        assert!(!absence_permissive(&intersect(maybe(string()), string())));
        assert!(absence_permissive(&literal(serde_json::Value::Null)));
        assert!(!absence_permissive(&literal("1.0")));
        assert!(!absence_permissive(&not_maybe(maybe(number()))));
    }

    #[test]
    fn describe_test() {
        assert_eq!(describe(None), "undefined");
        assert_eq!(describe(Some(&json!(null))), "null");
        assert_eq!(describe(Some(&json!(34.5))), "number(34.5)");
        assert_eq!(describe(Some(&json!("x"))), "string(\"x\")");
        assert_eq!(describe(Some(&json!([1]))), "array([1])");
    }

    #[test]
    fn map_test() {
        let len = string().map(|s| s.len());
        assert_eq!(len.assert_value("test", &json!("four")).unwrap(), 4);
        assert_eq!(len.accepts(), string().accepts());
        match len.assert_value("test", &json!(4)) {
            Err(AssertError::TypeMismatch { name, .. }) => assert_eq!(name, "test"),
            other => unreachable!("get: {:?}", other),
        }
    }
}
