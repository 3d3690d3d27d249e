use crate::assert::{
    absence_permissive, absent_input, describe, is_set, member_path, object_like,
    trace_unknown_members, Assert, Schema,
};
use crate::error::AssertError;
use crate::shape::{Field, Shape};
use crate::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;

/// Lets absent and `null` members through as `None`
#[derive(Debug, Clone)]
pub struct Maybe<A>(A);

pub fn maybe<A: Assert>(inner: A) -> Maybe<A> { Maybe(inner) }

impl<A: Assert> Assert for Maybe<A> {
    type Output = Option<A::Output>;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        if is_set(value) {
            self.0.assert(name, value).map(Some)
        } else {
            Ok(None)
        }
    }

    fn accepts(&self) -> Shape { Shape::maybe(self.0.accepts()) }

    fn produces(&self) -> Shape { Shape::maybe(self.0.produces()) }

    fn is_optional(&self) -> bool { true }

    fn is_nullable(&self) -> bool { true }
}

/// Insists on a set member, even around an assertion that would let it go
#[derive(Debug, Clone)]
pub struct NotMaybe<A>(A);

pub fn not_maybe<A: Assert>(inner: A) -> NotMaybe<A> { NotMaybe(inner) }

impl<A: Assert> Assert for NotMaybe<A> {
    type Output = A::Output;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        if is_set(value) {
            self.0.assert(name, value)
        } else {
            Err(AssertError::type_mismatch(name, self.accepts(), describe(value)))
        }
    }

    fn accepts(&self) -> Shape { self.0.accepts().present() }

    fn produces(&self) -> Shape { self.0.produces().present() }
}

/// First match wins
#[derive(Debug, Clone)]
pub struct Or<A, B>(A, B);

pub fn or<A, B>(first: A, second: B) -> Or<A, B>
where
    A: Assert,
    B: Assert<Output = A::Output>,
{
    Or(first, second)
}

impl<A, B> Assert for Or<A, B>
where
    A: Assert,
    B: Assert<Output = A::Output>,
{
    type Output = A::Output;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        match self.0.assert(name, value) {
            Ok(found) => Ok(found),
            Err(_) => self.1.assert(name, value).map_err(|last| AssertError::UnionExhausted {
                name: name.into(),
                expected: self.accepts().to_string(),
                last: Box::new(last),
            }),
        }
    }

    fn accepts(&self) -> Shape { Shape::union(vec![self.0.accepts(), self.1.accepts()]) }

    fn produces(&self) -> Shape { Shape::union(vec![self.0.produces(), self.1.produces()]) }

    fn is_optional(&self) -> bool { self.0.is_optional() || self.1.is_optional() }

    fn is_nullable(&self) -> bool { self.0.is_nullable() || self.1.is_nullable() }
}

/// Both assertions run against the same value
#[derive(Debug, Clone)]
pub struct Intersect<A, B>(A, B);

pub fn intersect<A: Assert, B: Assert>(first: A, second: B) -> Intersect<A, B> {
    Intersect(first, second)
}

impl<A: Assert, B: Assert> Assert for Intersect<A, B> {
    type Output = (A::Output, B::Output);

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        Ok((self.0.assert(name, value)?, self.1.assert(name, value)?))
    }

    fn accepts(&self) -> Shape { Shape::Intersection(vec![self.0.accepts(), self.1.accepts()]) }

    fn produces(&self) -> Shape {
        Shape::Intersection(vec![self.0.produces(), self.1.produces()])
    }

    fn is_optional(&self) -> bool { self.0.is_optional() && self.1.is_optional() }

    fn is_nullable(&self) -> bool { self.0.is_nullable() && self.1.is_nullable() }
}

/// Arbitrary keys, every value checked at `name[key]`
#[derive(Debug, Clone)]
pub struct Dictionary<A>(A);

pub fn dictionary<A: Assert>(inner: A) -> Dictionary<A> { Dictionary(inner) }

impl<A: Assert> Assert for Dictionary<A> {
    type Output = HashMap<String, A::Output>;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        object_like(name, value)?
            .iter()
            .map(|(key, item)| -> Result<(String, A::Output)> {
                let item = self.0.assert(&format!("{}[{}]", name, key), Some(item))?;
                Ok((key.clone(), item))
            })
            .collect()
    }

    fn accepts(&self) -> Shape { Shape::Dictionary(Box::new(self.0.accepts())) }

    fn produces(&self) -> Shape { Shape::Dictionary(Box::new(self.0.produces())) }
}

/// Ordered sequence, every element checked at `name[index]`
#[derive(Debug, Clone)]
pub struct Array<A>(A);

pub fn array<A: Assert>(inner: A) -> Array<A> { Array(inner) }

impl<A: Assert> Assert for Array<A> {
    type Output = Vec<A::Output>;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        match value {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.0.assert(&format!("{}[{}]", name, i), Some(item)))
                .collect(),
            other => Err(AssertError::type_mismatch(name, "an Array", describe(other))),
        }
    }

    fn accepts(&self) -> Shape { Shape::Array(Box::new(self.0.accepts())) }

    fn produces(&self) -> Shape { Shape::Array(Box::new(self.0.produces())) }
}

/// Delegates to the entity's own [`Schema`]
pub struct Nested<T>(PhantomData<fn() -> T>);

pub fn nested<T: Schema>() -> Nested<T> { Nested(PhantomData) }

impl<T> Clone for Nested<T> {
    fn clone(&self) -> Self { Nested(PhantomData) }
}

impl<T> std::fmt::Debug for Nested<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Nested<{}>", std::any::type_name::<T>())
    }
}

impl<T: Schema> Assert for Nested<T> {
    type Output = T;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        T::assert(name, value)
    }

    fn accepts(&self) -> Shape { Shape::Named(T::NAME) }
}

/// A single member of an object, the counterpart of an object field declaration
#[derive(Debug, Clone)]
pub struct Member<A> {
    key: &'static str,
    inner: A,
}

pub fn member<A: Assert>(key: &'static str, inner: A) -> Member<A> { Member { key, inner } }

impl<A: Assert> Assert for Member<A> {
    type Output = A::Output;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        let item = object_like(name, value)?.get(self.key);
        let path = member_path(name, self.key);
        if is_set(item) {
            self.inner.assert(&path, item)
        } else if absence_permissive(&self.inner) {
            self.inner.assert(&path, absent_input(&self.inner))
        } else {
            Err(AssertError::missing_field(name, self.key))
        }
    }

    fn accepts(&self) -> Shape {
        Shape::object(
            vec![Field::new(self.key, self.inner.accepts(), !absence_permissive(&self.inner))],
            false,
        )
    }

    fn produces(&self) -> Shape {
        Shape::object(
            vec![Field::new(self.key, self.inner.produces(), !absence_permissive(&self.inner))],
            true,
        )
    }
}

/// Result of [`Assert::map`]
#[derive(Debug, Clone)]
pub struct Map<A, F> {
    inner: A,
    f: F,
}

impl<A, F> Map<A, F> {
    pub(crate) fn new(inner: A, f: F) -> Self { Self { inner, f } }
}

impl<A, F, T> Assert for Map<A, F>
where
    A: Assert,
    F: Fn(A::Output) -> T,
{
    type Output = T;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        self.inner.assert(name, value).map(&self.f)
    }

    fn accepts(&self) -> Shape { self.inner.accepts() }

    fn produces(&self) -> Shape { self.inner.produces() }

    fn is_optional(&self) -> bool { self.inner.is_optional() }

    fn is_nullable(&self) -> bool { self.inner.is_nullable() }
}

/// Object-safe face of an [`Assert`] whose output can be turned back into JSON
trait JsonAssert: Send + Sync {
    fn assert_json(&self, name: &str, value: Option<&Value>) -> Result<Value>;
    fn accepted_shape(&self) -> Shape;
    fn produced_shape(&self) -> Shape;
    fn is_absence_permissive(&self) -> bool;
    fn unset_input(&self) -> Option<&'static Value>;
}

impl<A> JsonAssert for A
where
    A: Assert + Send + Sync,
    A::Output: Serialize,
{
    fn assert_json(&self, name: &str, value: Option<&Value>) -> Result<Value> {
        let output = Assert::assert(self, name, value)?;
        serde_json::to_value(output).map_err(|err| {
            AssertError::type_mismatch(name, "a JSON serializable value", err)
        })
    }

    fn accepted_shape(&self) -> Shape { Assert::accepts(self) }

    fn produced_shape(&self) -> Shape { Assert::produces(self) }

    fn is_absence_permissive(&self) -> bool { absence_permissive(self) }

    fn unset_input(&self) -> Option<&'static Value> { absent_input(self) }
}

/// Object validator built at runtime from a field-name to validator table.
///
/// Produces a JSON object holding the validated members; unset members are left out.
#[derive(Default)]
pub struct ObjectSchema {
    fields: Vec<(&'static str, Box<dyn JsonAssert>)>,
}

pub fn object() -> ObjectSchema { ObjectSchema::default() }

impl ObjectSchema {
    pub fn field<A>(mut self, key: &'static str, assert: A) -> Self
    where
        A: Assert + Send + Sync + 'static,
        A::Output: Serialize,
    {
        self.fields.push((key, Box::new(assert)));
        self
    }

    fn describe(&self, produced: bool) -> Shape {
        let fields = self
            .fields
            .iter()
            .map(|(key, assert)| {
                let shape =
                    if produced { assert.produced_shape() } else { assert.accepted_shape() };
                Field::new(key, shape, !assert.is_absence_permissive())
            })
            .collect();
        Shape::object(fields, produced)
    }
}

impl Assert for ObjectSchema {
    type Output = serde_json::Map<String, Value>;

    fn assert(&self, name: &str, value: Option<&Value>) -> Result<Self::Output> {
        let object = object_like(name, value)?;
        let known: Vec<&str> = self.fields.iter().map(|(key, _)| *key).collect();
        trace_unknown_members(name, object, &known);

        let mut output = serde_json::Map::new();
        for (key, assert) in &self.fields {
            let path = member_path(name, key);
            let item = object.get(*key);
            if is_set(item) {
                output.insert(key.to_string(), assert.assert_json(&path, item)?);
            } else if assert.is_absence_permissive() {
                assert.assert_json(&path, assert.unset_input())?;
            } else {
                return Err(AssertError::missing_field(name, *key));
            }
        }
        Ok(output)
    }

    fn accepts(&self) -> Shape { self.describe(false) }

    fn produces(&self) -> Shape { self.describe(true) }
}
