use itertools::Itertools;
use serde_json::Value;
use std::fmt;

/// Static description of the values an assertion accepts or produces
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Any,
    /// The member is not set at all
    Absent,
    Null,
    Boolean,
    Number,
    Integer,
    NaturalNumber,
    String,
    Literal(Value),
    Array(Box<Shape>),
    /// Arbitrary keys, every value of the inner shape
    Dictionary(Box<Shape>),
    Object(Vec<Field>),
    Union(Vec<Shape>),
    Intersection(Vec<Shape>),
    /// A named entity, see `Schema::shape` for its fields
    Named(&'static str),
}

/// A member of an object shape
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub shape: Shape,
    pub required: bool,
}

impl Field {
    pub fn new(name: impl ToString, shape: Shape, required: bool) -> Self {
        Self { name: name.to_string(), shape, required }
    }
}

impl Shape {
    /// Flattening union, duplicated alternatives are dropped
    pub fn union(shapes: impl IntoIterator<Item = Shape>) -> Shape {
        let mut flat: Vec<Shape> = Vec::new();
        for shape in shapes {
            let members = match shape {
                Shape::Union(inner) => inner,
                other => vec![other],
            };
            for member in members {
                if !flat.contains(&member) {
                    flat.push(member);
                }
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Shape::Union(flat)
        }
    }

    pub fn maybe(shape: Shape) -> Shape { Shape::union(vec![shape, Shape::Null, Shape::Absent]) }

    /// The shape without its `null` and `undefined` alternatives
    pub fn present(self) -> Shape {
        match self {
            Shape::Union(members) => Shape::union(
                members.into_iter().filter(|m| !matches!(m, Shape::Null | Shape::Absent)),
            ),
            other => other,
        }
    }

    /// Builds an object shape. When `produced` is set, members that can only ever be
    /// absent are left out instead of being advertised as optional.
    pub fn object(fields: Vec<Field>, produced: bool) -> Shape {
        Shape::Object(
            fields
                .into_iter()
                .filter(|f| !(produced && f.shape.is_absent_only()))
                .collect(),
        )
    }

    pub fn is_absent_only(&self) -> bool {
        match self {
            Shape::Absent => true,
            Shape::Union(members) => members.iter().all(Shape::is_absent_only),
            _ => false,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        match self {
            Shape::Object(fields) => fields.iter().find(|f| f.name == name),
            _ => None,
        }
    }

    fn is_compound(&self) -> bool {
        matches!(self, Shape::Union(_) | Shape::Intersection(_))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let optional = if self.required { "" } else { "?" };
        write!(f, "{}{}: {}", self.name, optional, self.shape)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Any => write!(f, "any"),
            Shape::Absent => write!(f, "undefined"),
            Shape::Null => write!(f, "null"),
            Shape::Boolean => write!(f, "boolean"),
            Shape::Number => write!(f, "number"),
            Shape::Integer => write!(f, "integer"),
            Shape::NaturalNumber => write!(f, "natural number"),
            Shape::String => write!(f, "string"),
            Shape::Literal(value) => write!(f, "{}", value),
            Shape::Array(inner) if inner.is_compound() => write!(f, "({})[]", inner),
            Shape::Array(inner) => write!(f, "{}[]", inner),
            Shape::Dictionary(inner) => write!(f, "{{ [field: string]: {} }}", inner),
            Shape::Object(fields) if fields.is_empty() => write!(f, "{{}}"),
            Shape::Object(fields) => write!(f, "{{ {} }}", fields.iter().join("; ")),
            Shape::Union(members) => write!(f, "{}", members.iter().join(" | ")),
            Shape::Intersection(members) => write!(
                f,
                "{}",
                members
                    .iter()
                    .map(|m| if m.is_compound() { format!("({})", m) } else { m.to_string() })
                    .join(" & ")
            ),
            Shape::Named(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::shape::{Field, Shape};

    #[test]
    fn union_flattens_and_dedups() {
        let shape = Shape::union(vec![
            Shape::String,
            Shape::maybe(Shape::Named("Link")),
            Shape::Null,
        ]);
        assert_eq!(
            shape,
            Shape::Union(vec![Shape::String, Shape::Named("Link"), Shape::Null, Shape::Absent])
        );
        assert_eq!(Shape::union(vec![Shape::Number, Shape::Number]), Shape::Number);
    }

    #[test]
    fn present_drops_null_and_undefined() {
        assert_eq!(Shape::maybe(Shape::String).present(), Shape::String);
        let either = Shape::maybe(Shape::union(vec![Shape::String, Shape::Named("Link")]));
        assert_eq!(either.present().to_string(), "string | Link");
        assert_eq!(Shape::Number.present(), Shape::Number);
    }

    #[test]
    fn produced_object_drops_absent_only_members() {
        let fields = vec![
            Field::new("data", Shape::Absent, false),
            Field::new("meta", Shape::Named("Meta"), true),
        ];
        let accepted = Shape::object(fields.clone(), false);
        let produced = Shape::object(fields, true);
        assert!(accepted.field("data").is_some());
        assert!(produced.field("data").is_none());
        assert_eq!(produced.to_string(), "{ meta: Meta }");
    }

    #[test]
    fn display_test() {
        let shape = Shape::object(
            vec![
                Field::new("href", Shape::String, true),
                Field::new("meta", Shape::maybe(Shape::Named("Meta")), false),
            ],
            false,
        );
        assert_eq!(shape.to_string(), "{ href: string; meta?: Meta | null | undefined }");

        let linkage = Shape::Array(Box::new(Shape::union(vec![Shape::String, Shape::Null])));
        assert_eq!(linkage.to_string(), "(string | null)[]");
        assert_eq!(Shape::Object(vec![]).to_string(), "{}");
        assert_eq!(
            Shape::Dictionary(Box::new(Shape::Any)).to_string(),
            "{ [field: string]: any }"
        );
    }
}
