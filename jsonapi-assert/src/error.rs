use itertools::Itertools;
use thiserror::Error;

/// Failure of a single assertion call. The first failure aborts the whole call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssertError {
    #[error("Expected {name} to be {expected}; received {actual}")]
    TypeMismatch { name: String, expected: String, actual: String },
    #[error(
        "Expected {name} to have at least one of the following; {}",
        .fields.iter().join(", ")
    )]
    MissingRequiredAlternative { name: String, fields: Vec<&'static str> },
    #[error("Expected {name} to have field `{field}`")]
    MissingRequiredField { name: String, field: &'static str },
    #[error("{name} cannot have both `{first}` and `{second}` set")]
    ConflictingFields { name: String, first: &'static str, second: &'static str },
    #[error("Expected {name} to match one of {expected}; the last alternative failed: {last}")]
    UnionExhausted { name: String, expected: String, last: Box<AssertError> },
}

impl AssertError {
    pub fn type_mismatch(name: &str, expected: impl ToString, actual: impl ToString) -> Self {
        AssertError::TypeMismatch {
            name: name.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn missing_field(name: &str, field: &'static str) -> Self {
        AssertError::MissingRequiredField { name: name.into(), field }
    }

    /// The label (with field path) the error was raised for
    pub fn name(&self) -> &str {
        match self {
            AssertError::TypeMismatch { name, .. }
            | AssertError::MissingRequiredAlternative { name, .. }
            | AssertError::MissingRequiredField { name, .. }
            | AssertError::ConflictingFields { name, .. }
            | AssertError::UnionExhausted { name, .. } => name,
        }
    }
}

/// Raised while *building* a document schema, never while validating a document
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ConfigurationError {
    #[error(
        "Both the `data` validator ({data}) and the `meta` validator ({meta}) accept absence, so \
         a document without `data`, `errors` and `meta` could not be rejected"
    )]
    AbsencePermissiveDataAndMeta { data: String, meta: String },
}
