//! Assertions for JSON:API v1.0 documents.
//!
//! Every entity of the format (links, errors, resource identifiers, relationships, resources)
//! can be asserted out of an already decoded [`serde_json::Value`], and a whole document
//! assertion is derived from the assertions for its `data` and `meta` members:
//!
//! ```
//! use jsonapi_assert::assert::{natural_number, Assert};
//! use jsonapi_assert::model::document::document;
//! use serde_json::json;
//!
//! let schema = document(natural_number()).unwrap();
//! let doc = schema.assert_value("doc", &json!({ "data": 34 })).unwrap();
//! assert_eq!(doc.data, 34);
//! assert!(schema.assert_value("doc", &json!({ "data": 34.5 })).is_err());
//! assert!(schema.assert_value("doc", &json!({})).is_err());
//! ```

#[macro_use]
extern crate serde_derive;

#[macro_use]
mod macros;

pub use crate::error::{AssertError, ConfigurationError};

pub type Result<T> = std::result::Result<T, AssertError>;

pub mod assert;
pub mod error;
pub mod model;
pub mod rule;
pub mod shape;
