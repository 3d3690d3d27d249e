pub mod document;
pub mod error;
pub mod link;
pub mod relationship;
pub mod resource;

use crate::assert::{literal, maybe, ObjectLike};
use serde_json::Value;
use std::collections::HashMap;

/// Meta-data object, can contain any data
pub type Meta = HashMap<String, Value>;

// TODO: reject the reserved `relationships` and `links` members inside attribute values
/// Attributes of a resource, can contain any data
pub type Attributes = HashMap<String, Value>;

pub const JSON_API_VERSION: &str = "1.0";

/// Asserts a [`Meta`] object
pub fn meta() -> ObjectLike { ObjectLike("Meta") }

/// Asserts an [`Attributes`] object
pub fn attributes() -> ObjectLike { ObjectLike("AttributeCollection") }

schema! {
    /// Optional top-level `jsonapi` member describing the implemented JSON:API version
    #[derive(Serialize, Debug, Clone, Default, PartialEq)]
    pub struct JsonApi {
        #[serde(skip_serializing_if = "Option::is_none")]
        version: Option<&'static str> = maybe(literal(JSON_API_VERSION)),
        #[serde(skip_serializing_if = "Option::is_none")]
        meta: Option<Meta> = maybe(meta()),
    }
}

#[cfg(test)]
mod tests {
    use crate::assert::Schema;
    use crate::model::JsonApi;
    use crate::AssertError;
    use serde_json::json;

    #[test]
    fn jsonapi_test() {
        let info = JsonApi::assert("jsonapi", Some(&json!({ "version": "1.0" }))).unwrap();
        assert_eq!(info.version, Some("1.0"));
        assert_eq!(serde_json::to_value(&info).unwrap(), json!({ "version": "1.0" }));

        match JsonApi::assert("jsonapi", Some(&json!({ "version": "1.1" }))) {
            Err(AssertError::TypeMismatch { name, .. }) => assert_eq!(name, "jsonapi.version"),
            other => unreachable!("get: {:?}", other),
        }
        match JsonApi::assert("jsonapi", Some(&json!({ "meta": [] }))) {
            Err(AssertError::TypeMismatch { name, expected, .. }) => {
                assert_eq!(name, "jsonapi.meta");
                assert_eq!(expected, "an Object");
            },
            other => unreachable!("get: {:?}", other),
        }
    }

    #[test]
    fn jsonapi_shape_test() {
        assert_eq!(
            JsonApi::accepts().to_string(),
            "{ version?: \"1.0\" | null | undefined; meta?: Meta | null | undefined }"
        );
    }
}
