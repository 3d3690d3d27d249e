use crate::assert::{maybe, nested, string};
use crate::model::link::{error_link_collection, ErrorLinks};
use crate::model::{meta, Meta};

pub type Errors = Vec<ErrorObject>;

schema! {
    /// Error location
    #[derive(Serialize, Debug, Clone, Default, Eq, PartialEq)]
    pub struct ErrorSource {
        /// JSON Pointer [RFC6901] to the value in the request document that caused the error
        #[serde(skip_serializing_if = "Option::is_none")]
        pointer: Option<String> = maybe(string()),
        /// Which URI query parameter caused the error
        #[serde(skip_serializing_if = "Option::is_none")]
        parameter: Option<String> = maybe(string()),
    }
}

schema! {
    /// JSON-API Error
    /// All fields are optional
    #[derive(Serialize, Debug, Clone, Default, PartialEq)]
    pub struct ErrorObject {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String> = maybe(string()),
        #[serde(skip_serializing_if = "Option::is_none")]
        links: Option<ErrorLinks> = maybe(error_link_collection()),
        /// HTTP status code, expressed as a string
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<String> = maybe(string()),
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String> = maybe(string()),
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String> = maybe(string()),
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String> = maybe(string()),
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<ErrorSource> = maybe(nested::<ErrorSource>()),
        #[serde(skip_serializing_if = "Option::is_none")]
        meta: Option<Meta> = maybe(meta()),
    }
}
