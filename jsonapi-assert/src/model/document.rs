//! Top-level document assembly.
//!
//! A [`DocumentSchema`] is derived from two caller supplied assertions, one for the `data`
//! member and one for the `meta` member. Whether each of them can be left out of a document is
//! decided once, when the schema is built, by asking the assertions themselves
//! ([`absence_permissive`]):
//!
//! - an absence-permissive assertion keeps its member optional, and the member disappears from
//!   the produced shape altogether when the assertion can only ever see it absent
//!   ([`undefined`](crate::assert::undefined));
//! - any other assertion makes its member required;
//! - both being absence-permissive is rejected with a [`ConfigurationError`], as such a schema
//!   could not enforce that a document has at least one of `data`, `errors` or `meta`.
//!
//! Validation runs in a fixed order: the members one by one, then the required members, then
//! the "at least one of" rule, then the exclusion of `data` and `errors`.

use crate::assert::{
    absence_permissive, absent_input, array, is_set, maybe, member_path, nested, object_like,
    trace_unknown_members, Assert, Maybe, Nested, ObjectLike,
};
use crate::error::{AssertError, ConfigurationError};
use crate::model::error::{ErrorObject, Errors};
use crate::model::link::{link_collection, Links};
use crate::model::resource::{Resource, ServerResource};
use crate::model::{meta, JsonApi};
use crate::rule::{
    DataAndErrorsMustNotCoexist, DocumentMustHaveTopLevelMember, Rule, TopLevelMembers,
};
use crate::shape::{Field, Shape};
use log::{debug, warn};
use serde::ser::{Error as _, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_json::Value;

const TOP_LEVEL_MEMBERS: [&str; 6] = ["data", "errors", "meta", "jsonapi", "links", "included"];

/// A JSON:API top-level `document`.
///
/// `data` and `meta` have exactly the output types of the assertions the schema was built with:
/// a required member is a plain value, an optional one an `Option` (or `()` for a member that is
/// never set).
#[derive(Debug, Clone, PartialEq)]
pub struct Document<D, M, R = Resource> {
    pub data: D,
    pub errors: Option<Errors>,
    pub meta: M,
    pub jsonapi: Option<JsonApi>,
    pub links: Option<Links>,
    pub included: Option<Vec<R>>,
}

/// A document whose included resources all carry an `id`
pub type ServerDocument<D, M> = Document<D, M, ServerResource>;

impl<D, M, R> Serialize for Document<D, M, R>
where
    D: Serialize,
    M: Serialize,
    R: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = serde_json::to_value(&self.data).map_err(S::Error::custom)?;
        let meta = serde_json::to_value(&self.meta).map_err(S::Error::custom)?;
        let len = [
            !data.is_null(),
            self.errors.is_some(),
            !meta.is_null(),
            self.jsonapi.is_some(),
            self.links.is_some(),
            self.included.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();

        let mut state = serializer.serialize_struct("Document", len)?;
        if !data.is_null() {
            state.serialize_field("data", &data)?;
        }
        if let Some(ref errors) = self.errors {
            state.serialize_field("errors", errors)?;
        }
        if !meta.is_null() {
            state.serialize_field("meta", &meta)?;
        }
        if let Some(ref jsonapi) = self.jsonapi {
            state.serialize_field("jsonapi", jsonapi)?;
        }
        if let Some(ref links) = self.links {
            state.serialize_field("links", links)?;
        }
        if let Some(ref included) = self.included {
            state.serialize_field("included", included)?;
        }
        state.end()
    }
}

/// Assertion for a whole document, see the [module documentation](self)
#[derive(Debug, Clone)]
pub struct DocumentSchema<D, M, I> {
    data: D,
    meta: M,
    included: I,
    data_required: bool,
    meta_required: bool,
}

pub type ResourceDocumentSchema<D, M> = DocumentSchema<D, M, Nested<Resource>>;
pub type ServerDocumentSchema<D, M> = DocumentSchema<D, M, Nested<ServerResource>>;

/// Document whose `meta` member is any optional meta object
pub fn document<D: Assert>(
    data: D,
) -> Result<ResourceDocumentSchema<D, Maybe<ObjectLike>>, ConfigurationError> {
    DocumentSchema::new(data, maybe(meta()), nested())
}

pub fn document_with_meta<D: Assert, M: Assert>(
    data: D, meta: M,
) -> Result<ResourceDocumentSchema<D, M>, ConfigurationError> {
    DocumentSchema::new(data, meta, nested())
}

/// Like [`document`], but every included resource must carry an `id`
pub fn server_document<D: Assert>(
    data: D,
) -> Result<ServerDocumentSchema<D, Maybe<ObjectLike>>, ConfigurationError> {
    DocumentSchema::new(data, maybe(meta()), nested())
}

pub fn server_document_with_meta<D: Assert, M: Assert>(
    data: D, meta: M,
) -> Result<ServerDocumentSchema<D, M>, ConfigurationError> {
    DocumentSchema::new(data, meta, nested())
}

fn errors() -> impl Assert<Output = Option<Errors>> { maybe(array(nested::<ErrorObject>())) }

fn jsonapi() -> impl Assert<Output = Option<JsonApi>> { maybe(nested::<JsonApi>()) }

fn links() -> impl Assert<Output = Option<Links>> { maybe(link_collection()) }

/// Runs `assert` on a member of the superstructure.
///
/// `None` means the member is unset and its assertion does not allow that; reporting it is left
/// to the required-member pass.
fn superstructure_member<A: Assert>(
    assert: &A, name: &str, key: &str, value: Option<&Value>,
) -> crate::Result<Option<A::Output>> {
    let path = member_path(name, key);
    if is_set(value) {
        assert.assert(&path, value).map(Some)
    } else if absence_permissive(assert) {
        assert.assert(&path, absent_input(assert)).map(Some)
    } else {
        Ok(None)
    }
}

impl<D: Assert, M: Assert, I: Assert> DocumentSchema<D, M, I> {
    fn new(data: D, meta: M, included: I) -> Result<Self, ConfigurationError> {
        let data_required = !absence_permissive(&data);
        let meta_required = !absence_permissive(&meta);
        if !data_required && !meta_required {
            let err = ConfigurationError::AbsencePermissiveDataAndMeta {
                data: data.accepts().to_string(),
                meta: meta.accepts().to_string(),
            };
            warn!("{}", err);
            return Err(err);
        }
        debug!(
            "document schema with `{}` included: `data` required: {}, `meta` required: {}",
            included.accepts(),
            data_required,
            meta_required
        );
        Ok(Self { data, meta, included, data_required, meta_required })
    }

    pub fn is_data_required(&self) -> bool { self.data_required }

    pub fn is_meta_required(&self) -> bool { self.meta_required }

    fn describe(&self, produced: bool) -> Shape {
        fn field<A: Assert>(key: &str, assert: &A, required: bool, produced: bool) -> Field {
            let shape = if produced { assert.produces() } else { assert.accepts() };
            Field::new(key, shape, required)
        }

        let included = maybe(array(&self.included));
        Shape::object(
            vec![
                field("data", &self.data, self.data_required, produced),
                field("errors", &errors(), false, produced),
                field("meta", &self.meta, self.meta_required, produced),
                field("jsonapi", &jsonapi(), false, produced),
                field("links", &links(), false, produced),
                field("included", &included, false, produced),
            ],
            produced,
        )
    }
}

impl<D: Assert, M: Assert, I: Assert> Assert for DocumentSchema<D, M, I> {
    type Output = Document<D::Output, M::Output, I::Output>;

    fn assert(&self, name: &str, value: Option<&Value>) -> crate::Result<Self::Output> {
        let object = object_like(name, value)?;
        trace_unknown_members(name, object, &TOP_LEVEL_MEMBERS);

        let data = superstructure_member(&self.data, name, "data", object.get("data"))?;
        let errors = errors().assert(&member_path(name, "errors"), object.get("errors"))?;
        let meta = superstructure_member(&self.meta, name, "meta", object.get("meta"))?;
        let jsonapi = jsonapi().assert(&member_path(name, "jsonapi"), object.get("jsonapi"))?;
        let links = links().assert(&member_path(name, "links"), object.get("links"))?;
        let included = maybe(array(&self.included))
            .assert(&member_path(name, "included"), object.get("included"))?;

        let data = data.ok_or_else(|| AssertError::missing_field(name, "data"))?;
        let meta = meta.ok_or_else(|| AssertError::missing_field(name, "meta"))?;

        let members = TopLevelMembers::of(object);
        DocumentMustHaveTopLevelMember::check(name, &members)?;
        DataAndErrorsMustNotCoexist::check(name, &members)?;

        Ok(Document { data, errors, meta, jsonapi, links, included })
    }

    fn accepts(&self) -> Shape { self.describe(false) }

    fn produces(&self) -> Shape { self.describe(true) }
}

#[cfg(test)]
mod tests {
    use crate::assert::{natural_number, number, undefined, Assert};
    use crate::model::document::*;
    use serde_json::json;

    #[test]
    fn required_members_follow_the_assertions() {
        let data_only = document(natural_number()).unwrap();
        assert!(data_only.is_data_required());
        assert!(!data_only.is_meta_required());

        let meta_only = document_with_meta(undefined(), meta()).unwrap();
        assert!(!meta_only.is_data_required());
        assert!(meta_only.is_meta_required());

        let both = server_document_with_meta(number(), meta()).unwrap();
        assert!(both.is_data_required() && both.is_meta_required());
    }

    #[test]
    fn both_absence_permissive_is_a_configuration_error() {
        assert!(matches!(
            document(maybe(number())),
            Err(ConfigurationError::AbsencePermissiveDataAndMeta { .. })
        ));
        assert!(document_with_meta(undefined(), maybe(meta())).is_err());
        assert!(server_document(undefined()).is_err());
    }

    #[test]
    fn shapes_test() {
        let schema = document_with_meta(undefined(), meta()).unwrap();
        let accepted = schema.accepts();
        let produced = schema.produces();
        assert!(!accepted.field("data").unwrap().required);
        assert!(produced.field("data").is_none());
        assert!(produced.field("meta").unwrap().required);
        assert_eq!(
            produced.field("included").unwrap().shape,
            Shape::maybe(Shape::Array(Box::new(Shape::Named("Resource"))))
        );

        let schema = server_document(natural_number()).unwrap();
        let produced = schema.produces();
        assert_eq!(produced.field("data").unwrap().to_string(), "data: natural number");
        assert_eq!(
            produced.field("included").unwrap().to_string(),
            "included?: ServerResource[] | null | undefined"
        );
    }

    #[test]
    fn it_omits_unset_members() {
        let schema = document_with_meta(undefined(), meta()).unwrap();
        let doc = schema.assert_value("doc", &json!({ "meta": { "total": 1 } })).unwrap();
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"meta":{"total":1}}"#);

        let schema = document(natural_number()).unwrap();
        let doc = schema.assert_value("doc", &json!({ "data": 34, "meta": null })).unwrap();
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"data":34}"#);
    }
}
