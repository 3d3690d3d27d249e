use crate::assert::{array, maybe, nested, or, string, Assert, Schema};
use crate::model::link::{link_collection, Links};
use crate::model::relationship::Relationship;
use crate::model::{attributes, meta, Attributes, Meta};
use crate::rule::{Rule, ServerResourceMustHaveId};
use crate::shape::{Field, Shape};
use serde_json::Value;

pub type ResourceIdentifiers = Vec<ResourceIdentifier>;
pub type Resources = Vec<Resource>;

schema! {
    /// Resource Identifier
    #[derive(Serialize, Debug, Clone, Eq, PartialEq)]
    pub struct ResourceIdentifier {
        #[serde(rename = "type")]
        ty as "type": String = string(),
        id: String = string(),
        #[serde(skip_serializing_if = "Option::is_none")]
        meta: Option<Meta> = maybe(meta()),
    }
}

impl ResourceIdentifier {
    pub fn new(ty: &str, id: &str) -> Self { Self { ty: ty.into(), id: id.into(), meta: None } }
}

/// Resource linkage of a relationship: a single identifier or an ordered list of them
#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(untagged)]
pub enum ResourceLinkage {
    Single(ResourceIdentifier),
    Multiple(ResourceIdentifiers),
}

impl ResourceLinkage {
    pub fn data(&self) -> Vec<&ResourceIdentifier> {
        match self {
            ResourceLinkage::Single(id) => vec![id],
            ResourceLinkage::Multiple(ids) => ids.iter().collect(),
        }
    }
}

pub fn resource_linkage() -> impl Assert<Output = ResourceLinkage> {
    or(
        nested::<ResourceIdentifier>().map(ResourceLinkage::Single),
        array(nested::<ResourceIdentifier>()).map(ResourceLinkage::Multiple),
    )
}

schema! {
    /// JSON-API Resource
    ///
    /// `id` may be missing when the resource originates at the client and is about to be
    /// created on the server.
    #[derive(Serialize, Debug, Clone, Default, PartialEq)]
    pub struct Resource {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String> = maybe(string()),
        #[serde(rename = "type")]
        ty as "type": String = string(),
        #[serde(skip_serializing_if = "Option::is_none")]
        attributes: Option<Attributes> = maybe(attributes()),
        #[serde(skip_serializing_if = "Option::is_none")]
        relationships: Option<Relationship> = maybe(nested::<Relationship>()),
        #[serde(skip_serializing_if = "Option::is_none")]
        links: Option<Links> = maybe(link_collection()),
        #[serde(skip_serializing_if = "Option::is_none")]
        meta: Option<Meta> = maybe(meta()),
    }
}

impl Resource {
    pub fn is_resource_id(&self, id: &ResourceIdentifier) -> bool {
        self.ty == id.ty && self.id.as_ref() == Some(&id.id)
    }
}

/// A [`Resource`] originating on the server, whose `id` is always known
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ServerResource {
    pub id: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Relationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl ServerResource {
    pub fn to_resource_identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(&self.ty, &self.id)
    }
}

impl Schema for ServerResource {
    const NAME: &'static str = "ServerResource";

    fn assert(name: &str, value: Option<&Value>) -> crate::Result<Self> {
        let resource = Resource::assert(name, value)?;
        ServerResourceMustHaveId::check(name, &resource)?;
        let Resource { id, ty, attributes, relationships, links, meta } = resource;
        Ok(ServerResource {
            id: id.unwrap_or_default(),
            ty,
            attributes,
            relationships,
            links,
            meta,
        })
    }

    fn describe(produced: bool) -> Shape {
        let id = Shape::object(vec![Field::new("id", string().accepts(), true)], produced);
        Shape::Intersection(vec![Shape::Named(Resource::NAME), id])
    }
}

impl From<ServerResource> for Resource {
    fn from(resource: ServerResource) -> Self {
        let ServerResource { id, ty, attributes, relationships, links, meta } = resource;
        Resource { id: Some(id), ty, attributes, relationships, links, meta }
    }
}

#[cfg(test)]
mod tests {
    use crate::assert::{Assert, Schema};
    use crate::model::resource::*;
    use crate::AssertError;
    use serde_json::json;

    #[test]
    fn resource_identifier_round_trip() {
        for (ty, id) in vec![("people", "9"), ("articles", "1"), ("", "")] {
            let value = json!({ "type": ty, "id": id });
            let identifier = ResourceIdentifier::assert("id", Some(&value)).unwrap();
            assert_eq!(identifier, ResourceIdentifier::new(ty, id));
            assert_eq!(serde_json::to_value(&identifier).unwrap(), value);
        }
    }

    #[test]
    fn resource_identifier_needs_type_and_id() {
        match ResourceIdentifier::assert("id", Some(&json!({ "id": "1" }))) {
            Err(AssertError::TypeMismatch { name, .. }) => assert_eq!(name, "id.type"),
            other => unreachable!("get: {:?}", other),
        }
        match ResourceIdentifier::assert("id", Some(&json!({ "type": "people", "id": 1 }))) {
            Err(AssertError::TypeMismatch { name, .. }) => assert_eq!(name, "id.id"),
            other => unreachable!("get: {:?}", other),
        }
    }

    #[test]
    fn resource_linkage_test() {
        let single = resource_linkage()
            .assert_value("data", &json!({ "type": "people", "id": "9" }))
            .unwrap();
        assert_eq!(single.data(), vec![&ResourceIdentifier::new("people", "9")]);

        let empty = resource_linkage().assert_value("data", &json!([])).unwrap();
        assert_eq!(empty, ResourceLinkage::Multiple(vec![]));

        match resource_linkage().assert_value("data", &json!([{ "type": "people" }])) {
            Err(AssertError::UnionExhausted { name, last, .. }) => {
                assert_eq!(name, "data");
                assert_eq!(last.name(), "data[0].id");
            },
            other => unreachable!("get: {:?}", other),
        }
    }

    #[test]
    fn single_resource_from_json_string() {
        let serialized = r#"{ "id" :"1", "type" : "post", "attributes" : {"title": "JSON:API"},
            "relationships" : {"data": {"type": "people", "id": "9"}}, "links" : {} }"#;
        let value: serde_json::Value = serde_json::from_str(serialized).unwrap();
        let resource = Resource::assert("post", Some(&value)).unwrap();
        assert_eq!(resource.id.as_deref(), Some("1"));
        assert_eq!(resource.attributes.unwrap()["title"], json!("JSON:API"));
        assert!(resource.links.unwrap().is_empty());
    }

    #[test]
    fn resource_members_are_checked_in_order() {
        match Resource::assert("post", Some(&json!({ "type": "post", "attributes": [] }))) {
            Err(AssertError::TypeMismatch { name, .. }) => assert_eq!(name, "post.attributes"),
            other => unreachable!("get: {:?}", other),
        }
        match Resource::assert("post", Some(&json!({ "type": "post", "relationships": {} }))) {
            Err(AssertError::MissingRequiredAlternative { name, .. }) => {
                assert_eq!(name, "post.relationships")
            },
            other => unreachable!("get: {:?}", other),
        }
    }

    #[test]
    fn server_resource_needs_id() {
        let value = json!({ "id": "1", "type": "post" });
        let resource = ServerResource::assert("post", Some(&value)).unwrap();
        assert_eq!(resource.to_resource_identifier(), ResourceIdentifier::new("post", "1"));
        assert_eq!(serde_json::to_value(&resource).unwrap(), value);
        assert!(Resource::from(resource).is_resource_id(&ResourceIdentifier::new("post", "1")));

        match ServerResource::assert("post", Some(&json!({ "type": "post" }))) {
            Err(AssertError::MissingRequiredField { name, field }) => {
                assert_eq!(name, "post");
                assert_eq!(field, "id");
            },
            other => unreachable!("get: {:?}", other),
        }
        // the base shape is checked before the id
        match ServerResource::assert("post", Some(&json!({ "meta": 1 }))) {
            Err(AssertError::TypeMismatch { name, .. }) => assert_eq!(name, "post.type"),
            other => unreachable!("get: {:?}", other),
        }
    }

    #[test]
    fn server_resource_shape() {
        assert_eq!(ServerResource::accepts().to_string(), "Resource & { id: string }");
    }
}
