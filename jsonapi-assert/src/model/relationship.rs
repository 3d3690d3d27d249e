use crate::assert::maybe;
use crate::model::link::{link_collection, Links};
use crate::model::resource::{resource_linkage, ResourceLinkage};
use crate::model::{meta, Meta};
use crate::rule::RelationshipMustHaveContent;

schema! {
    /// Relationship with another object
    #[derive(Serialize, Debug, Clone, Default, PartialEq)]
    pub struct Relationship {
        #[serde(skip_serializing_if = "Option::is_none")]
        links: Option<Links> = maybe(link_collection()),
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<ResourceLinkage> = maybe(resource_linkage()),
        #[serde(skip_serializing_if = "Option::is_none")]
        meta: Option<Meta> = maybe(meta()),
    }
    check RelationshipMustHaveContent;
}
