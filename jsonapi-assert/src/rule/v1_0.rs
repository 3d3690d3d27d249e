use crate::assert::is_set;
use crate::error::AssertError;
use crate::model::relationship::Relationship;
use crate::model::resource::Resource;
use crate::rule::Rule;
use crate::Result;
use serde_json::{Map, Value};

/// A relationship object MUST contain at least one of `links`, `data` or `meta`
pub struct RelationshipMustHaveContent;
impl Rule<Relationship> for RelationshipMustHaveContent {
    fn check(name: &str, relationship: &Relationship) -> Result<()> {
        let Relationship { links, data, meta } = relationship;
        if links.is_none() && data.is_none() && meta.is_none() {
            Err(AssertError::MissingRequiredAlternative {
                name: name.into(),
                fields: vec!["links", "data", "meta"],
            })
        } else {
            Ok(())
        }
    }
}

/// Resources originating on the server always carry their `id`
pub struct ServerResourceMustHaveId;
impl Rule<Resource> for ServerResourceMustHaveId {
    fn check(name: &str, resource: &Resource) -> Result<()> {
        match resource.id {
            Some(_) => Ok(()),
            None => Err(AssertError::missing_field(name, "id")),
        }
    }
}

/// Which of the primary top-level members of a document are set (present and not `null`)
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TopLevelMembers {
    pub data: bool,
    pub errors: bool,
    pub meta: bool,
}

impl TopLevelMembers {
    pub fn of(document: &Map<String, Value>) -> Self {
        Self {
            data: is_set(document.get("data")),
            errors: is_set(document.get("errors")),
            meta: is_set(document.get("meta")),
        }
    }
}

/// A document MUST contain at least one of `data`, `errors` or `meta`
pub struct DocumentMustHaveTopLevelMember;
impl Rule<TopLevelMembers> for DocumentMustHaveTopLevelMember {
    fn check(name: &str, members: &TopLevelMembers) -> Result<()> {
        if members.data || members.errors || members.meta {
            Ok(())
        } else {
            Err(AssertError::MissingRequiredAlternative {
                name: name.into(),
                fields: vec!["data", "errors", "meta"],
            })
        }
    }
}

/// The members `data` and `errors` MUST NOT coexist in the same document
pub struct DataAndErrorsMustNotCoexist;
impl Rule<TopLevelMembers> for DataAndErrorsMustNotCoexist {
    fn check(name: &str, members: &TopLevelMembers) -> Result<()> {
        if members.data && members.errors {
            Err(AssertError::ConflictingFields {
                name: name.into(),
                first: "data",
                second: "errors",
            })
        } else {
            Ok(())
        }
    }
}
