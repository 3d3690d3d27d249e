//! Cross-field rules, run only after every member of an entity passed its own assertion.

use crate::Result;

pub mod v1_0;

pub use v1_0::{
    DataAndErrorsMustNotCoexist, DocumentMustHaveTopLevelMember, RelationshipMustHaveContent,
    ServerResourceMustHaveId, TopLevelMembers,
};

pub trait Rule<E: ?Sized> {
    fn check(name: &str, item: &E) -> Result<()>;
}
