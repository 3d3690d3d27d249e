use crate::assert::{dictionary, intersect, maybe, member, nested, or, string, Assert};
use crate::model::{meta, Meta};
use std::collections::HashMap;

/// Every member of a links object is either a raw URL or a [`Link`], and MAY be `null`
pub type Links = HashMap<String, Option<StringOrLink>>;

schema! {
    #[derive(Serialize, Debug, Clone, PartialEq)]
    pub struct Link {
        href: String = string(),
        #[serde(skip_serializing_if = "Option::is_none")]
        meta: Option<Meta> = maybe(meta()),
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StringOrLink {
    Raw(String),
    Object(Link),
}

impl StringOrLink {
    pub fn href(&self) -> &str {
        match self {
            StringOrLink::Raw(href) => href,
            StringOrLink::Object(link) => &link.href,
        }
    }
}

impl From<&str> for StringOrLink {
    fn from(href: &str) -> Self { StringOrLink::Raw(href.into()) }
}

impl From<Link> for StringOrLink {
    fn from(link: Link) -> Self { StringOrLink::Object(link) }
}

/// Raw strings are tried before link objects
pub fn string_or_link() -> impl Assert<Output = StringOrLink> {
    or(string().map(StringOrLink::Raw), nested::<Link>().map(StringOrLink::Object))
}

pub fn link_collection() -> impl Assert<Output = Links> { dictionary(maybe(string_or_link())) }

/// Links of an error object, which MUST contain `about`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorLinks {
    pub about: StringOrLink,
    #[serde(flatten)]
    pub links: Links,
}

pub fn error_link_collection() -> impl Assert<Output = ErrorLinks> {
    intersect(link_collection(), member("about", string_or_link())).map(|(mut links, about)| {
        links.remove("about");
        ErrorLinks { about, links }
    })
}
