use jsonapi_assert::assert::{boolean, object, ObjectSchema};
use serde_json::{json, Value};

/// `{ works: boolean }`
#[allow(dead_code)]
pub fn works_meta() -> ObjectSchema { object().field("works", boolean()) }

/// The compound document example of the JSON:API v1.0 format
#[allow(dead_code)]
pub fn compound_document() -> Value {
    json!({
        "data": [{
            "type": "articles",
            "id": "1",
            "attributes": { "title": "JSON:API paints my bikeshed!" },
            "links": { "self": "http://example.com/articles/1" },
            "relationships": {
                "links": {
                    "self": "http://example.com/articles/1/relationships/author",
                    "related": "http://example.com/articles/1/author"
                },
                "data": { "type": "people", "id": "9" }
            }
        }],
        "included": [{
            "type": "people",
            "id": "9",
            "attributes": { "first-name": "Dan", "last-name": "Gebhardt", "twitter": "dgeb" },
            "links": { "self": "http://example.com/people/9" }
        }, {
            "type": "comments",
            "id": "5",
            "attributes": { "body": "First!" },
            "relationships": { "data": { "type": "people", "id": "2" } },
            "links": { "self": "http://example.com/comments/5" }
        }],
        "links": {
            "self": "http://example.com/articles",
            "next": "http://example.com/articles?page[offset]=2",
            "last": {
                "href": "http://example.com/articles?page[offset]=10",
                "meta": { "pages": 10 }
            }
        },
        "jsonapi": { "version": "1.0" }
    })
}
