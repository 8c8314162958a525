//! Entity normalization for JSON-LD/Hydra payloads.
//!
//! Every object carrying an `@id` gets an `@href` (API base + identifier),
//! and the same is applied to objects embedded below it, at any depth.
//! Collection envelopes become [`CollectionResult`]s.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::errors::{ResourceError, ResourceResult};
use crate::domain::models::{CollectionResult, Entity, PartialCollectionView, HREF_FIELD, ID_FIELD};

const HYDRA_MEMBER: &str = "hydra:member";
const HYDRA_TOTAL_ITEMS: &str = "hydra:totalItems";
const HYDRA_VIEW: &str = "hydra:view";
const HYDRA_FIRST: &str = "hydra:first";
const HYDRA_NEXT: &str = "hydra:next";
const HYDRA_PREVIOUS: &str = "hydra:previous";
const HYDRA_LAST: &str = "hydra:last";

/// Turns decoded responses into normalized entities.
#[derive(Debug, Clone)]
pub struct EntityNormalizer {
    api_base: String,
}

impl EntityNormalizer {
    /// Create a normalizer for the given API root. Trailing slashes are ignored.
    pub fn new(api_root: &str) -> Self {
        Self {
            api_base: api_root.trim_end_matches('/').to_string(),
        }
    }

    /// API root without trailing slash.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Prefix an identifier with the API root.
    pub fn absolutize(&self, iri: &str) -> String {
        format!("{}{}", self.api_base, iri)
    }

    /// Normalize an arbitrary decoded value.
    ///
    /// Objects without a string `@id` are returned untouched, including
    /// whatever they contain.
    pub fn normalize_value(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.normalize_map(map)),
            other => other,
        }
    }

    fn normalize_map(&self, map: Map<String, Value>) -> Map<String, Value> {
        let href = map
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .map(|id| self.absolutize(id));
        let Some(href) = href else {
            return map;
        };

        let mut normalized: Map<String, Value> = map
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::Object(_) => self.normalize_value(value),
                    Value::Array(items) => {
                        Value::Array(items.into_iter().map(|item| self.normalize_value(item)).collect())
                    }
                    other => other,
                };
                (key, value)
            })
            .collect();
        normalized.insert(HREF_FIELD.to_string(), Value::String(href));
        normalized
    }

    /// Normalize a single-entity response.
    pub fn normalize_entity(&self, value: Value) -> ResourceResult<Entity> {
        match self.normalize_value(value) {
            Value::Object(map) => Ok(Entity::from_map(map)),
            other => Err(ResourceError::Decode(format!(
                "expected an entity object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Normalize a Hydra collection envelope.
    ///
    /// `hydra:totalItems` falls back to the member count when missing. The
    /// view is only built when the envelope carries `hydra:view`.
    pub fn normalize_collection(&self, envelope: Value) -> ResourceResult<CollectionResult> {
        let Value::Object(mut envelope) = envelope else {
            return Err(ResourceError::Decode(format!(
                "expected a collection envelope, got {}",
                json_kind(&envelope)
            )));
        };

        let members = match envelope.remove(HYDRA_MEMBER) {
            Some(Value::Array(members)) => members,
            Some(other) => {
                return Err(ResourceError::Decode(format!(
                    "{HYDRA_MEMBER} must be an array, got {}",
                    json_kind(&other)
                )))
            }
            None => return Err(ResourceError::Decode(format!("missing {HYDRA_MEMBER}"))),
        };

        let members = members
            .into_iter()
            .map(|member| self.normalize_entity(member).map(Arc::new))
            .collect::<ResourceResult<Vec<_>>>()?;

        let total_items = envelope
            .get(HYDRA_TOTAL_ITEMS)
            .and_then(Value::as_u64)
            .unwrap_or(members.len() as u64);

        let view = envelope.get(HYDRA_VIEW).map(|view| self.normalize_view(view));

        Ok(CollectionResult {
            members,
            total_items,
            view,
        })
    }

    fn normalize_view(&self, view: &Value) -> PartialCollectionView {
        let link = |key: &str| view.get(key).and_then(Value::as_str).map(|iri| self.absolutize(iri));

        PartialCollectionView {
            first: link(HYDRA_FIRST),
            next: link(HYDRA_NEXT),
            previous: link(HYDRA_PREVIOUS),
            last: link(HYDRA_LAST),
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn normalizer() -> EntityNormalizer {
        EntityNormalizer::new("http://example.com/api")
    }

    #[test]
    fn test_absolutize_ignores_trailing_slash() {
        let with_slash = EntityNormalizer::new("http://example.com/api/");
        assert_eq!(normalizer().absolutize("/items/1"), "http://example.com/api/items/1");
        assert_eq!(with_slash.absolutize("/items/1"), "http://example.com/api/items/1");
    }

    #[test]
    fn test_entity_gets_href() {
        let entity = normalizer()
            .normalize_entity(json!({"@id": "/items/1", "name": "first"}))
            .unwrap();

        assert_eq!(entity.href(), Some("http://example.com/api/items/1"));
        assert_eq!(entity.get("name"), Some(&json!("first")));
    }

    #[test]
    fn test_object_without_id_is_untouched() {
        let raw = json!({"name": "anonymous", "child": {"@id": "/items/2"}});
        let normalized = normalizer().normalize_value(raw.clone());
        assert_eq!(normalized, raw);
    }

    #[test]
    fn test_embedded_objects_are_normalized_at_any_depth() {
        let raw = json!({
            "@id": "/books/1",
            "author": {
                "@id": "/authors/1",
                "publisher": {"@id": "/publishers/1"}
            },
            "reviews": [
                {"@id": "/reviews/1"},
                {"@id": "/reviews/2", "replies": [{"@id": "/replies/9"}]},
                "/reviews/3",
                7
            ]
        });

        let normalized = normalizer().normalize_value(raw);

        assert_eq!(
            normalized["author"]["@href"],
            json!("http://example.com/api/authors/1")
        );
        assert_eq!(
            normalized["author"]["publisher"]["@href"],
            json!("http://example.com/api/publishers/1")
        );
        assert_eq!(
            normalized["reviews"][0]["@href"],
            json!("http://example.com/api/reviews/1")
        );
        assert_eq!(
            normalized["reviews"][1]["replies"][0]["@href"],
            json!("http://example.com/api/replies/9")
        );
        assert_eq!(normalized["reviews"][2], json!("/reviews/3"));
        assert_eq!(normalized["reviews"][3], json!(7));
    }

    #[test]
    fn test_normalize_entity_rejects_non_objects() {
        let err = normalizer().normalize_entity(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ResourceError::Decode(msg) if msg.contains("an array")));
    }

    #[test]
    fn test_collection_with_view() {
        let envelope = json!({
            "hydra:member": [{"@id": "/items/1"}, {"@id": "/items/2"}],
            "hydra:totalItems": 40,
            "hydra:view": {
                "@id": "/items?page=1",
                "hydra:first": "/items?page=1",
                "hydra:next": "/items?page=2",
                "hydra:last": "/items?page=20"
            }
        });

        let result = normalizer().normalize_collection(envelope).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.total_items, 40);
        assert_eq!(
            result.members[1].href(),
            Some("http://example.com/api/items/2")
        );

        let view = result.view.expect("view should be present");
        assert_eq!(view.first.as_deref(), Some("http://example.com/api/items?page=1"));
        assert_eq!(view.next.as_deref(), Some("http://example.com/api/items?page=2"));
        assert_eq!(view.previous, None);
        assert_eq!(view.last.as_deref(), Some("http://example.com/api/items?page=20"));
    }

    #[test]
    fn test_collection_without_view() {
        let envelope = json!({"hydra:member": [], "hydra:totalItems": 0});
        let result = normalizer().normalize_collection(envelope).unwrap();
        assert!(result.is_empty());
        assert!(result.view.is_none());
    }

    #[test]
    fn test_collection_total_defaults_to_member_count() {
        let envelope = json!({"hydra:member": [{"@id": "/items/1"}]});
        let result = normalizer().normalize_collection(envelope).unwrap();
        assert_eq!(result.total_items, 1);
    }

    #[test]
    fn test_collection_missing_members_is_decode_error() {
        let err = normalizer()
            .normalize_collection(json!({"hydra:totalItems": 3}))
            .unwrap_err();
        assert!(matches!(err, ResourceError::Decode(msg) if msg.contains("hydra:member")));
    }

    proptest! {
        #[test]
        fn prop_href_is_root_plus_id(
            host in "[a-z]{1,12}",
            slashes in 0usize..3,
            id in "/[a-z]{1,8}/[0-9]{1,5}",
        ) {
            let root = format!("http://{host}.test/api{}", "/".repeat(slashes));
            let entity = EntityNormalizer::new(&root)
                .normalize_entity(json!({"@id": id.clone()}))
                .unwrap();
            let expected = format!("http://{host}.test/api{id}");
            prop_assert_eq!(entity.href(), Some(expected.as_str()));
        }
    }
}
