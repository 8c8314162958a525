//! JSON-LD entity model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field carrying the API-assigned identifier (IRI path).
pub const ID_FIELD: &str = "@id";

/// Field carrying the absolutized reference derived from [`ID_FIELD`].
pub const HREF_FIELD: &str = "@href";

/// A resource returned by the API.
///
/// Entities are open field maps: the client never assumes a schema beyond
/// `@id` and `@href`. Cached entities are shared as `Arc<Entity>` so that
/// resolving the same identifier twice yields the same allocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity {
    fields: Map<String, Value>,
}

impl Entity {
    /// Create an empty entity (no identifier, no reference).
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already decoded field map.
    pub const fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Builder-style field setter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The `@id` identifier, if the API assigned one.
    pub fn id(&self) -> Option<&str> {
        self.fields.get(ID_FIELD).and_then(Value::as_str)
    }

    /// The absolutized `@href`, present once the entity went through the normalizer.
    pub fn href(&self) -> Option<&str> {
        self.fields.get(HREF_FIELD).and_then(Value::as_str)
    }

    /// Look up an arbitrary field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Borrow the raw field map.
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume the entity into its raw field map.
    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    /// Render as a JSON value (used as request body for create/update).
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl From<Map<String, Value>> for Entity {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_map(fields)
    }
}
