//! Entity references: either an identifier to be resolved or a resolved entity.

use std::sync::Arc;

use super::entity::Entity;

/// A field value that points at an entity.
///
/// Hydra payloads embed relations either as a bare IRI (`"/items/1"`) or as
/// the full object. Resolution turns both forms into a shared entity handle.
#[derive(Debug, Clone, Default)]
pub enum EntityRef {
    /// No relation set.
    #[default]
    Absent,
    /// An unresolved `@id`.
    Iri(String),
    /// An entity handle, returned as-is by resolution.
    Resolved(Arc<Entity>),
}

impl EntityRef {
    /// True for [`EntityRef::Absent`].
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The identifier this reference designates, whichever form it takes.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Iri(iri) => Some(iri),
            Self::Resolved(entity) => entity.id(),
        }
    }

    /// Read a relation out of a raw JSON field value.
    ///
    /// Strings become [`EntityRef::Iri`], objects become resolved entities,
    /// everything else is [`EntityRef::Absent`].
    pub fn from_value(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::String(iri)) => Self::Iri(iri.clone()),
            Some(serde_json::Value::Object(map)) => {
                Self::Resolved(Arc::new(Entity::from_map(map.clone())))
            }
            _ => Self::Absent,
        }
    }
}

impl From<&str> for EntityRef {
    fn from(iri: &str) -> Self {
        Self::Iri(iri.to_string())
    }
}

impl From<String> for EntityRef {
    fn from(iri: String) -> Self {
        Self::Iri(iri)
    }
}

impl From<Arc<Entity>> for EntityRef {
    fn from(entity: Arc<Entity>) -> Self {
        Self::Resolved(entity)
    }
}

impl From<&Arc<Entity>> for EntityRef {
    fn from(entity: &Arc<Entity>) -> Self {
        Self::Resolved(Arc::clone(entity))
    }
}

impl From<Entity> for EntityRef {
    fn from(entity: Entity) -> Self {
        Self::Resolved(Arc::new(entity))
    }
}

impl<T: Into<Self>> From<Option<T>> for EntityRef {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}
