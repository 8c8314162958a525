pub mod collection;
pub mod config;
pub mod entity;
pub mod query;
pub mod reference;

pub use collection::{CollectionResult, PartialCollectionView};
pub use config::{ClientConfig, LoggingConfig, RotationPolicy};
pub use entity::{Entity, HREF_FIELD, ID_FIELD};
pub use query::QueryParams;
pub use reference::EntityRef;
