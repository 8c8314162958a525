//! Hydra collection results and paging links.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Paging links taken from a `hydra:view` block, each absolutized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialCollectionView {
    /// Link to the first page.
    pub first: Option<String>,
    /// Link to the next page.
    pub next: Option<String>,
    /// Link to the previous page.
    pub previous: Option<String>,
    /// Link to the last page.
    pub last: Option<String>,
}

impl PartialCollectionView {
    /// True when there is a further page to fetch.
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// One page (or the whole set) of a collection endpoint.
///
/// `total_items` is the count declared by the server and may exceed
/// `members.len()` when the response is paginated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionResult {
    /// Normalized members in server order.
    pub members: Vec<Arc<Entity>>,
    /// Total item count declared by `hydra:totalItems`.
    pub total_items: u64,
    /// Paging links, absent when the server sent no `hydra:view`.
    pub view: Option<PartialCollectionView>,
}

impl CollectionResult {
    /// Number of members in this result.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if no members were returned.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over the shared member handles.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Entity>> {
        self.members.iter()
    }

    /// Find a member by its `@id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Arc<Entity>> {
        self.members.iter().find(|member| member.id() == Some(id))
    }
}

impl<'a> IntoIterator for &'a CollectionResult {
    type Item = &'a Arc<Entity>;
    type IntoIter = std::slice::Iter<'a, Arc<Entity>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
