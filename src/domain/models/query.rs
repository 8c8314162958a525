//! Query parameters for collection requests.

use serde::{Deserialize, Serialize};

/// Ordered list of query pairs.
///
/// Repeated keys are allowed (`order[name]=asc&id[]=1&id[]=2`). [`insert`]
/// replaces every existing value for a key, [`append`] adds another one.
///
/// [`insert`]: QueryParams::insert
/// [`append`]: QueryParams::append
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Empty parameter set. Listing with it goes through the cache.
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` to a single value, dropping earlier values for it.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        self.pairs.retain(|(existing, _)| *existing != key);
        self.pairs.push((key, value.to_string()));
    }

    /// Add another value for `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl ToString) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// First value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// True when no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of pairs, counting repeated keys.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Borrow the pairs in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Return `self` layered over `defaults`: keys present in `self` win.
    #[must_use]
    pub fn merged_over(&self, defaults: &Self) -> Self {
        let mut pairs: Vec<(String, String)> = defaults
            .pairs
            .iter()
            .filter(|(key, _)| self.get(key).is_none())
            .cloned()
            .collect();
        pairs.extend(self.pairs.iter().cloned());
        Self { pairs }
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_existing_values() {
        let mut params = QueryParams::new();
        params.append("id[]", 1);
        params.append("id[]", 2);
        params.insert("id[]", 3);

        assert_eq!(params.pairs(), &[("id[]".to_string(), "3".to_string())]);
    }

    #[test]
    fn test_append_keeps_repeated_keys() {
        let params: QueryParams = [("id[]", 1), ("id[]", 2)].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("id[]"), Some("1"));
    }

    #[test]
    fn test_merged_over_defaults() {
        let defaults = QueryParams::new()
            .with("pagination", false)
            .with("order[name]", "asc");
        let params = QueryParams::new().with("pagination", true);

        let merged = params.merged_over(&defaults);
        assert_eq!(merged.get("pagination"), Some("true"));
        assert_eq!(merged.get("order[name]"), Some("asc"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(QueryParams::new().is_empty());
        assert!(!QueryParams::new().with("filter", "x").is_empty());
    }
}
