//! Dense positions for term identifiers.
//!
//! Positions lay out distance-matrix rows and columns and key the frozen
//! store's adjacency, so the mapping must be a bijection onto `[0, N)` and
//! must never change after construction.

use std::collections::HashMap;

/// Bijection between term IDs and positions in `[0, N)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeIndexer {
    ids: Vec<String>,
    positions: HashMap<String, usize>,
}

impl NodeIndexer {
    /// Assign positions in iteration order. Duplicate IDs keep their first
    /// position.
    #[must_use]
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut indexer = Self::default();
        for id in ids {
            if indexer.positions.contains_key(&id) {
                continue;
            }
            indexer.positions.insert(id.clone(), indexer.ids.len());
            indexer.ids.push(id);
        }
        indexer
    }

    /// Number of indexed terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Position of `id`, if indexed.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Term ID at `position`, if in range.
    #[must_use]
    pub fn id(&self, position: usize) -> Option<&str> {
        self.ids.get(position).map(String::as_str)
    }

    /// All IDs in position order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.ids.iter().map(String::as_str).enumerate()
    }
}
