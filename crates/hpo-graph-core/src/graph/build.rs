//! Mutable ontology graph as handed over by a parser.
//!
//! # Edge Direction
//!
//! An edge `A → B` means "A **is a** B": it points from the more specific
//! term to the more general one. In domain vocabulary `B` is a *parent* of
//! `A`, while in raw graph vocabulary `B` is a *successor* of `A`. The
//! translation between the two lives in [`crate::ontology`]; nothing in this
//! module renames edges.
//!
//! ## Multigraph
//!
//! Parallel edges between the same pair are kept as-is. Traversals treat
//! them as one logical connection.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

// ---------------------------------------------------------------------------
// RawOntology
// ---------------------------------------------------------------------------

/// A parsed, not yet pruned ontology graph.
///
/// Nodes are term identifiers (strings). Uses a [`StableDiGraph`] so that
/// subtree extraction can delete nodes without disturbing the enumeration
/// order of the survivors.
#[derive(Debug, Clone, Default)]
pub struct RawOntology {
    /// Directed multigraph: nodes = term IDs, edges = is-a relations.
    pub graph: StableDiGraph<String, ()>,
    /// Mapping from term ID to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl RawOntology {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(child, parent)` is-a pairs.
    ///
    /// Nodes are inserted in first-seen order, child before parent.
    #[must_use]
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut raw = Self::new();
        for (child, parent) in edges {
            raw.add_is_a(child, parent);
        }
        raw
    }

    /// Insert a term if absent and return its index.
    pub fn add_term(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_map.insert(id.to_string(), idx);
        idx
    }

    /// Record that `child` is a `parent`, inserting either term if needed.
    ///
    /// Repeated calls add parallel edges.
    pub fn add_is_a(&mut self, child: &str, parent: &str) {
        let child_idx = self.add_term(child);
        let parent_idx = self.add_term(parent);
        self.graph.add_edge(child_idx, parent_idx, ());
    }

    /// Delete a term together with every edge touching it.
    pub(crate) fn remove_term(&mut self, idx: NodeIndex) -> Option<String> {
        let id = self.graph.remove_node(idx)?;
        self.node_map.remove(&id);
        Some(id)
    }

    /// Return the number of terms in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of is-a edges, parallel edges included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a term ID.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Return `true` if `id` is a node of the graph.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Return the term ID label for a node.
    #[must_use]
    pub fn term_id(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// BLAKE3 hash of the sorted `(child, parent)` edge list.
    ///
    /// Changes only when edges change; artifacts record it to tell which
    /// graph they were computed from.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut edges: Vec<(&str, &str)> = self
            .graph
            .edge_references()
            .filter_map(|edge| {
                Some((
                    self.term_id(edge.source())?,
                    self.term_id(edge.target())?,
                ))
            })
            .collect();
        edges.sort_unstable();

        let mut hasher = blake3::Hasher::new();
        for (child, parent) in edges {
            hasher.update(child.as_bytes());
            hasher.update(b"\x00");
            hasher.update(parent.as_bytes());
            hasher.update(b"\x00");
        }
        format!("blake3:{}", hasher.finalize())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
