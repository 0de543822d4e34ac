//! Frozen, position-keyed graph store.
//!
//! After extraction the [`RawOntology`] is compacted into a
//! [`DiGraph`] whose `NodeIndex::index()` equals the term's position in the
//! [`NodeIndexer`]. Traversals run on positions only; identifiers are
//! resolved at the API boundary.
//!
//! The store answers raw-edge questions (predecessors, successors and their
//! closures). Domain vocabulary lives one level up in [`crate::ontology`].

#![allow(clippy::module_name_repetitions)]

use fixedbitset::FixedBitSet;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use tracing::{debug, instrument};

use crate::error::{OntologyError, Result};
use crate::graph::build::RawOntology;
use crate::graph::index::NodeIndexer;
use crate::traversal;

// ---------------------------------------------------------------------------
// GraphStore
// ---------------------------------------------------------------------------

/// Immutable directed multigraph over dense positions.
#[derive(Debug, Clone)]
pub struct GraphStore {
    graph: DiGraph<String, ()>,
    indexer: NodeIndexer,
}

impl GraphStore {
    /// Compact `raw` into a frozen store.
    ///
    /// Positions follow the raw graph's native enumeration order (surviving
    /// nodes in insertion order). Parallel edges are preserved.
    #[must_use]
    #[instrument(skip(raw), fields(nodes = raw.node_count(), edges = raw.edge_count()))]
    pub fn freeze(raw: &RawOntology) -> Self {
        let indexer = NodeIndexer::from_ids(
            raw.graph
                .node_indices()
                .filter_map(|idx| raw.term_id(idx).map(str::to_string)),
        );

        let mut graph = DiGraph::with_capacity(indexer.len(), raw.edge_count());
        for id in indexer.ids() {
            graph.add_node(id.clone());
        }

        for edge in raw.graph.edge_references() {
            let endpoints = raw
                .term_id(edge.source())
                .and_then(|id| indexer.position(id))
                .zip(raw.term_id(edge.target()).and_then(|id| indexer.position(id)));
            if let Some((from, to)) = endpoints {
                graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph store frozen"
        );
        Self { graph, indexer }
    }

    /// Number of terms.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, parallel edges included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The position ↔ identifier bijection.
    #[must_use]
    pub const fn indexer(&self) -> &NodeIndexer {
        &self.indexer
    }

    /// The underlying petgraph graph (node index == position).
    #[must_use]
    pub const fn graph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    /// Resolve an identifier to its position.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::NodeNotFound`] if `id` is not in the store.
    pub fn position(&self, id: &str) -> Result<usize> {
        self.indexer
            .position(id)
            .ok_or_else(|| OntologyError::NodeNotFound(id.to_string()))
    }

    /// Identifier at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range; positions handed out by this
    /// store are always in range.
    #[must_use]
    pub fn id(&self, position: usize) -> &str {
        &self.graph[NodeIndex::new(position)]
    }

    /// Raw predecessors of `position` (sources of edges into it).
    pub fn predecessors(&self, position: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors(position, Direction::Incoming)
    }

    /// Raw successors of `position` (targets of edges out of it).
    pub fn successors(&self, position: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors(position, Direction::Outgoing)
    }

    /// Every node with a directed path ending at `position`.
    #[must_use]
    pub fn raw_ancestors(&self, position: usize) -> FixedBitSet {
        traversal::reachable(self.node_count(), position, |n| self.predecessors(n))
    }

    /// Every node reachable from `position` along edge direction.
    #[must_use]
    pub fn raw_descendants(&self, position: usize) -> FixedBitSet {
        traversal::reachable(self.node_count(), position, |n| self.successors(n))
    }

    fn neighbors(&self, position: usize, dir: Direction) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(position), dir)
            .map(|n| n.index())
    }
}

// ---------------------------------------------------------------------------
// UndirectedView
// ---------------------------------------------------------------------------

/// Edge-direction-agnostic adjacency over the same node and edge set.
///
/// Neighbor lists are sorted and deduplicated, so a parallel edge or an edge
/// present in both directions contributes one neighbor. Self-loops are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndirectedView {
    adjacency: Vec<Vec<usize>>,
}

impl UndirectedView {
    /// Build the view from `store` without touching it.
    #[must_use]
    pub fn from_store(store: &GraphStore) -> Self {
        let mut adjacency = vec![Vec::new(); store.node_count()];
        for edge in store.graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            if a != b {
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
        }
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
            neighbors.dedup();
        }
        Self { adjacency }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Neighbors of `position`, ascending.
    #[must_use]
    pub fn neighbors(&self, position: usize) -> &[usize] {
        &self.adjacency[position]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
