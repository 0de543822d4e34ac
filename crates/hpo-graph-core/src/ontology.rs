//! Domain-level queries over the extracted phenotype hierarchy.
//!
//! # Vocabulary
//!
//! Edges point from the specific term to the general one. The domain speaks
//! about specificity instead, so the raw primitives are inverted here and
//! only here:
//!
//! | domain query      | raw graph primitive                 |
//! |-------------------|-------------------------------------|
//! | `children(id)`    | predecessors of `id`                |
//! | `parents(id)`     | successors of `id`                  |
//! | `descendants(id)` | raw ancestor closure (paths to `id`) |
//! | `ancestors(id)`   | raw descendant closure (paths from `id`) |
//!
//! # Derived state
//!
//! The depth map and the undirected view are built on first use and kept in
//! [`OnceLock`]s. The graph never changes after construction, so neither
//! needs invalidation, and concurrent first access computes them once.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument, warn};

use crate::config::{DEFAULT_ROOT_ID, DEFAULT_SUPER_ROOT_ID, OntologyConfig};
use crate::error::{OntologyError, Result};
use crate::graph::{ExtractionSummary, GraphStore, RawOntology, UndirectedView, extract_subtree};
use crate::matrix::{self, DistanceMatrix};
use crate::traversal;

/// The phenotype hierarchy restricted to one root's subtree.
#[derive(Debug)]
pub struct Ontology {
    store: GraphStore,
    root: usize,
    extraction: ExtractionSummary,
    content_hash: String,
    names: HashMap<String, String>,
    depths: OnceLock<HashMap<String, usize>>,
    undirected: OnceLock<UndirectedView>,
}

impl Ontology {
    /// Extract the subtree of `root_id` from `raw` and freeze it.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::GraphStructure`] if `super_root_id` or
    /// `root_id` is missing from `raw`.
    #[instrument(skip(raw), fields(nodes = raw.node_count()))]
    pub fn new(mut raw: RawOntology, root_id: &str, super_root_id: &str) -> Result<Self> {
        let extraction = extract_subtree(&mut raw, root_id, super_root_id)?;
        let content_hash = raw.content_hash();
        let store = GraphStore::freeze(&raw);
        let root = store.position(root_id).map_err(|_| {
            OntologyError::GraphStructure(format!("root {root_id} did not survive extraction"))
        })?;

        debug!(
            terms = store.node_count(),
            edges = store.edge_count(),
            pruned = extraction.removed_terms,
            "ontology ready"
        );

        Ok(Self {
            store,
            root,
            extraction,
            content_hash,
            names: HashMap::new(),
            depths: OnceLock::new(),
            undirected: OnceLock::new(),
        })
    }

    /// [`Ontology::new`] with the phenotypic-abnormality defaults.
    ///
    /// # Errors
    ///
    /// See [`Ontology::new`].
    pub fn from_raw(raw: RawOntology) -> Result<Self> {
        Self::new(raw, DEFAULT_ROOT_ID, DEFAULT_SUPER_ROOT_ID)
    }

    /// [`Ontology::new`] with the roots named in `config`.
    ///
    /// # Errors
    ///
    /// See [`Ontology::new`].
    pub fn from_config(raw: RawOntology, config: &OntologyConfig) -> Result<Self> {
        Self::new(raw, &config.root_id, &config.super_root_id)
    }

    /// Attach term labels. Labels for pruned terms are dropped.
    #[must_use]
    pub fn with_names(mut self, names: HashMap<String, String>) -> Self {
        self.names = names
            .into_iter()
            .filter(|(id, _)| self.contains(id))
            .collect();
        self
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// Number of terms in the extracted subtree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.node_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.node_count() == 0
    }

    /// Number of is-a edges, parallel edges included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.store.indexer().position(id).is_some()
    }

    /// The designated root ID.
    #[must_use]
    pub fn root(&self) -> &str {
        self.store.id(self.root)
    }

    /// Term IDs in matrix order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.store.indexer().ids().iter().map(String::as_str)
    }

    /// Matrix position of `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.store.indexer().position(id)
    }

    /// Term ID at matrix position `index`.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.store.indexer().id(index)
    }

    /// Label of `id`, when names were attached.
    #[must_use]
    pub fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    #[must_use]
    pub const fn store(&self) -> &GraphStore {
        &self.store
    }

    /// What extraction removed at construction time.
    #[must_use]
    pub const fn extraction(&self) -> ExtractionSummary {
        self.extraction
    }

    /// BLAKE3 hash of the extracted edge set.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    // -----------------------------------------------------------------------
    // Hierarchy accessors (domain vocabulary)
    // -----------------------------------------------------------------------

    /// Direct subclasses of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::NodeNotFound`] for an unknown `id`.
    pub fn children(&self, id: &str, include_self: bool) -> Result<BTreeSet<String>> {
        let pos = self.store.position(id)?;
        Ok(self.collect_ids(self.store.predecessors(pos), pos, include_self))
    }

    /// Direct superclasses of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::NodeNotFound`] for an unknown `id`.
    pub fn parents(&self, id: &str, include_self: bool) -> Result<BTreeSet<String>> {
        let pos = self.store.position(id)?;
        Ok(self.collect_ids(self.store.successors(pos), pos, include_self))
    }

    /// Every term below `id`.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::NodeNotFound`] for an unknown `id`.
    pub fn descendants(&self, id: &str, include_self: bool) -> Result<BTreeSet<String>> {
        let pos = self.store.position(id)?;
        Ok(self.collect_set(&self.store.raw_ancestors(pos), pos, include_self))
    }

    /// Every term above `id`.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::NodeNotFound`] for an unknown `id`.
    pub fn ancestors(&self, id: &str, include_self: bool) -> Result<BTreeSet<String>> {
        let pos = self.store.position(id)?;
        Ok(self.collect_set(&self.store.raw_descendants(pos), pos, include_self))
    }

    fn collect_ids(
        &self,
        positions: impl Iterator<Item = usize>,
        own: usize,
        include_self: bool,
    ) -> BTreeSet<String> {
        let mut ids: BTreeSet<String> = positions.map(|p| self.store.id(p).to_string()).collect();
        if include_self {
            ids.insert(self.store.id(own).to_string());
        }
        ids
    }

    fn collect_set(&self, set: &FixedBitSet, own: usize, include_self: bool) -> BTreeSet<String> {
        // A cycle through `own` would place it in its own closure.
        let positions = set.ones().filter(|&p| p != own);
        self.collect_ids(positions, own, include_self)
    }

    // -----------------------------------------------------------------------
    // Distances
    // -----------------------------------------------------------------------

    /// Length of the shortest directed path from `id` up to the root.
    ///
    /// # Errors
    ///
    /// [`OntologyError::NodeNotFound`] for an unknown `id`,
    /// [`OntologyError::Unreachable`] if `id` has no path to the root.
    pub fn depth(&self, id: &str) -> Result<usize> {
        let pos = self.store.position(id)?;
        traversal::shortest_path_len(self.len(), pos, self.root, |n| self.store.successors(n))
            .ok_or_else(|| OntologyError::Unreachable {
                from: id.to_string(),
                to: self.root().to_string(),
            })
    }

    /// Depth of every term that can reach the root, computed once by a
    /// single reverse BFS from the root.
    pub fn depths(&self) -> &HashMap<String, usize> {
        self.depths.get_or_init(|| {
            let levels =
                traversal::bfs_levels(self.len(), self.root, |n| self.store.predecessors(n));
            let depths: HashMap<String, usize> = levels
                .iter()
                .enumerate()
                .filter_map(|(pos, level)| level.map(|d| (self.store.id(pos).to_string(), d)))
                .collect();
            if depths.len() < self.len() {
                warn!(
                    unreachable = self.len() - depths.len(),
                    "terms without a path to the root have no depth"
                );
            }
            depths
        })
    }

    /// Shortest path length from `source` to `target`.
    ///
    /// With `undirected` the cached undirected view is used; otherwise the
    /// path must follow edge direction (specific → general).
    ///
    /// # Errors
    ///
    /// [`OntologyError::NodeNotFound`] for an unknown endpoint,
    /// [`OntologyError::Unreachable`] when no path exists.
    pub fn distance(&self, source: &str, target: &str, undirected: bool) -> Result<usize> {
        let from = self.store.position(source)?;
        let to = self.store.position(target)?;

        let len = if undirected {
            let view = self.undirected();
            traversal::shortest_path_len(self.len(), from, to, |n| {
                view.neighbors(n).iter().copied()
            })
        } else {
            traversal::shortest_path_len(self.len(), from, to, |n| self.store.successors(n))
        };

        len.ok_or_else(|| OntologyError::Unreachable {
            from: source.to_string(),
            to: target.to_string(),
        })
    }

    /// Undirected distance from `source` to every term, in matrix order.
    ///
    /// # Errors
    ///
    /// [`OntologyError::NodeNotFound`] for an unknown `source`,
    /// [`OntologyError::Unreachable`] if any term is disconnected from it,
    /// [`OntologyError::DistanceOverflow`] if a distance exceeds `u16::MAX`.
    pub fn distance_vector(&self, source: &str) -> Result<Vec<u16>> {
        let pos = self.store.position(source)?;
        let mut row = vec![0; self.len()];
        self.fill_distance_row(self.undirected(), pos, &mut row)?;
        Ok(row)
    }

    /// Write the undirected distances from `source` into `row`, which holds
    /// one cell per term in matrix order.
    pub(crate) fn fill_distance_row(
        &self,
        view: &UndirectedView,
        source: usize,
        row: &mut [u16],
    ) -> Result<()> {
        let levels =
            traversal::bfs_levels(self.len(), source, |n| view.neighbors(n).iter().copied());
        for (target, (cell, level)) in row.iter_mut().zip(levels).enumerate() {
            let distance = level.ok_or_else(|| OntologyError::Unreachable {
                from: self.store.id(source).to_string(),
                to: self.store.id(target).to_string(),
            })?;
            *cell = u16::try_from(distance).map_err(|_| OntologyError::DistanceOverflow {
                from: self.store.id(source).to_string(),
                to: self.store.id(target).to_string(),
                distance,
            })?;
        }
        Ok(())
    }

    /// All-pairs undirected distances on `workers` threads (`0` = all).
    ///
    /// # Errors
    ///
    /// See [`matrix::build_distance_matrix`].
    pub fn distance_matrix(&self, workers: usize) -> Result<DistanceMatrix> {
        matrix::build_distance_matrix(self, workers)
    }

    /// The undirected view, built on first use.
    pub(crate) fn undirected(&self) -> &UndirectedView {
        self.undirected
            .get_or_init(|| UndirectedView::from_store(&self.store))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
