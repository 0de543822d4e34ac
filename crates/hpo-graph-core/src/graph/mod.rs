//! Ontology graph module.
//!
//! # Overview
//!
//! This module turns a parsed is-a hierarchy into the frozen structure that
//! every query in [`crate::ontology`] and [`crate::matrix`] reads.
//!
//! ## Pipeline
//!
//! ```text
//! OBO file / hand-built edges
//!        ↓  build::RawOntology::add_is_a()
//! RawOntology (StableDiGraph, full ontology incl. super-root)
//!        ↓  extract::extract_subtree()
//! RawOntology (designated root's subtree only)
//!        ↓  store::GraphStore::freeze()
//! GraphStore (DiGraph keyed by dense position)
//!   ├─ index::NodeIndexer: term ID ↔ position
//!   └─ store::UndirectedView: built lazily by the owning Ontology
//! ```
//!
//! ## Edge Direction
//!
//! Edges point from the specific term to the general one (`child → parent`
//! in domain terms). Raw predecessors are therefore domain children and the
//! raw ancestor closure is the domain descendant set.
//!
//! ## Typical Usage
//!
//! ```rust
//! use hpo_graph_core::graph::{GraphStore, RawOntology, extract_subtree};
//!
//! let mut raw = RawOntology::from_edges([("A", "ALL"), ("B", "ALL"), ("x", "A")]);
//! extract_subtree(&mut raw, "A", "ALL")?;
//! let store = GraphStore::freeze(&raw);
//! assert_eq!(store.node_count(), 2);
//! # Ok::<(), hpo_graph_core::OntologyError>(())
//! ```

pub mod build;
pub mod extract;
pub mod index;
pub mod store;

// Re-export primary types at module level for convenience.
pub use build::RawOntology;
pub use extract::{ExtractionSummary, extract_subtree};
pub use index::NodeIndexer;
pub use store::{GraphStore, UndirectedView};
