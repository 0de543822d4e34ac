#![forbid(unsafe_code)]
//! hpo-graph-core library.
//!
//! An in-memory engine over the phenotypic-abnormality subtree of the Human
//! Phenotype Ontology: hierarchy queries, depth-from-root, pairwise
//! distances and a parallel all-pairs distance matrix.
//!
//! # Conventions
//!
//! - **Errors**: queries return [`error::Result`] with a typed
//!   [`OntologyError`]; file and config loading use `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! ```rust
//! use hpo_graph_core::{Ontology, graph::RawOntology};
//!
//! let raw = RawOntology::from_edges([
//!     ("HP:0000118", "HP:0000001"),
//!     ("HP:0000707", "HP:0000118"),
//! ]);
//! let onto = Ontology::from_raw(raw)?;
//! assert_eq!(onto.depth("HP:0000707")?, 1);
//! # Ok::<(), hpo_graph_core::OntologyError>(())
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod obo;
pub mod ontology;
pub mod traversal;

pub use config::OntologyConfig;
pub use error::{ErrorCode, OntologyError};
pub use matrix::{DistanceMatrix, build_distance_matrix};
pub use ontology::Ontology;
