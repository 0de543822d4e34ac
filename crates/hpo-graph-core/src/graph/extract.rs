//! One-time pruning of the full ontology down to a single top-level subtree.
//!
//! # Overview
//!
//! Ontology files hang every top-level category below a synthetic
//! super-root (`HP:0000001 All` for HPO). The engine works on exactly one of
//! those categories, so extraction:
//!
//! 1. collects the direct raw predecessors of the super-root (the top-level
//!    categories),
//! 2. deletes every category other than the designated root together with
//!    its whole raw-ancestor closure (everything underneath it in domain
//!    terms),
//! 3. deletes the super-root itself.
//!
//! A term that sits below both the designated root and a pruned sibling is
//! deleted with the sibling.

use std::collections::{HashSet, VecDeque};

use petgraph::Direction;
use petgraph::stable_graph::NodeIndex;
use tracing::{debug, instrument};

use crate::error::{OntologyError, Result};
use crate::graph::build::RawOntology;

/// Counts reported by [`extract_subtree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Top-level siblings of the designated root that were pruned.
    pub pruned_categories: usize,
    /// Terms deleted, the super-root included.
    pub removed_terms: usize,
    /// Terms remaining after extraction.
    pub kept_terms: usize,
}

/// Restrict `raw` to the subtree of `root_id` in place.
///
/// # Errors
///
/// Returns [`OntologyError::GraphStructure`] if `super_root_id` or
/// `root_id` is absent from the input, or if pruning a sibling category
/// would also delete `root_id`.
#[instrument(skip(raw), fields(nodes = raw.node_count()))]
pub fn extract_subtree(
    raw: &mut RawOntology,
    root_id: &str,
    super_root_id: &str,
) -> Result<ExtractionSummary> {
    let super_root = raw.node_index(super_root_id).ok_or_else(|| {
        OntologyError::GraphStructure(format!("super-root {super_root_id} is missing"))
    })?;
    let root = raw.node_index(root_id).ok_or_else(|| {
        OntologyError::GraphStructure(format!("root {root_id} is missing"))
    })?;

    let mut seen = HashSet::new();
    let top_level: Vec<NodeIndex> = raw
        .graph
        .neighbors_directed(super_root, Direction::Incoming)
        .filter(|idx| seen.insert(*idx))
        .collect();

    let before = raw.node_count();
    let mut pruned_categories = 0;
    let mut doomed: HashSet<NodeIndex> = HashSet::new();

    // Every closure is collected before anything is removed, so a rejected
    // input is left untouched.
    for category in top_level {
        if category == root || doomed.contains(&category) {
            continue;
        }
        let closure = raw_ancestor_closure(raw, category);
        if closure.contains(&root) {
            return Err(OntologyError::GraphStructure(format!(
                "root {root_id} lies below sibling category {}",
                raw.term_id(category).unwrap_or_default()
            )));
        }
        debug!(
            category = raw.term_id(category).unwrap_or_default(),
            terms = closure.len(),
            "pruning sibling category"
        );
        doomed.extend(closure);
        pruned_categories += 1;
    }

    for idx in doomed {
        raw.remove_term(idx);
    }

    raw.remove_term(super_root);

    let summary = ExtractionSummary {
        pruned_categories,
        removed_terms: before - raw.node_count(),
        kept_terms: raw.node_count(),
    };
    debug!(?summary, "subtree extracted");
    Ok(summary)
}

/// `start` plus every node with a directed path ending at `start`.
fn raw_ancestor_closure(raw: &RawOntology, start: NodeIndex) -> HashSet<NodeIndex> {
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for next in raw.graph.neighbors_directed(current, Direction::Incoming) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    visited
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &str = "HP:0000001";
    const ROOT: &str = "HP:0000118";

    #[test]
    fn sibling_category_and_its_subtree_are_removed() {
        let mut raw = RawOntology::from_edges([(ROOT, ALL), ("B", ALL), ("C", "B")]);
        let summary = extract_subtree(&mut raw, ROOT, ALL).expect("extract");

        assert!(raw.contains(ROOT));
        assert!(!raw.contains("B"));
        assert!(!raw.contains("C"));
        assert!(!raw.contains(ALL));
        assert_eq!(summary.pruned_categories, 1);
        assert_eq!(summary.removed_terms, 3);
        assert_eq!(summary.kept_terms, 1);
    }

    #[test]
    fn root_without_siblings_only_drops_sentinel() {
        let mut raw = RawOntology::from_edges([(ROOT, ALL), ("x", ROOT), ("y", "x")]);
        let summary = extract_subtree(&mut raw, ROOT, ALL).expect("extract");

        assert_eq!(summary.pruned_categories, 0);
        assert_eq!(summary.removed_terms, 1);
        assert_eq!(raw.node_count(), 3);
        assert_eq!(raw.edge_count(), 2);
    }

    #[test]
    fn missing_super_root_is_a_structure_error() {
        let mut raw = RawOntology::from_edges([("x", ROOT)]);
        let err = extract_subtree(&mut raw, ROOT, ALL).expect_err("must fail");
        assert!(matches!(err, OntologyError::GraphStructure(_)));
        assert_eq!(raw.node_count(), 2, "failed extraction leaves input intact");
    }

    #[test]
    fn missing_root_is_a_structure_error() {
        let mut raw = RawOntology::from_edges([("B", ALL)]);
        let err = extract_subtree(&mut raw, ROOT, ALL).expect_err("must fail");
        assert!(matches!(err, OntologyError::GraphStructure(_)));
    }

    #[test]
    fn shared_descendant_goes_with_pruned_sibling() {
        let mut raw = RawOntology::from_edges([
            (ROOT, ALL),
            ("B", ALL),
            ("shared", ROOT),
            ("shared", "B"),
            ("kept", ROOT),
        ]);
        extract_subtree(&mut raw, ROOT, ALL).expect("extract");

        assert!(!raw.contains("shared"));
        assert!(raw.contains("kept"));
    }

    #[test]
    fn parallel_edges_to_sentinel_are_handled_once() {
        let mut raw = RawOntology::from_edges([(ROOT, ALL), ("B", ALL), ("B", ALL)]);
        let summary = extract_subtree(&mut raw, ROOT, ALL).expect("extract");
        assert_eq!(summary.pruned_categories, 1);
        assert_eq!(raw.node_count(), 1);
    }

    #[test]
    fn nested_sibling_categories_do_not_double_remove() {
        // "C" is both a top-level category and below "B".
        let mut raw = RawOntology::from_edges([
            (ROOT, ALL),
            ("B", ALL),
            ("C", ALL),
            ("C", "B"),
            ("D", "C"),
        ]);
        let summary = extract_subtree(&mut raw, ROOT, ALL).expect("extract");
        assert_eq!(raw.node_count(), 1);
        assert!(summary.pruned_categories >= 1);
    }

    #[test]
    fn root_below_sibling_is_rejected() {
        let mut raw = RawOntology::from_edges([(ROOT, ALL), ("B", ALL), (ROOT, "B")]);
        let err = extract_subtree(&mut raw, ROOT, ALL).expect_err("must fail");
        assert!(matches!(err, OntologyError::GraphStructure(_)));
    }

    #[test]
    fn rejected_extraction_leaves_earlier_siblings_in_place() {
        // "C" comes before "B" at the sentinel and holds the root, so a
        // removal made while visiting "B" first must not survive the error.
        for edges in [
            [(ROOT, ALL), ("C", ALL), ("B", ALL), ("bx", "B"), (ROOT, "C")],
            [(ROOT, ALL), ("B", ALL), ("C", ALL), ("bx", "B"), (ROOT, "C")],
        ] {
            let mut raw = RawOntology::from_edges(edges);
            let before = (raw.node_count(), raw.edge_count());
            let err = extract_subtree(&mut raw, ROOT, ALL).expect_err("must fail");
            assert!(matches!(err, OntologyError::GraphStructure(_)));
            assert_eq!((raw.node_count(), raw.edge_count()), before);
            assert!(raw.contains("B") && raw.contains("bx") && raw.contains(ALL));
        }
    }
}
