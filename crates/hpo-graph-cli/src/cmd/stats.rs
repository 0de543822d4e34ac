//! `hpog stats`: size and shape of the extracted subtree.

use std::io::Write;

use hpo_graph_core::Ontology;
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_name: Option<String>,
    pub terms: usize,
    pub edges: usize,
    pub max_depth: usize,
    pub pruned_terms: usize,
    pub content_hash: String,
}

impl StatsReport {
    pub fn from_ontology(onto: &Ontology) -> Self {
        Self {
            root: onto.root().to_string(),
            root_name: onto.name(onto.root()).map(str::to_string),
            terms: onto.len(),
            edges: onto.edge_count(),
            max_depth: onto.depths().values().copied().max().unwrap_or(0),
            pruned_terms: onto.extraction().removed_terms,
            content_hash: onto.content_hash().to_string(),
        }
    }
}

pub fn run_stats(onto: &Ontology, mode: OutputMode) -> anyhow::Result<()> {
    let report = StatsReport::from_ontology(onto);
    render_mode(
        mode,
        &report,
        |r, w| {
            writeln!(
                w,
                "root={} terms={} edges={} max_depth={} pruned={} hash={}",
                r.root, r.terms, r.edges, r.max_depth, r.pruned_terms, r.content_hash
            )
        },
        |r, w| {
            pretty_section(w, "Ontology")?;
            let root = r
                .root_name
                .as_ref()
                .map_or_else(|| r.root.clone(), |name| format!("{} ({name})", r.root));
            pretty_kv(w, "root", root)?;
            pretty_kv(w, "terms", r.terms.to_string())?;
            pretty_kv(w, "edges", r.edges.to_string())?;
            pretty_kv(w, "max depth", r.max_depth.to_string())?;
            pretty_kv(w, "pruned", r.pruned_terms.to_string())?;
            pretty_kv(w, "hash", &r.content_hash)
        },
    )
}
