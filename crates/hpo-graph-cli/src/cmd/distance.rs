//! `hpog depth` and `hpog distance`: point distance queries.

use std::io::Write;

use clap::Args;
use hpo_graph_core::Ontology;
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, render_mode};

/// Arguments for `hpog depth`.
#[derive(Args, Debug)]
pub struct DepthArgs {
    /// Term ID, e.g. HP:0001250.
    pub id: String,
}

/// Arguments for `hpog distance`.
#[derive(Args, Debug)]
pub struct DistanceArgs {
    /// Source term ID.
    pub source: String,

    /// Target term ID.
    pub target: String,

    /// Ignore edge direction.
    #[arg(long)]
    pub undirected: bool,
}

#[derive(Debug, Serialize)]
struct DepthReport<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    depth: usize,
}

#[derive(Debug, Serialize)]
struct DistanceReport<'a> {
    source: &'a str,
    target: &'a str,
    undirected: bool,
    distance: usize,
}

pub fn run_depth(args: &DepthArgs, onto: &Ontology, mode: OutputMode) -> anyhow::Result<()> {
    let report = DepthReport {
        id: &args.id,
        name: onto.name(&args.id),
        depth: onto.depth(&args.id)?,
    };
    render_mode(
        mode,
        &report,
        |r, w| writeln!(w, "{}", r.depth),
        |r, w| {
            pretty_kv(w, "term", r.name.map_or_else(|| r.id.to_string(), |n| format!("{} ({n})", r.id)))?;
            pretty_kv(w, "depth", r.depth.to_string())
        },
    )
}

pub fn run_distance(args: &DistanceArgs, onto: &Ontology, mode: OutputMode) -> anyhow::Result<()> {
    let report = DistanceReport {
        source: &args.source,
        target: &args.target,
        undirected: args.undirected,
        distance: onto.distance(&args.source, &args.target, args.undirected)?,
    };
    render_mode(
        mode,
        &report,
        |r, w| writeln!(w, "{}", r.distance),
        |r, w| {
            let arrow = if r.undirected { "<->" } else { "->" };
            pretty_kv(w, "path", format!("{} {arrow} {}", r.source, r.target))?;
            pretty_kv(w, "distance", r.distance.to_string())
        },
    )
}
