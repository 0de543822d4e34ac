//! `hpog lineage`: hierarchy neighbourhood of a term.
//!
//! # Direction
//!
//! `ancestors`/`parents` walk towards the root (more general terms);
//! `descendants`/`children` walk away from it (more specific terms).

use std::io::Write;

use clap::{Args, ValueEnum};
use hpo_graph_core::Ontology;
use serde::Serialize;

use crate::output::{OutputMode, pretty_section, render_mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Children,
    Parents,
    Descendants,
    Ancestors,
}

/// Arguments for `hpog lineage`.
#[derive(Args, Debug)]
pub struct LineageArgs {
    /// Term ID, e.g. HP:0001250.
    pub id: String,

    /// Which related terms to list.
    #[arg(long, value_enum, default_value_t = Relation::Descendants)]
    pub relation: Relation,

    /// Leave the term itself out of the result.
    #[arg(long)]
    pub no_self: bool,
}

#[derive(Debug, Serialize)]
struct LineageEntry<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct LineageReport<'a> {
    id: &'a str,
    relation: Relation,
    terms: Vec<LineageEntry<'a>>,
}

pub fn run_lineage(args: &LineageArgs, onto: &Ontology, mode: OutputMode) -> anyhow::Result<()> {
    let include_self = !args.no_self;
    let ids = match args.relation {
        Relation::Children => onto.children(&args.id, include_self)?,
        Relation::Parents => onto.parents(&args.id, include_self)?,
        Relation::Descendants => onto.descendants(&args.id, include_self)?,
        Relation::Ancestors => onto.ancestors(&args.id, include_self)?,
    };

    let report = LineageReport {
        id: &args.id,
        relation: args.relation,
        terms: ids
            .iter()
            .map(|id| LineageEntry {
                id: id.as_str(),
                name: onto.name(id),
            })
            .collect(),
    };

    render_mode(
        mode,
        &report,
        |r, w| {
            for term in &r.terms {
                writeln!(w, "{}", term.id)?;
            }
            Ok(())
        },
        |r, w| {
            pretty_section(w, &format!("{:?} of {} ({})", r.relation, r.id, r.terms.len()))?;
            for term in &r.terms {
                match term.name {
                    Some(name) => writeln!(w, "{}  {name}", term.id)?,
                    None => writeln!(w, "{}", term.id)?,
                }
            }
            Ok(())
        },
    )
}
