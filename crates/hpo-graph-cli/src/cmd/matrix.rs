//! `hpog matrix`: write the all-pairs distance matrix.
//!
//! Two files are produced:
//!
//! - `<out>`: `N × N` little-endian `u16`, row-major, no header.
//! - `<out>.index.json`: term order, root and graph hash.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use hpo_graph_core::{Ontology, OntologyConfig};
use serde::Serialize;
use tracing::info;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use crate::source::index_path;

/// Arguments for `hpog matrix`.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    /// Output path for the raw matrix.
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,

    /// Worker threads (0 = all available; default from config).
    #[arg(long)]
    pub workers: Option<usize>,
}

#[derive(Debug, Serialize)]
struct MatrixIndex<'a> {
    size: usize,
    dtype: &'static str,
    root: &'a str,
    content_hash: &'a str,
    order: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct MatrixReport {
    matrix: PathBuf,
    index: PathBuf,
    size: usize,
    workers: usize,
}

pub fn run_matrix(
    args: &MatrixArgs,
    onto: &Ontology,
    config: &OntologyConfig,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let workers = args.workers.unwrap_or(config.workers);
    let matrix = onto.distance_matrix(workers)?;

    let file = File::create(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;
    matrix
        .write_le(BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", args.out.display()))?;

    let index = MatrixIndex {
        size: matrix.size(),
        dtype: "u16le",
        root: onto.root(),
        content_hash: onto.content_hash(),
        order: onto.iter().collect(),
    };
    let index_file = index_path(&args.out);
    let mut writer = BufWriter::new(
        File::create(&index_file)
            .with_context(|| format!("Failed to create {}", index_file.display()))?,
    );
    serde_json::to_writer(&mut writer, &index)?;
    writer.flush()?;
    info!(size = matrix.size(), path = %args.out.display(), "matrix written");

    let report = MatrixReport {
        matrix: args.out.clone(),
        index: index_file,
        size: matrix.size(),
        workers,
    };
    render_mode(
        mode,
        &report,
        |r, w| writeln!(w, "{} {}x{}", r.matrix.display(), r.size, r.size),
        |r, w| {
            pretty_section(w, "Distance matrix")?;
            pretty_kv(w, "matrix", r.matrix.display().to_string())?;
            pretty_kv(w, "index", r.index.display().to_string())?;
            pretty_kv(w, "size", format!("{}x{}", r.size, r.size))
        },
    )
}
