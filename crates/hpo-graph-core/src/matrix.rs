//! All-pairs undirected distance matrix.
//!
//! # Algorithm
//!
//! One BFS per term over the undirected view, each filling a full row.
//! The `N × N` output is allocated once and split into disjoint row slices
//! with `par_chunks_mut`; chunk `i` is always row `i`, whichever worker
//! takes it, so the result is identical for every worker count.
//!
//! # Failure
//!
//! `try_for_each` stops at the first failing row; the buffer is dropped and
//! no partial matrix is returned.

use std::io::{self, Write};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::error::{OntologyError, Result};
use crate::ontology::Ontology;

/// Dense row-major `N × N` matrix of `u16` distances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<u16>,
}

impl DistanceMatrix {
    /// Number of rows (and columns).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Distance between the terms at positions `i` and `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<u16> {
        if i >= self.size || j >= self.size {
            return None;
        }
        self.data.get(i * self.size + j).copied()
    }

    /// Row `i`, i.e. the distance vector of the term at position `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[u16]> {
        if i >= self.size {
            return None;
        }
        let start = i * self.size;
        self.data.get(start..start + self.size)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u16]> {
        // chunks_exact(0) panics; an empty matrix simply has no rows.
        self.data.chunks_exact(self.size.max(1))
    }

    /// Row-major cells.
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u16> {
        self.data
    }

    /// Write the cells as little-endian `u16`, row-major, without a header.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `w`.
    pub fn write_le<W: Write>(&self, mut w: W) -> io::Result<()> {
        for row in self.rows() {
            let bytes: Vec<u8> = row.iter().flat_map(|cell| cell.to_le_bytes()).collect();
            w.write_all(&bytes)?;
        }
        w.flush()
    }
}

/// Compute every row of the distance matrix on `workers` threads.
///
/// `workers == 0` lets rayon use every available slot.
///
/// # Errors
///
/// [`OntologyError::WorkerPool`] if the pool cannot be built, otherwise the
/// first row error ([`OntologyError::Unreachable`] for a disconnected term,
/// [`OntologyError::DistanceOverflow`] for a distance beyond `u16`).
#[instrument(skip(ontology), fields(terms = ontology.len()))]
pub fn build_distance_matrix(ontology: &Ontology, workers: usize) -> Result<DistanceMatrix> {
    let started = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("hpo-graph-row-{i}"))
        .build()
        .map_err(|e| OntologyError::WorkerPool(e.to_string()))?;

    let view = ontology.undirected();
    let size = ontology.len();
    debug!(threads = pool.current_num_threads(), size, "distance matrix pool ready");

    let mut data = vec![0_u16; size * size];
    // chunk size 0 panics; an empty buffer yields no chunks anyway.
    pool.install(|| {
        data.par_chunks_mut(size.max(1))
            .enumerate()
            .try_for_each(|(pos, row)| ontology.fill_distance_row(view, pos, row))
    })?;

    let matrix = DistanceMatrix { size, data };
    info!(
        terms = matrix.size(),
        elapsed = ?started.elapsed(),
        "distance matrix built"
    );
    Ok(matrix)
}
