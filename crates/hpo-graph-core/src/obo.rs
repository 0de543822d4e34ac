//! Lenient OBO 1.2 reader.
//!
//! Only what the graph needs is read from `[Term]` stanzas:
//!
//! ```text
//! [Term]
//! id: HP:0000118
//! name: Phenotypic abnormality
//! is_a: HP:0000001 ! All
//! is_obsolete: true
//! ```
//!
//! Other stanza types, unknown tags, qualifier blocks (`{...}`) and trailing
//! `! comments` are skipped. The grammar is not validated: malformed lines
//! are ignored rather than reported.
//!
//! Terms are inserted in file order before any edge, so the node order of
//! the resulting [`RawOntology`] is the file's term order followed by any
//! `is_a` targets that never appear as terms.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::graph::RawOntology;

/// A parsed ontology file: the graph plus term labels.
#[derive(Debug, Clone, Default)]
pub struct OboDocument {
    pub ontology: RawOntology,
    /// Term ID → `name:` value.
    pub names: HashMap<String, String>,
    /// Obsolete stanzas that were skipped.
    pub skipped_obsolete: usize,
}

#[derive(Debug, Default)]
struct TermStanza {
    id: Option<String>,
    name: Option<String>,
    parents: Vec<String>,
    obsolete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Term,
    Other,
}

/// Read an OBO file from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn read_obo_path(path: &Path, ignore_obsolete: bool) -> Result<OboDocument> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    read_obo(BufReader::new(file), ignore_obsolete)
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Read OBO content from any buffered reader.
///
/// # Errors
///
/// Returns an error only for I/O failures of `reader`.
#[instrument(skip(reader))]
pub fn read_obo<R: BufRead>(reader: R, ignore_obsolete: bool) -> Result<OboDocument> {
    let mut terms = Vec::new();
    let mut current = TermStanza::default();
    let mut section = Section::Header;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("line {}", line_no + 1))?;
        let line = line.trim();

        if line.starts_with('[') {
            if section == Section::Term {
                terms.push(std::mem::take(&mut current));
            }
            section = if line == "[Term]" {
                Section::Term
            } else {
                Section::Other
            };
            continue;
        }
        if section != Section::Term {
            continue;
        }

        let Some((tag, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match tag.trim() {
            "id" => current.id = first_token(value),
            "name" => current.name = Some(value.to_string()),
            "is_a" => current.parents.extend(first_token(value)),
            "is_obsolete" => current.obsolete = value == "true",
            _ => {}
        }
    }
    if section == Section::Term {
        terms.push(current);
    }

    Ok(assemble(terms, ignore_obsolete))
}

/// Parse OBO content held in memory.
#[must_use]
pub fn parse_obo_str(content: &str, ignore_obsolete: bool) -> OboDocument {
    // Reading from a byte slice cannot fail.
    read_obo(content.as_bytes(), ignore_obsolete).unwrap_or_default()
}

fn assemble(terms: Vec<TermStanza>, ignore_obsolete: bool) -> OboDocument {
    let mut doc = OboDocument::default();
    let mut kept = Vec::with_capacity(terms.len());

    for term in terms {
        let Some(id) = term.id else {
            continue;
        };
        if ignore_obsolete && term.obsolete {
            doc.skipped_obsolete += 1;
            continue;
        }
        doc.ontology.add_term(&id);
        if let Some(name) = term.name {
            doc.names.insert(id.clone(), name);
        }
        kept.push((id, term.parents));
    }

    for (id, parents) in &kept {
        for parent in parents {
            doc.ontology.add_is_a(id, parent);
        }
    }

    debug!(
        terms = doc.ontology.node_count(),
        edges = doc.ontology.edge_count(),
        skipped_obsolete = doc.skipped_obsolete,
        "obo parsed"
    );
    doc
}

/// First whitespace-separated token, with any `!` comment removed.
fn first_token(value: &str) -> Option<String> {
    let value = value.split('!').next().unwrap_or_default();
    value.split_whitespace().next().map(str::to_string)
}
