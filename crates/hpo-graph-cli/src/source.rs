//! Ontology acquisition: pick the OBO source, fetch it if remote, parse it
//! and hand the graph to the core.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use hpo_graph_core::obo::{OboDocument, read_obo_path};
use hpo_graph_core::{Ontology, OntologyConfig};
use tempfile::NamedTempFile;
use tracing::{info, instrument};

/// Upstream location of the latest HPO release.
pub const DEFAULT_OBO_URL: &str = "http://purl.obolibrary.org/obo/hp.obo";

/// Where the ontology comes from and which subtree to keep.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Local OBO file to load.
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "url")]
    pub obo: Option<PathBuf>,

    /// Download the OBO file from this URL instead.
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Designated root term (default: HP:0000118).
    #[arg(long, global = true, value_name = "ID")]
    pub root: Option<String>,

    /// Super-root sentinel term (default: HP:0000001).
    #[arg(long, global = true, value_name = "ID")]
    pub super_root: Option<String>,

    /// Keep terms marked `is_obsolete: true`.
    #[arg(long, global = true)]
    pub include_obsolete: bool,

    /// Config file to use instead of .hpo-graph/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// A resolved location of the OBO file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl SourceArgs {
    /// Fold CLI overrides into `config`.
    pub fn apply(&self, mut config: OntologyConfig) -> OntologyConfig {
        if let Some(root) = &self.root {
            config.root_id.clone_from(root);
        }
        if let Some(super_root) = &self.super_root {
            config.super_root_id.clone_from(super_root);
        }
        if self.include_obsolete {
            config.ignore_obsolete = false;
        }
        config
    }

    /// `--obo` > `--url` > config `source` > upstream URL.
    pub fn resolve(&self, config: &OntologyConfig) -> Source {
        if let Some(path) = &self.obo {
            return Source::Path(path.clone());
        }
        if let Some(url) = &self.url {
            return Source::Url(url.clone());
        }
        match config.source.as_deref() {
            Some(s) if is_remote(s) => Source::Url(s.to_string()),
            Some(s) => Source::Path(PathBuf::from(s)),
            None => Source::Url(DEFAULT_OBO_URL.to_string()),
        }
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read, extract and freeze the ontology described by `source`.
#[instrument(skip(config))]
pub fn load_ontology(source: &Source, config: &OntologyConfig) -> Result<Ontology> {
    let doc = match source {
        Source::Path(path) => read_obo_path(path, config.ignore_obsolete)?,
        Source::Url(url) => {
            let file = fetch_to_tempfile(url)?;
            read_obo_path(file.path(), config.ignore_obsolete)?
        }
    };
    build(doc, config)
}

fn build(doc: OboDocument, config: &OntologyConfig) -> Result<Ontology> {
    let onto = Ontology::from_config(doc.ontology, config)
        .with_context(|| format!("Failed to extract the subtree of {}", config.root_id))?
        .with_names(doc.names);
    info!(terms = onto.len(), root = onto.root(), "ontology loaded");
    Ok(onto)
}

/// Download `url` into a temporary file that is deleted on drop.
fn fetch_to_tempfile(url: &str) -> Result<NamedTempFile> {
    info!(url, "downloading ontology");
    let response = ureq::get(url)
        .call()
        .with_context(|| format!("Failed to fetch {url}"))?;

    let file = NamedTempFile::new().context("Failed to create temporary file")?;
    let mut writer = BufWriter::new(file.as_file());
    std::io::copy(&mut response.into_reader(), &mut writer)
        .with_context(|| format!("Failed to download {url}"))?;
    writer.flush().context("Failed to flush download")?;
    drop(writer);
    Ok(file)
}

/// Sidecar path written next to a matrix file.
pub fn index_path(matrix: &Path) -> PathBuf {
    let mut name = matrix.as_os_str().to_owned();
    name.push(".index.json");
    PathBuf::from(name)
}
