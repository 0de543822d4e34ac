//! Engine configuration: which subtree to keep, how many matrix workers to
//! run, and where the OBO file comes from.
//!
//! Read from TOML. Every field has a default, so a partial file (or none at
//! all) is valid.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`OntologyConfig::workers`].
pub const WORKERS_ENV: &str = "HPO_GRAPH_WORKERS";

/// Default designated root: `HP:0000118` Phenotypic abnormality.
pub const DEFAULT_ROOT_ID: &str = "HP:0000118";

/// Default super-root sentinel: `HP:0000001` All.
pub const DEFAULT_SUPER_ROOT_ID: &str = "HP:0000001";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyConfig {
    #[serde(default = "default_root_id")]
    pub root_id: String,
    #[serde(default = "default_super_root_id")]
    pub super_root_id: String,
    /// Matrix worker count; `0` uses every available slot.
    #[serde(default)]
    pub workers: usize,
    #[serde(default = "default_true")]
    pub ignore_obsolete: bool,
    /// Path or `http(s)://` URL of the OBO file.
    #[serde(default)]
    pub source: Option<String>,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            root_id: default_root_id(),
            super_root_id: default_super_root_id(),
            workers: 0,
            ignore_obsolete: default_true(),
            source: None,
        }
    }
}

/// Path of the per-project config file below `project_root`.
#[must_use]
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".hpo-graph/config.toml")
}

/// Path of the per-user config file, if the platform has a config dir.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hpo-graph/config.toml"))
}

/// Parse a config file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is not valid
/// TOML for [`OntologyConfig`].
pub fn load_config_file(path: &Path) -> Result<OntologyConfig> {
    if !path.exists() {
        return Ok(OntologyConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<OntologyConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the effective configuration.
///
/// Precedence (highest wins):
/// 1. `explicit` path, when given (must exist)
/// 2. `.hpo-graph/config.toml` below `project_root`
/// 3. the user config file
/// 4. built-in defaults
///
/// `HPO_GRAPH_WORKERS` is applied on top of whichever file was used.
///
/// # Errors
///
/// Returns an error if `explicit` does not exist, if the chosen file cannot
/// be read or parsed, or if `HPO_GRAPH_WORKERS` is not a number.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<OntologyConfig> {
    let config = if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("config file {} does not exist", path.display());
        }
        load_config_file(path)?
    } else {
        let project = project_config_path(project_root);
        if project.exists() {
            load_config_file(&project)?
        } else if let Some(user) = user_config_path().filter(|p| p.exists()) {
            load_config_file(&user)?
        } else {
            OntologyConfig::default()
        }
    };

    apply_env_overrides(config, std::env::var(WORKERS_ENV).ok().as_deref())
}

/// Apply the `HPO_GRAPH_WORKERS` value, separated from `std::env` for
/// testability.
fn apply_env_overrides(mut config: OntologyConfig, workers: Option<&str>) -> Result<OntologyConfig> {
    if let Some(raw) = workers.map(str::trim).filter(|v| !v.is_empty()) {
        config.workers = raw
            .parse()
            .with_context(|| format!("{WORKERS_ENV}={raw} is not a worker count"))?;
    }
    Ok(config)
}

fn default_root_id() -> String {
    DEFAULT_ROOT_ID.to_string()
}

fn default_super_root_id() -> String {
    DEFAULT_SUPER_ROOT_ID.to_string()
}

const fn default_true() -> bool {
    true
}
