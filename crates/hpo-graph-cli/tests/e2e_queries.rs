//! E2E tests for the `hpog` query surface.
//!
//! Each test writes a small OBO release into an isolated temp directory and
//! runs `hpog` as a subprocess against it.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Miniature release:
///
/// ```text
/// HP:0000001 All
/// ├── HP:0000118 Phenotypic abnormality
/// │   ├── HP:0000707 Abnormality of the nervous system
/// │   │   └── HP:0001250 Seizure
/// │   └── HP:0000152 Abnormality of head or neck
/// │       └── HP:0001250 Seizure (second parent, for the diamond)
/// └── HP:0000005 Mode of inheritance
///     └── HP:0000006 Autosomal dominant inheritance
/// ```
const SAMPLE_OBO: &str = "\
format-version: 1.2
ontology: hp

[Term]
id: HP:0000001
name: All

[Term]
id: HP:0000118
name: Phenotypic abnormality
is_a: HP:0000001 ! All

[Term]
id: HP:0000707
name: Abnormality of the nervous system
is_a: HP:0000118 ! Phenotypic abnormality

[Term]
id: HP:0000152
name: Abnormality of head or neck
is_a: HP:0000118 ! Phenotypic abnormality

[Term]
id: HP:0001250
name: Seizure
is_a: HP:0000707 ! Abnormality of the nervous system
is_a: HP:0000152 ! Abnormality of head or neck

[Term]
id: HP:0000005
name: Mode of inheritance
is_a: HP:0000001 ! All

[Term]
id: HP:0000006
name: Autosomal dominant inheritance
is_a: HP:0000005 ! Mode of inheritance

[Term]
id: HP:0009999
name: Obsolete thing
is_obsolete: true
is_a: HP:0000707

[Typedef]
id: part_of
name: part of
";

/// Write the sample release into `dir` and return its path.
fn write_sample(dir: &Path) -> PathBuf {
    let path = dir.join("hp.obo");
    fs::write(&path, SAMPLE_OBO).expect("write sample obo");
    path
}

/// Build a Command targeting the hpog binary, rooted in `dir`.
fn hpog(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hpog"));
    cmd.current_dir(dir);
    // Keep user-level config out of the picture
    cmd.env("XDG_CONFIG_HOME", dir.join("xdg"));
    cmd.env_remove("FORMAT");
    cmd.env_remove("HPO_GRAPH_WORKERS");
    // Suppress tracing output that goes to stderr
    cmd.env("HPO_GRAPH_LOG", "error");
    cmd
}

/// Run `hpog --obo <sample> <args> --json` and parse stdout.
fn json(dir: &Path, args: &[&str]) -> Value {
    let obo = write_sample(dir);
    let output = hpog(dir)
        .arg("--obo")
        .arg(&obo)
        .args(args)
        .arg("--json")
        .output()
        .expect("hpog should not crash");
    assert!(
        output.status.success(),
        "hpog {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

fn ids(value: &Value) -> Vec<&str> {
    value["terms"]
        .as_array()
        .expect("terms array")
        .iter()
        .map(|t| t["id"].as_str().expect("id"))
        .collect()
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[test]
fn stats_reports_extracted_subtree() {
    let dir = TempDir::new().expect("tempdir");
    let stats = json(dir.path(), &["stats"]);
    assert_eq!(stats["root"], "HP:0000118");
    assert_eq!(stats["root_name"], "Phenotypic abnormality");
    assert_eq!(stats["terms"], 4);
    assert_eq!(stats["edges"], 4);
    assert_eq!(stats["max_depth"], 2);
    assert!(
        stats["content_hash"]
            .as_str()
            .expect("hash")
            .starts_with("blake3:")
    );
}

#[test]
fn depth_in_text_mode_is_a_bare_number() {
    let dir = TempDir::new().expect("tempdir");
    let obo = write_sample(dir.path());
    hpog(dir.path())
        .arg("--obo")
        .arg(&obo)
        .args(["--format", "text", "depth", "HP:0001250"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn directed_and_undirected_distance() {
    let dir = TempDir::new().expect("tempdir");
    let up = json(dir.path(), &["distance", "HP:0001250", "HP:0000118"]);
    assert_eq!(up["distance"], 2);

    let across = json(
        dir.path(),
        &["distance", "HP:0000707", "HP:0000152", "--undirected"],
    );
    assert_eq!(across["distance"], 2);
}

#[test]
fn lineage_relations() {
    let dir = TempDir::new().expect("tempdir");

    let below = json(dir.path(), &["lineage", "HP:0000707"]);
    assert_eq!(ids(&below), ["HP:0000707", "HP:0001250"]);

    let above = json(
        dir.path(),
        &["lineage", "HP:0001250", "--relation", "ancestors", "--no-self"],
    );
    assert_eq!(ids(&above), ["HP:0000118", "HP:0000152", "HP:0000707"]);

    let parents = json(
        dir.path(),
        &["lineage", "HP:0001250", "--relation", "parents", "--no-self"],
    );
    assert_eq!(parents["terms"][0]["name"], "Abnormality of head or neck");
}

#[test]
fn obsolete_terms_are_opt_in() {
    let dir = TempDir::new().expect("tempdir");
    let default = json(dir.path(), &["stats"]);
    assert_eq!(default["terms"], 4);

    let with_obsolete = json(dir.path(), &["--include-obsolete", "stats"]);
    assert_eq!(with_obsolete["terms"], 5);
}

#[test]
fn alternate_root_from_flag() {
    let dir = TempDir::new().expect("tempdir");
    let stats = json(dir.path(), &["--root", "HP:0000005", "stats"]);
    assert_eq!(stats["root"], "HP:0000005");
    assert_eq!(stats["terms"], 2);
}

#[test]
fn project_config_sets_root() {
    let dir = TempDir::new().expect("tempdir");
    let config_dir = dir.path().join(".hpo-graph");
    fs::create_dir_all(&config_dir).expect("config dir");
    fs::write(config_dir.join("config.toml"), "root_id = \"HP:0000005\"\n").expect("config");

    let stats = json(dir.path(), &["stats"]);
    assert_eq!(stats["root"], "HP:0000005");
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn pruned_term_is_not_found() {
    let dir = TempDir::new().expect("tempdir");
    let obo = write_sample(dir.path());
    hpog(dir.path())
        .arg("--obo")
        .arg(&obo)
        .args(["--format", "text", "depth", "HP:0000006"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2001"))
        .stderr(predicate::str::contains("HP:0000006"));
}

#[test]
fn unreachable_directed_distance_fails_as_json() {
    let dir = TempDir::new().expect("tempdir");
    let obo = write_sample(dir.path());
    let output = hpog(dir.path())
        .arg("--obo")
        .arg(&obo)
        .args(["distance", "HP:0000118", "HP:0001250", "--json"])
        .output()
        .expect("hpog should not crash");
    assert!(!output.status.success());
    let err: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    assert_eq!(err["error"]["error_code"], "E2002");
}

#[test]
fn missing_obo_file_fails() {
    let dir = TempDir::new().expect("tempdir");
    hpog(dir.path())
        .args(["--obo", "nope.obo", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.obo"));
}
