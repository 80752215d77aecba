//! End-to-end tests for the command handlers using files on disk.

use std::io::Write;

use clap::Parser;
use sessionseek_cli::{run, Cli};
use tempfile::TempDir;

const CANDIDATES: &str = r#"
- id: eu-1
  properties:
    - key: Region
      value: { type: string, value: EU }
    - key: Slots
      value: { type: int32, value: 6 }
- id: na-1
  properties:
    - key: Region
      value: { type: string, value: NA }
    - key: Slots
      value: { type: int32, value: 1 }
- id: bare
"#;

const STORE: &str = r#"
- key: Map
  value: { type: string, value: Harbor }
- key: Big
  value: { type: int32, value: 300 }
"#;

const RESULTS: &str = r#"[
  {"session_id": "s1", "owner_id": "host-1", "owner_name": "One", "ping_ms": 20,
   "settings": {"num_public_connections": 8,
                "extra": [{"key": "Mode", "value": {"type": "string", "value": "ctf"}}]}},
  {"session_id": "s2", "owner_id": "host-2", "owner_name": "Two", "ping_ms": 90,
   "settings": {"extra": [{"key": "Mode", "value": {"type": "string", "value": "dm"}}]}},
  {"session_id": "s3", "owner_id": "host-3", "owner_name": "Three", "ping_ms": 40,
   "settings": {"is_lan": true}}
]"#;

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path.to_string_lossy().into_owned()
}

fn exec(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("sessionseek").chain(args.iter().copied()))?;
    run(&cli)
}

fn json(args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--output", "json"];
    full.extend_from_slice(args);
    serde_json::from_str(&exec(&full).unwrap()).unwrap()
}

fn ids(value: &serde_json::Value, field: &str) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item[field].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// filter
// =============================================================================

#[test]
fn filter_with_where_expressions() {
    let dir = TempDir::new().unwrap();
    let candidates = write(&dir, "candidates.yaml", CANDIDATES);

    let out = json(&["filter", &candidates, "-w", "Slots >= 2"]);
    assert_eq!(ids(&out, "id"), ["eu-1", "bare"]);
}

#[test]
fn filter_with_constraint_file() {
    let dir = TempDir::new().unwrap();
    let candidates = write(&dir, "candidates.yaml", CANDIDATES);
    let filters = write(
        &dir,
        "filters.json",
        r#"[{"key": "Region", "op": "eq", "value": {"type": "string", "value": "NA"}}]"#,
    );

    let out = json(&["filter", &candidates, "--filters", &filters]);
    assert_eq!(ids(&out, "id"), ["na-1", "bare"]);
}

#[test]
fn filter_mismatched_kind_drops_candidates() {
    let dir = TempDir::new().unwrap();
    let candidates = write(&dir, "candidates.yaml", CANDIDATES);

    // Slots is int32; an int64 literal never matches it.
    let out = json(&["filter", &candidates, "-w", "Slots >= int64:0"]);
    assert_eq!(ids(&out, "id"), ["bare"]);
}

#[test]
fn strict_filter_rejects_unsupported_comparator() {
    let dir = TempDir::new().unwrap();
    let candidates = write(&dir, "candidates.yaml", CANDIDATES);

    assert!(exec(&["filter", &candidates, "-w", "Region > EU"]).is_ok());
    let err = exec(&["filter", "--strict", &candidates, "-w", "Region > EU"]).unwrap_err();
    assert!(format!("{err:#}").contains("not supported"));
}

#[test]
fn filter_text_output() {
    let dir = TempDir::new().unwrap();
    let candidates = write(&dir, "candidates.yaml", CANDIDATES);

    let out = exec(&["filter", &candidates, "-w", "Region eq EU"]).unwrap();
    assert!(out.starts_with("eu-1\n"));
    assert!(out.contains("  Slots = 6 (int32)"));
    assert!(out.ends_with("2 candidate(s)"));
}

#[test]
fn invalid_expression_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let candidates = write(&dir, "candidates.yaml", CANDIDATES);
    assert!(exec(&["filter", &candidates, "-w", "Slots"]).is_err());
}

// =============================================================================
// merge
// =============================================================================

#[test]
fn merge_file_then_set() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "base.yaml", STORE);
    let updates = write(
        &dir,
        "updates.yaml",
        "- key: Map\n  value: { type: string, value: Depot }\n- key: Bots\n  value: { type: bool, value: true }\n",
    );

    let out = json(&["merge", &base, "--updates", &updates, "--set", "Bots=false"]);
    let keys = ids(&out, "key");
    assert_eq!(keys, ["Map", "Big", "Bots"]);
    assert_eq!(out[0]["value"]["value"], "Depot");
    assert_eq!(out[2]["value"]["value"], false);
}

#[test]
fn merge_yaml_output() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "base.yaml", STORE);

    let out = exec(&["--output", "yaml", "merge", &base, "-s", "Slots=4"]).unwrap();
    assert!(out.contains("key: Slots"));
    assert!(out.contains("type: int32"));
}

// =============================================================================
// get
// =============================================================================

#[test]
fn get_byte_truncates() {
    let dir = TempDir::new().unwrap();
    let store = write(&dir, "store.yaml", STORE);

    let out = exec(&["get", &store, "Big", "--kind", "byte"]).unwrap();
    assert_eq!(out, "Big = 44 (int32)");
}

#[test]
fn get_reports_status() {
    let dir = TempDir::new().unwrap();
    let store = write(&dir, "store.yaml", STORE);

    let out = json(&["get", &store, "Map", "--kind", "int32"]);
    assert_eq!(out["status"], "wrong_type");
    assert!(out.get("value").is_none());

    let out = json(&["get", &store, "Ping"]);
    assert_eq!(out["status"], "not_found");
}

#[test]
fn strict_get_fails_on_missing_key() {
    let dir = TempDir::new().unwrap();
    let store = write(&dir, "store.yaml", STORE);

    let err = exec(&["get", "--strict", &store, "Ping"]).unwrap_err();
    assert!(err.to_string().contains("'Ping' not found"));
}

// =============================================================================
// search
// =============================================================================

#[test]
fn search_filters_and_skips_lan() {
    let dir = TempDir::new().unwrap();
    let results = write(&dir, "results.json", RESULTS);

    let out = json(&["search", &results, "-w", "Mode ne dm"]);
    assert_eq!(ids(&out, "session_id"), ["s1"]);
}

#[test]
fn search_with_request_file_and_limit() {
    let dir = TempDir::new().unwrap();
    let results = write(&dir, "results.json", RESULTS);
    let request = write(&dir, "request.yaml", "max_results: 5\nuse_lan: true\n");

    let out = json(&["query", &results, "--request", &request]);
    assert_eq!(ids(&out, "session_id"), ["s3"]);

    let out = json(&["search", &results, "--max-results", "1"]);
    assert_eq!(ids(&out, "session_id"), ["s1"]);
}

#[test]
fn search_with_invalid_player_fails() {
    let dir = TempDir::new().unwrap();
    let results = write(&dir, "results.json", RESULTS);

    let err = exec(&["search", &results, "--player", ""]).unwrap_err();
    assert!(format!("{err:#}").contains("invalid unique net id"));
}

#[test]
fn missing_file_is_reported() {
    let err = exec(&["merge", "/nonexistent/base.yaml"]).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}
