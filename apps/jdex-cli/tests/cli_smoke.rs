use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const WORK_JSON: &str = r#"{
  "name": "d1-Work",
  "areas": [{
    "id": "10-19", "name": "Administration", "tags": ["hr"],
    "categories": [{
      "id": "11", "name": "HR Documents",
      "description": "Employee records", "tags": ["employees"],
      "items": [{ "id": "d1.11.01", "name": "Contracts" }]
    }]
  }]
}"#;

fn jdex(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jdex"))
        .current_dir(dir)
        .env("RUST_ENV", "test")
        .env_remove("JDEX_LOG")
        .args(args)
        .output()
        .expect("run jdex")
}

fn fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("work.json"), WORK_JSON).unwrap();
    tmp
}

#[test]
fn search_prints_json_results() {
    let tmp = fixture();
    let out = jdex(tmp.path(), &["--file", "work.json", "search", "employee", "--json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let results: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json output");
    let results = results.as_array().expect("array");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["kind"], "category");
    assert_eq!(results[0]["category"]["id"], "11");
    assert_eq!(results[0]["matched_terms"][0], "employee");
}

#[test]
fn search_reads_configured_directory_and_limit() {
    let tmp = fixture();
    fs::create_dir_all(tmp.path().join("systems")).unwrap();
    fs::rename(tmp.path().join("work.json"), tmp.path().join("systems/work.json")).unwrap();
    let config = "[data]\nsystems_dir = \"systems\"\n[search]\nlimit = 1\n";
    fs::write(tmp.path().join("config.toml"), config).unwrap();

    let out = jdex(tmp.path(), &["search", "admin", "--json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let results: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(results.as_array().unwrap().len(), 1, "limit from config");
    assert_eq!(results[0]["kind"], "area");
}

#[test]
fn add_writes_item_back_to_file() {
    let tmp = fixture();
    let out = jdex(
        tmp.path(),
        &["--file", "work.json", "add", "--area", "10-19", "--category", "11", "Invoices [2]"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("d1.11.02"));

    let saved = fs::read_to_string(tmp.path().join("work.json")).unwrap();
    assert!(saved.contains("\"Invoices\""));

    let out = jdex(tmp.path(), &["--file", "work.json", "search", "invoice"]);
    assert!(String::from_utf8_lossy(&out.stdout).contains("[Invoice]s"));
}

#[test]
fn validate_reports_schema_errors() {
    let tmp = fixture();
    fs::write(tmp.path().join("bad.json"), r#"{ "name": "", "areas": [] }"#).unwrap();
    assert!(jdex(tmp.path(), &["validate", "work.json"]).status.success());
    let out = jdex(tmp.path(), &["validate", "bad.json"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("System name is required"));
}

#[test]
fn config_errors_are_reported_once() {
    let tmp = fixture();
    fs::write(tmp.path().join("config.toml"), "[search]\nlimit = 0\n").unwrap();
    let out = jdex(tmp.path(), &["--file", "work.json", "search", "employee"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("loading configuration"), "{stderr}");
    assert_eq!(stderr.matches("search.limit must be at least 1").count(), 1, "{stderr}");
}
