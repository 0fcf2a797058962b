// SPDX-License-Identifier: MIT OR Apache-2.0

mod common;

use common::{cert_yaml, ids, write_file, Workspace, CATALOG};
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn validate_passes_for_complete_catalog() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["--catalog", "data", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog validation passed for 7 record(s)."));
}

#[test]
fn validate_reports_issues_and_fails() {
    let ws = Workspace::new();
    let broken = cert_yaml(&CATALOG[0]).replace("level: advanced", "level: guru");
    write_file(
        &ws.data().join("certifications").join("renamed.yaml"),
        &broken,
    );

    let mut cmd = ws.cmd();
    let assert = cmd
        .args(["--format", "json", "--compact", "--catalog", "data", "validate"])
        .assert()
        .failure();
    let report: Value = serde_json::from_slice(&assert.get_output().stdout).expect("json");
    let messages: Vec<String> = report["issues"]
        .as_array()
        .expect("issues")
        .iter()
        .map(|i| format!("{}: {}", i["source"].as_str().unwrap(), i["message"].as_str().unwrap()))
        .collect();
    assert!(messages.contains(&"renamed.yaml: id 'gpen' must match filename 'renamed'".to_string()));
    assert!(messages.contains(&"renamed.yaml: duplicate id 'gpen'".to_string()));
    assert!(messages.contains(&"renamed.yaml: invalid level 'guru'".to_string()));
}

#[test]
fn summary_counts_catalog() {
    let ws = Workspace::new();
    let out = ws.json(&["--catalog", "data", "summary"]);
    assert_eq!(out["records"], 7);
    assert_eq!(out["meta"]["catalog"], "Test Certification Catalog");
    assert_eq!(out["meta"]["last_reviewed"], "2026-03-01");
    assert_eq!(
        out["domains"],
        serde_json::json!([
            "IAM",
            "Security Architecture and Engineering",
            "Security and Risk Management",
            "Security Operations"
        ])
    );
    assert_eq!(out["prices"]["paid"], 5);
    assert_eq!(out["prices"]["free"], 1);
    assert_eq!(out["prices"]["unknown"], 1);
    assert_eq!(out["goals"]["red"], 2);
}

#[test]
fn index_alias_works() {
    let ws = Workspace::new();
    let out = ws.json(&["--catalog", "data", "index"]);
    assert_eq!(out["records"], 7);
}

#[test]
fn groups_by_goal() {
    let ws = Workspace::new();
    let out = ws.json(&["--catalog", "data", "groups", "--by", "goal"]);
    let groups = out.as_array().expect("groups");
    let names: Vec<&str> = groups.iter().map(|g| g["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["blue", "red", "grc", "cloud"]);
    assert_eq!(
        ids(&groups[0]["buckets"][0]["records"]),
        ["gcih", "isc2-cc", "vendor-x"]
    );
    assert_eq!(ids(&groups[1]["buckets"][0]["records"]), ["gpen", "oscp"]);
}

#[test]
fn groups_by_domain_with_query() {
    let ws = Workspace::new();
    let out = ws.json(&["--catalog", "data", "groups", "domain:operations"]);
    let groups = out.as_array().expect("groups");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["name"], "Security Operations");
    assert_eq!(groups[0]["count"], 4);
    let buckets: Vec<(String, Vec<String>)> = groups[0]["buckets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| (b["name"].as_str().unwrap().to_string(), ids(&b["records"])))
        .collect();
    assert_eq!(
        buckets,
        [
            ("Incident Handling".to_string(), vec!["gcih".to_string()]),
            (
                "Penetration Testing".to_string(),
                vec!["gpen".to_string(), "oscp".to_string()]
            ),
            ("Exploitation".to_string(), vec!["oscp".to_string()]),
            ("General".to_string(), vec!["isc2-cc".to_string()]),
        ]
    );
}

#[test]
fn parse_shows_structured_free_and_diagnostics() {
    let ws = Workspace::new();
    let out = ws.json(&["parse", r#"Vendor:GIAC price:300..1200 "incident response" :x"#]);
    assert_eq!(out["structured"][0]["key"], "provider");
    assert_eq!(out["structured"][0]["value"], "GIAC");
    assert_eq!(out["structured"][1]["numeric"]["kind"], "range");
    assert_eq!(out["free"], serde_json::json!(["incident response"]));
    assert_eq!(out["diagnostics"][0]["kind"], "empty_key");
}

#[test]
fn parse_does_not_need_a_catalog() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["--catalog", "missing", "parse", "mystery:value"])
        .assert()
        .success()
        .stdout(predicate::str::contains("whole-record search"));
}

#[test]
fn completions_generate_for_bash() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("certq"));
}
