#![allow(dead_code)]

use std::fs;
use std::path::Path;

use oefen_canon::{CanonPaths, Canons};
use oefen_core::PackCoordinate;
use serde_json::{json, Value};
use tempfile::TempDir;

fn write_json(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, serde_json::to_vec_pretty(value).expect("encode")).expect("write");
}

pub const FORMS: [&str; 5] = [
    "numeric_simple",
    "select_single",
    "fill_single_step",
    "error_analysis",
    "estimate_first",
];

/// Canons on disk, loaded through the regular loader.
pub fn fixture_canons() -> (TempDir, Canons) {
    let dir = tempfile::tempdir().expect("tmp dir");
    let root = dir.path();
    write_json(
        &root.join("canon/topics.json"),
        &json!([
            {"domain": "getal-en-bewerkingen", "grade": 5, "topic": "optellen-tot-1000", "allowedLevels": ["n1", "n2"], "kerndoelen": [23]},
            {"domain": "verhoudingen", "grade": 6, "topic": "procenten", "allowedLevels": ["n2", "n3"], "kerndoelen": [24]}
        ]),
    );
    write_json(
        &root.join("canon/taskforms.json"),
        &json!({
            "levels": {
                "n1": {"allowedTaskForms": ["numeric_simple", "select_single"], "disallowedTaskForms": ["error_analysis"]},
                "n2": {"allowedTaskForms": ["numeric_simple", "select_single", "fill_single_step"], "disallowedTaskForms": ["error_analysis"]},
                "n3": {"allowedTaskForms": ["error_analysis", "numeric_simple", "select_single", "estimate_first"], "disallowedTaskForms": []}
            },
            "taskFormDefinitions": {
                "numeric_simple": {}, "select_single": {}, "fill_single_step": {}, "error_analysis": {}
            }
        }),
    );
    write_json(
        &root.join("shared/misconcepts/getal-en-bewerkingen.json"),
        &json!({"misconcepts": [{"key": "carry_forgotten"}, {"key": "place_value_swap"}]}),
    );
    write_json(
        &root.join("shared/feedback/getal-en-bewerkingen.json"),
        &json!({"misconceptFeedback": {"carry_forgotten": "Vergeet niet te onthouden."}}),
    );
    let canons = Canons::load(&CanonPaths {
        topic_canon: root.join("canon/topics.json"),
        task_forms: root.join("canon/taskforms.json"),
        shared_root: root.join("shared"),
    })
    .expect("load canons");
    (dir, canons)
}

pub fn coordinate() -> PackCoordinate {
    PackCoordinate {
        domain: "getal-en-bewerkingen".to_string(),
        group: Some(5),
        level: "n2".to_string(),
        topic: "optellen-tot-1000".to_string(),
    }
}

pub fn numeric_item(id: &str) -> Value {
    json!({
        "id": id,
        "schemaVersion": "1.0",
        "domain": "getal_en_bewerkingen",
        "grade": 5,
        "level": "n2",
        "topic": "optellen-tot-1000",
        "interaction": {"type": "numeric"},
        "prompt": "Bereken 345 + 278.",
        "solution": {"value": 623}
    })
}

pub fn mcq_item(id: &str, options: Value, index: Value) -> Value {
    json!({
        "id": id,
        "schemaVersion": "1.0",
        "domain": "getal-en-bewerkingen",
        "grade": 5,
        "level": "n2",
        "topic": "optellen-tot-1000",
        "interaction": {"type": "mcq"},
        "prompt": "Welke som is gelijk aan 500?",
        "options": options,
        "solution": {"index": index}
    })
}

pub fn codes(issues: &[oefen_core::Issue]) -> Vec<&str> {
    issues.iter().map(|issue| issue.code.as_str()).collect()
}
