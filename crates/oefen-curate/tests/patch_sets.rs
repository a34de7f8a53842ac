mod common;

use std::fs;

use oefen_curate::{apply_patches, patch_file, Edit, Patch, PatchSet, PatchStatus, Selector};
use serde_json::{json, Value};

use common::mcq;

fn pack() -> Vec<Value> {
    vec![
        mcq("g5-n2-001", &["12", "14", "16"], 0),
        mcq("g5-n2-002", &["3/4", "2/3", "1/2"], 1),
    ]
}

fn by_id(id: &str) -> Selector {
    Selector {
        id: Some(id.to_string()),
        ..Selector::default()
    }
}

#[test]
fn option_text_edit_is_idempotent() {
    let set = PatchSet {
        patches: vec![Patch {
            select: Selector {
                option_index: Some(2),
                ..by_id("g5-n2-002")
            },
            edit: Edit::ReplaceText {
                text: "5/8".to_string(),
                field: "prompt".to_string(),
            },
        }],
    };
    let (patched, report) = apply_patches(&pack(), &set).expect("apply");
    assert_eq!(report.applied(), 1);
    assert_eq!(patched[1]["options"][2]["text"], "5/8");
    assert_eq!(patched[1]["options"][2]["feedback"], "uitleg bij 1/2");

    let (again, report) = apply_patches(&patched, &set).expect("re-apply");
    assert_eq!(again, patched);
    assert_eq!(report.outcomes[0].status, PatchStatus::Unchanged);
    assert_eq!(report.unchanged(), 1);
}

#[test]
fn set_correct_index_moves_flags_and_index() {
    let set = PatchSet {
        patches: vec![Patch {
            select: Selector {
                question_index: Some(0),
                ..by_id("g5-n2-001")
            },
            edit: Edit::SetCorrectIndex { index: 2 },
        }],
    };
    let (patched, _) = apply_patches(&pack(), &set).expect("apply");
    assert_eq!(patched[0]["solution"]["index"], 2);
    assert_eq!(patched[0]["options"][0]["isCorrect"], false);
    assert_eq!(patched[0]["options"][2]["isCorrect"], true);
    assert_eq!(patched[1], pack()[1]);
}

#[test]
fn unmatched_selector_aborts() {
    let set = PatchSet {
        patches: vec![Patch {
            select: by_id("does-not-exist"),
            edit: Edit::SetCorrectIndex { index: 0 },
        }],
    };
    let err = apply_patches(&pack(), &set).expect_err("no match");
    assert_eq!(err.info().code, "patch.no_match");
    assert_eq!(err.exit_code(), 1);

    let mismatch = PatchSet {
        patches: vec![Patch {
            select: Selector {
                question_index: Some(1),
                ..by_id("g5-n2-001")
            },
            edit: Edit::SetCorrectIndex { index: 0 },
        }],
    };
    assert_eq!(
        apply_patches(&pack(), &mismatch).expect_err("id disagrees").info().code,
        "patch.no_match"
    );
}

#[test]
fn edits_failing_shape_rules_are_rejected() {
    let set = PatchSet {
        patches: vec![Patch {
            select: by_id("g5-n2-001"),
            edit: Edit::ReplaceOptions {
                options: vec![json!("12")],
            },
        }],
    };
    let err = apply_patches(&pack(), &set).expect_err("one option is not an MCQ");
    assert_eq!(err.info().code, "patch.verify_failed");
    assert!(err.info().message.contains("MCQ_OPTIONS_INVALID"));
}

#[test]
fn option_index_only_applies_to_text_edits() {
    let set = PatchSet {
        patches: vec![Patch {
            select: Selector {
                option_index: Some(0),
                ..by_id("g5-n2-001")
            },
            edit: Edit::SetCorrectIndex { index: 1 },
        }],
    };
    let err = apply_patches(&pack(), &set).expect_err("option_index misuse");
    assert_eq!(err.info().code, "patch.option_index");
}

#[test]
fn patch_file_reads_yaml_and_writes_pack() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let pack_path = dir.path().join("exercises.json");
    fs::write(&pack_path, serde_json::to_vec(&pack()).expect("encode")).expect("write pack");
    let patches = dir.path().join("fix-g5.yaml");
    fs::write(
        &patches,
        "patches:\n  - select: {id: g5-n2-001}\n    edit: {op: replace_text, text: \"Hoeveel is 7 + 7?\"}\n",
    )
    .expect("write patches");

    let report = patch_file(&pack_path, &patches, None).expect("patch");
    assert_eq!(report.applied(), 1);
    let written: Vec<Value> =
        serde_json::from_slice(&fs::read(&pack_path).expect("read")).expect("parse");
    assert_eq!(written[0]["prompt"], "Hoeveel is 7 + 7?");

    let modified = fs::metadata(&pack_path).expect("meta").len();
    let report = patch_file(&pack_path, &patches, None).expect("re-apply");
    assert_eq!(report.applied(), 0);
    assert_eq!(fs::metadata(&pack_path).expect("meta").len(), modified);
}

#[test]
fn malformed_patch_file_is_rejected() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let pack_path = dir.path().join("exercises.json");
    fs::write(&pack_path, "[]").expect("write pack");
    let patches = dir.path().join("patches.json");
    fs::write(&patches, r#"{"patches": [{"select": {}, "edit": {"op": "delete_item"}}]}"#)
        .expect("write patches");
    let err = patch_file(&pack_path, &patches, None).expect_err("unknown op");
    assert_eq!(err.info().code, "patch.malformed");
}
