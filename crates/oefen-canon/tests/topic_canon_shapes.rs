mod common;

use oefen_canon::load_topic_canon;
use oefen_core::errors::OefenError;

use common::{domain_topic_canon, flat_topic_canon, write_json};

#[test]
fn flat_list_canon_normalizes_domains() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("topics.json");
    write_json(&path, &flat_topic_canon());

    let canon = load_topic_canon(&path).expect("load canon");
    assert_eq!(canon.len(), 2);
    let entry = canon
        .lookup("getal_en_bewerkingen", 5, "optellen-tot-1000")
        .expect("snake form lookup");
    assert!(entry.allowed_levels.contains("n2"));
    assert_eq!(entry.kerndoelen, vec![23, 26]);
    assert_eq!(entry.extra["title"], "Optellen tot 1000");
    assert!(canon.contains("meten-en-meetkunde", 6, "omtrek"));
}

#[test]
fn per_domain_document_inherits_domain() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("verhoudingen.json");
    write_json(&path, &domain_topic_canon());

    let canon = load_topic_canon(&path).expect("load canon");
    let entry = canon.lookup("verhoudingen", 7, "schaal").expect("schaal");
    assert_eq!(entry.kerndoelen, vec![24, 25]);
    assert!(!canon.contains("verhoudingen", 6, "schaal"));
}

#[test]
fn directory_of_canons_is_merged() {
    let dir = tempfile::tempdir().expect("tmp dir");
    write_json(&dir.path().join("a-flat.json"), &flat_topic_canon());
    write_json(&dir.path().join("b-verhoudingen.json"), &domain_topic_canon());
    std::fs::write(dir.path().join("README.md"), "not a canon").expect("write readme");

    let canon = load_topic_canon(dir.path()).expect("load dir");
    assert_eq!(canon.len(), 4);
}

#[test]
fn missing_required_key_is_bad_canon() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("topics.json");
    write_json(
        &path,
        &serde_json::json!([{ "domain": "verhoudingen", "topic": "procenten", "allowedLevels": ["n2"] }]),
    );

    let err = load_topic_canon(&path).expect_err("grade is required");
    match &err {
        OefenError::Canon(info) => {
            assert_eq!(info.code, "canon.topic_missing_key");
            assert!(info.message.contains("grade"));
        }
        other => panic!("unexpected error family: {other:?}"),
    }
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn duplicate_topic_is_rejected() {
    let dir = tempfile::tempdir().expect("tmp dir");
    write_json(&dir.path().join("one.json"), &domain_topic_canon());
    write_json(&dir.path().join("two.json"), &domain_topic_canon());
    let err = load_topic_canon(dir.path()).expect_err("duplicate keys");
    assert_eq!(err.info().code, "canon.topic_duplicate");
}

#[test]
fn scalar_document_is_rejected() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("topics.json");
    write_json(&path, &serde_json::json!({"domain": "verhoudingen"}));
    let err = load_topic_canon(&path).expect_err("no topics list");
    assert_eq!(err.info().code, "canon.topic_shape");
}
