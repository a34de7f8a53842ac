mod common;

use serde_json::json;

use common::{numeric, read_json, run, stderr, stdout, Corpus, PACK_REL};

#[test]
fn clean_corpus_passes() {
    let corpus = Corpus::new();
    corpus.write_pack(
        PACK_REL,
        json!([numeric("q-1", "Bereken 345 + 278."), numeric("q-2", "Bereken 120 + 80.")]),
    );

    let output = run(&mut corpus.validate());
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("validate: 1 packs, 2 items, 0 errors, 0 warnings: PASS"));
}

#[test]
fn unknown_topic_fails_with_coded_line() {
    let corpus = Corpus::new();
    let mut item = numeric("q-1", "Bereken 345 + 278.");
    item["topic"] = json!("made-up-topic");
    corpus.write_pack(
        "nl/getal-en-bewerkingen/groep-5/n2/topics/made-up-topic/exercises.json",
        json!([item]),
    );

    let output = run(&mut corpus.validate());
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("[TOPIC_UNKNOWN]"), "{text}");
    assert!(text.contains("(getal-en-bewerkingen, 5, made-up-topic)"), "{text}");
    assert!(text.ends_with("FAIL\n"), "{text}");
}

#[test]
fn missing_canon_exits_with_two() {
    let corpus = Corpus::new();
    std::fs::remove_file(corpus.path("canon/taskforms.json")).expect("remove canon");
    let output = run(&mut corpus.validate());
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("canon"), "{}", stderr(&output));
}

#[test]
fn missing_content_root_exits_with_two() {
    let corpus = Corpus::new();
    std::fs::remove_dir_all(corpus.content()).expect("remove content root");
    let output = run(&mut corpus.validate());
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("[input.content_root]"));
}

#[test]
fn json_report_carries_hash_and_issues() {
    let corpus = Corpus::new();
    corpus.write_pack(PACK_REL, json!([]));
    let out = corpus.path("reports/validate.json");

    let output = run(corpus.validate().arg("--out-json").arg(&out));
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let document = read_json(&out);
    assert!(document["report_hash"].is_string());
    assert_eq!(document["report"]["warnings"], json!(1));
    assert_eq!(document["report"]["errors"], json!(0));
}
