mod common;

use std::fs;

use serde_json::{json, Value};

use common::{numeric, oefen, read_json, run, stderr, stdout, Corpus, PACK_REL};

fn small_corpus() -> Corpus {
    let corpus = Corpus::new();
    let items: Vec<Value> = (0..3)
        .map(|idx| numeric(&format!("q{idx}"), &format!("Bereken {idx} + 100.")))
        .collect();
    corpus.write_pack(PACK_REL, Value::Array(items));
    corpus
}

#[test]
fn coverage_writes_both_reports_and_exits_zero() {
    let corpus = small_corpus();
    let json_out = corpus.path("reports/coverage.json");
    let md_out = corpus.path("reports/coverage.md");

    let output = run(oefen()
        .arg("coverage")
        .arg("--content-root")
        .arg(corpus.content())
        .arg("--topic-canon-dir")
        .arg(corpus.path("canon/topics"))
        .arg("--group-gate")
        .arg(corpus.path("canon/gate.json"))
        .arg("--out-json")
        .arg(&json_out)
        .arg("--out-md")
        .arg(&md_out));
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("OK 0, LOW 1, NONE 1"), "{}", stdout(&output));

    let rows = &read_json(&json_out)["report"]["rows"];
    assert_eq!(rows[0]["kerndoel"], json!(23));
    assert_eq!(rows[0]["count"], json!(3));
    assert_eq!(rows[0]["status"], json!("LOW"));
    assert_eq!(rows[1]["status"], json!("NONE"));
    let markdown = fs::read_to_string(&md_out).expect("markdown");
    assert!(markdown.contains("## Groep 5"));
}

#[test]
fn priority_writes_csv_ranking() {
    let corpus = small_corpus();
    let out = corpus.path("reports/priority.csv");

    let output = run(oefen()
        .arg("priority")
        .arg("--content-root")
        .arg(corpus.content())
        .arg("--out")
        .arg(&out));
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let csv = fs::read_to_string(&out).expect("csv");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("score,domain,group,level,topic,items,status,reason,path")
    );
    let row = lines.next().expect("one ranked pack");
    assert!(row.contains("optellen-tot-1000"));
    assert!(row.ends_with(common::PACK_REL));
}
