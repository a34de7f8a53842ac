use std::fs;

use oefen_canon::load_duplicate_baseline;

#[test]
fn exact_entry_beats_globs() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("baseline.json");
    fs::write(
        &path,
        r#"{
            "nl/getal-en-bewerkingen/groep-5/n2/topics/optellen/exercises.json": {"allow_numeric_duplicates": true},
            "nl/getal-en-bewerkingen/**": {"allow_context_dominance": true, "allowMcqDuplicates": true}
        }"#,
    )
    .expect("write baseline");

    let baseline = load_duplicate_baseline(&path).expect("load");
    let exact = baseline.entry_for("nl/getal-en-bewerkingen/groep-5/n2/topics/optellen/exercises.json");
    assert!(exact.allow_numeric_duplicates);
    assert!(!exact.allow_context_dominance);

    let globbed = baseline.entry_for("nl/getal-en-bewerkingen/groep-6/n1/topics/delen/exercises.json");
    assert!(globbed.allow_context_dominance);
    assert!(globbed.allow_mcq_duplicates);
    assert!(!globbed.allow_numeric_duplicates);

    let other = baseline.entry_for("nl/verhoudingen/groep-6/n2/topics/procenten/exercises.json");
    assert_eq!(other, Default::default());
}

#[test]
fn wrapped_yaml_baseline_loads() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("baseline.yaml");
    fs::write(
        &path,
        "packs:\n  nl/verhoudingen/groep-6/n2/topics/procenten/exercises.json:\n    allow_prompt_duplicates: true\n",
    )
    .expect("write baseline");
    let baseline = load_duplicate_baseline(&path).expect("load");
    assert_eq!(baseline.len(), 1);
    assert!(
        baseline
            .entry_for("nl/verhoudingen/groep-6/n2/topics/procenten/exercises.json")
            .allow_prompt_duplicates
    );
}
