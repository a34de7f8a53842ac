#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

pub const PACK_REL: &str = "nl/getal-en-bewerkingen/groep-5/n2/topics/optellen-tot-1000/exercises.json";

pub fn oefen() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_oefen"));
    command.env_remove("RUST_LOG");
    command
}

pub fn run(command: &mut Command) -> Output {
    command.output().expect("run oefen")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn write_json(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, serde_json::to_vec_pretty(value).expect("encode")).expect("write");
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).expect("read")).expect("decode")
}

/// Canon files plus an empty content root.
pub struct Corpus {
    pub dir: TempDir,
}

impl Corpus {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tmp dir");
        let root = dir.path();
        write_json(
            &root.join("canon/topics/getal-en-bewerkingen.json"),
            &json!({
                "domain": "getal-en-bewerkingen",
                "version": 1,
                "topics": [
                    {"grade": 5, "topic": "optellen-tot-1000", "allowedLevels": ["n1", "n2"], "kerndoelen": [23]}
                ]
            }),
        );
        write_json(
            &root.join("canon/taskforms.json"),
            &json!({
                "levels": {
                    "n1": {"allowedTaskForms": ["numeric_simple", "select_single"], "disallowedTaskForms": ["error_analysis"]},
                    "n2": {"allowedTaskForms": ["numeric_simple", "select_single"], "disallowedTaskForms": ["error_analysis"]}
                },
                "taskFormDefinitions": {"numeric_simple": {}, "select_single": {}, "error_analysis": {}}
            }),
        );
        write_json(
            &root.join("canon/gate.json"),
            &json!({"groups": [{"group": 5, "kerndoelen": [23, 26]}]}),
        );
        write_json(
            &root.join("shared/misconcepts/getal-en-bewerkingen.json"),
            &json!({"misconcepts": [{"key": "carry_forgotten"}]}),
        );
        write_json(
            &root.join("shared/feedback/getal-en-bewerkingen.json"),
            &json!({"misconceptFeedback": {"carry_forgotten": "Vergeet niet te onthouden."}}),
        );
        fs::create_dir_all(root.join("content")).expect("content root");
        Self { dir }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn content(&self) -> PathBuf {
        self.path("content")
    }

    pub fn write_pack(&self, relative: &str, items: Value) -> PathBuf {
        let path = self.content().join(relative);
        write_json(&path, &items);
        path
    }

    pub fn validate(&self) -> Command {
        let mut command = oefen();
        command
            .arg("validate")
            .arg("--topic-canon")
            .arg(self.path("canon/topics"))
            .arg("--taskforms")
            .arg(self.path("canon/taskforms.json"))
            .arg("--content-root")
            .arg(self.content())
            .arg("--shared-root")
            .arg(self.path("shared"));
        command
    }
}

pub fn numeric(id: &str, prompt: &str) -> Value {
    json!({
        "id": id,
        "schemaVersion": "1.0",
        "domain": "getal-en-bewerkingen",
        "grade": 5,
        "level": "n2",
        "topic": "optellen-tot-1000",
        "interaction": {"type": "numeric"},
        "prompt": prompt,
        "solution": {"value": 0}
    })
}

pub fn mcq(id: &str, options: &[&str], index: usize) -> Value {
    json!({
        "id": id,
        "schemaVersion": "1.0",
        "domain": "getal-en-bewerkingen",
        "grade": 5,
        "level": "n2",
        "topic": "optellen-tot-1000",
        "interaction": {"type": "mcq"},
        "prompt": format!("Kies het juiste antwoord bij vraag {id}."),
        "options": options,
        "solution": {"index": index}
    })
}
