#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

pub fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, serde_json::to_vec_pretty(value).expect("encode")).expect("write json");
}

pub fn flat_topic_canon() -> Value {
    json!([
        {
            "domain": "getal-en-bewerkingen",
            "grade": 5,
            "topic": "optellen-tot-1000",
            "allowedLevels": ["n1", "n2"],
            "kerndoelen": [23, 26],
            "title": "Optellen tot 1000"
        },
        {
            "domain": "meten_en_meetkunde",
            "grade": "6",
            "slug": "omtrek",
            "allowed_levels": ["n2", "n3"],
            "kerndoelen": [32]
        }
    ])
}

pub fn domain_topic_canon() -> Value {
    json!({
        "domain": "verhoudingen",
        "version": 2,
        "topics": [
            {"grade": 6, "topic": "procenten", "allowedLevels": ["n2"], "kerndoelen": [24]},
            {"grade": 7, "topic": "schaal", "allowedLevels": ["n3", "n4"], "kerndoelen": [24, 25]}
        ]
    })
}

pub fn task_form_canon() -> Value {
    json!({
        "levels": {
            "n1": {"allowedTaskForms": ["numeric_simple", "select_single"], "disallowedTaskForms": ["error_analysis"]},
            "n2": {"allowedTaskForms": ["numeric_simple", "select_single", "fill_single_step"], "disallowedTaskForms": ["error_analysis"]},
            "n3": {"allowedTaskForms": ["error_analysis", "numeric_simple"], "disallowedTaskForms": []}
        },
        "taskFormDefinitions": {
            "numeric_simple": {"label": "Rekenopgave"},
            "select_single": {"label": "Meerkeuze"},
            "fill_single_step": {"label": "Invullen"},
            "error_analysis": {"label": "Foutanalyse"}
        }
    })
}
