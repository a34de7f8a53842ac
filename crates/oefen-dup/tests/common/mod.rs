#![allow(dead_code)]

use std::path::PathBuf;

use oefen_core::PackCoordinate;
use oefen_walk::{Pack, PackLoad};
use serde_json::{json, Value};

pub const PACK_PATH: &str = "nl/getal-en-bewerkingen/groep-5/n2/topics/optellen-tot-100/exercises.json";

pub fn pack_at(relative: &str, items: Vec<Value>) -> Pack {
    Pack {
        path: PathBuf::from(relative),
        relative: relative.to_string(),
        coordinate: PackCoordinate {
            domain: "getal-en-bewerkingen".to_string(),
            group: Some(5),
            level: "n2".to_string(),
            topic: "optellen-tot-100".to_string(),
        },
        load: PackLoad::Ok(items),
    }
}

pub fn pack(items: Vec<Value>) -> Pack {
    pack_at(PACK_PATH, items)
}

pub fn numeric(id: &str, prompt: &str) -> Value {
    json!({
        "id": id,
        "interaction": {"type": "numeric"},
        "prompt": prompt,
        "solution": {"value": 0}
    })
}

pub fn mcq(id: &str, prompt: &str, options: &[&str], index: usize) -> Value {
    json!({
        "id": id,
        "interaction": {"type": "mcq"},
        "prompt": prompt,
        "options": options,
        "solution": {"index": index}
    })
}
