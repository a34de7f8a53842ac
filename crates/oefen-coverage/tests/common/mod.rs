#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use oefen_canon::{load_topic_canon, GroupGate, TopicCanon};
use oefen_core::PackCoordinate;
use oefen_walk::{Pack, PackLoad};
use serde_json::{json, Value};

pub fn topic_canon(dir: &Path) -> TopicCanon {
    let path = dir.join("topics.json");
    let entries = json!([
        {"domain": "getal-en-bewerkingen", "grade": 5, "topic": "optellen-tot-1000", "allowedLevels": ["n1", "n2"], "kerndoelen": [23]},
        {"domain": "getal-en-bewerkingen", "grade": 5, "topic": "aftrekken-tot-1000", "allowedLevels": ["n2"], "kerndoelen": [23, 26]},
        {"domain": "meten-en-meetkunde", "grade": 5, "topic": "omtrek", "allowedLevels": ["n2"], "kerndoelen": [32, 40]},
        {"domain": "verhoudingen", "grade": 6, "topic": "procenten", "allowedLevels": ["n3"], "kerndoelen": [24]}
    ]);
    fs::write(&path, serde_json::to_vec(&entries).expect("encode")).expect("write canon");
    load_topic_canon(&path).expect("topic canon")
}

pub fn gate() -> GroupGate {
    GroupGate::from_entries([(5, vec![23, 26, 32]), (6, vec![24, 25])])
}

pub fn items(count: usize, interaction: &str) -> Vec<Value> {
    (0..count)
        .map(|idx| json!({"id": format!("q{idx}"), "interaction": {"type": interaction}}))
        .collect()
}

pub fn pack(domain: &str, group: Option<u8>, level: &str, topic: &str, load: PackLoad) -> Pack {
    let relative = format!(
        "nl/{domain}/groep-{}/{level}/topics/{topic}/exercises.json",
        group.map_or_else(|| "x".to_string(), |group| group.to_string())
    );
    Pack {
        path: PathBuf::from(&relative),
        relative,
        coordinate: PackCoordinate {
            domain: domain.to_string(),
            group,
            level: level.to_string(),
            topic: topic.to_string(),
        },
        load,
    }
}
