#![allow(dead_code)]

use serde_json::{json, Value};

pub fn mcq(id: &str, texts: &[&str], correct: usize) -> Value {
    let options: Vec<Value> = texts
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            json!({
                "text": text,
                "feedback": format!("uitleg bij {text}"),
                "isCorrect": idx == correct
            })
        })
        .collect();
    json!({
        "id": id,
        "interaction": {"type": "mcq"},
        "prompt": format!("Vraag {id}"),
        "options": options,
        "solution": {"index": correct}
    })
}

pub fn correct_index(item: &Value) -> usize {
    item["solution"]["index"].as_u64().expect("index") as usize
}

pub fn correct_option(item: &Value) -> Value {
    item["options"][correct_index(item)].clone()
}

pub fn histogram(items: &[Value], k: usize) -> Vec<usize> {
    let mut counts = vec![0; k];
    for item in items {
        if item["interaction"]["type"] == "mcq" {
            counts[correct_index(item)] += 1;
        }
    }
    counts
}
