use std::collections::HashMap;

use oefen_canon::Canons;
use oefen_core::{Issue, PackCoordinate};
use oefen_walk::{Pack, PackLoad};
use serde_json::Value;

use crate::canon_rules;
use crate::codes;
use crate::fields;
use crate::interaction::check_interaction_shape;
use crate::item::ItemView;
use crate::report::ValidationReport;

/// Runs every item rule and returns the issues in rule order.
///
/// Rules never short-circuit each other: a missing field does not hide a bad
/// task form or an out-of-range MCQ index on the same item.
pub fn check_item(item: &Value, meta: &PackCoordinate, canons: &Canons) -> Vec<Issue> {
    let mut out = Vec::new();
    let Some(view) = ItemView::new(item) else {
        out.push(Issue::error(
            codes::ITEM_NOT_OBJECT,
            format!("item must be a JSON object (found {})", json_kind(item)),
        ));
        return out;
    };
    fields::required_fields(&view, &mut out);
    fields::grade(&view, &mut out);
    fields::coordinate(&view, meta, &mut out);
    canon_rules::topic(&view, canons, &mut out);
    canon_rules::task_form(&view, canons, &mut out);
    canon_rules::misconceptions(&view, meta, canons, &mut out);
    check_interaction_shape(&view, &mut out);
    out
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn status_issue(load: &PackLoad) -> Option<Issue> {
    match load {
        PackLoad::Ok(_) => None,
        PackLoad::EmptyFile => Some(Issue::warn(codes::PACK_EMPTY_FILE, "pack file is empty")),
        PackLoad::EmptyArray => Some(Issue::warn(
            codes::PACK_EMPTY_ARRAY,
            "pack holds an empty array",
        )),
        PackLoad::ParseError(message) => Some(Issue::error(
            codes::PACK_PARSE_ERROR,
            format!("pack is not valid JSON: {message}"),
        )),
        PackLoad::NotArray => Some(Issue::error(
            codes::PACK_NOT_ARRAY,
            "pack must be a JSON array of items",
        )),
    }
}

/// Checks a whole pack: its load status, every item, and id uniqueness.
///
/// Issues carry the pack path and appear in item order.
pub fn check_pack(pack: &Pack, canons: &Canons) -> Vec<Issue> {
    let mut issues = Vec::new();
    if let Some(issue) = status_issue(&pack.load) {
        issues.push(issue.at(pack.relative.clone()));
    }
    let mut seen: HashMap<String, usize> = HashMap::new();
    for (index, item) in pack.items().iter().enumerate() {
        let id = ItemView::new(item).and_then(|view| view.id());
        let mut item_issues = check_item(item, &pack.coordinate, canons);
        if let Some(id) = &id {
            if let Some(first) = seen.get(id) {
                item_issues.push(Issue::error(
                    codes::DUPLICATE_ID,
                    format!("identifier '{id}' is already used by item #{first}"),
                ));
            } else {
                seen.insert(id.clone(), index);
            }
        }
        issues.extend(
            item_issues
                .into_iter()
                .map(|issue| issue.at(pack.relative.clone()).on_item(index, id.as_deref())),
        );
    }
    issues
}

/// Validates a stream of packs, one at a time, into a single report.
pub fn validate_packs(packs: impl IntoIterator<Item = Pack>, canons: &Canons) -> ValidationReport {
    let mut issues = Vec::new();
    let mut packs_checked = 0;
    let mut items_checked = 0;
    for pack in packs {
        packs_checked += 1;
        items_checked += pack.items().len();
        let pack_issues = check_pack(&pack, canons);
        if !pack_issues.is_empty() {
            tracing::debug!(pack = %pack.relative, issues = pack_issues.len(), "pack has issues");
        }
        issues.extend(pack_issues);
    }
    ValidationReport::new(packs_checked, items_checked, issues)
}
