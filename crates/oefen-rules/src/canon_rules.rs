use oefen_canon::Canons;
use oefen_core::{normalize_domain, Issue, PackCoordinate};
use serde_json::Value;

use crate::codes;
use crate::item::{ItemView, GRADE_RANGE};

/// Topic closure and level permissibility against the topic canon.
pub fn topic(item: &ItemView<'_>, canons: &Canons, out: &mut Vec<Issue>) {
    let (Some(domain), Some(grade), Some(topic)) = (
        item.str_field("domain"),
        item.grade().filter(|grade| GRADE_RANGE.contains(grade)),
        item.str_field("topic"),
    ) else {
        return;
    };
    let domain = normalize_domain(domain);
    let Some(entry) = canons.topics.lookup(&domain, grade, topic) else {
        out.push(Issue::error(
            codes::TOPIC_UNKNOWN,
            format!("topic ({domain}, {grade}, {topic}) is not in the topic canon"),
        ));
        return;
    };
    if let Some(level) = item.str_field("level") {
        if !entry.allowed_levels.contains(level) {
            let allowed: Vec<&str> = entry.allowed_levels.iter().map(String::as_str).collect();
            out.push(Issue::error(
                codes::LEVEL_NOT_ALLOWED,
                format!(
                    "level {level} is not allowed for topic ({domain}, {grade}, {topic}); allowed: [{}]",
                    allowed.join(", ")
                ),
            ));
        }
    }
}

/// The item's task form: explicit tag first, interaction fallback second.
fn resolve_task_form(item: &ItemView<'_>, out: &mut Vec<Issue>) -> Option<String> {
    if let Some(raw) = item.metadata().and_then(|meta| meta.get("taskForm")) {
        match raw.as_str().map(str::trim) {
            Some(form) if !form.is_empty() => return Some(form.to_string()),
            _ => {
                out.push(Issue::error(
                    codes::TASKFORM_UNTAGGED,
                    format!("metadata.taskForm must be a non-empty string (found {raw})"),
                ));
                return None;
            }
        }
    }
    match item.interaction_kind() {
        Some(kind) => Some(kind.fallback_task_form().to_string()),
        None => {
            out.push(Issue::error(
                codes::TASKFORM_UNTAGGED,
                format!(
                    "task form is unknown for interaction type '{}'; tag metadata.taskForm explicitly",
                    item.interaction_tag().unwrap_or("missing")
                ),
            ));
            None
        }
    }
}

/// Task-form matrix check for the item's level.
pub fn task_form(item: &ItemView<'_>, canons: &Canons, out: &mut Vec<Issue>) {
    let Some(form) = resolve_task_form(item, out) else {
        return;
    };
    let Some(level) = item.str_field("level") else {
        return;
    };
    let matrix = &canons.task_forms;
    if matrix.is_disallowed(level, &form) {
        out.push(Issue::error(
            codes::TASKFORM_DISALLOWED,
            format!("task form '{form}' is DISALLOWED for level {level}"),
        ));
    } else if !matrix.is_allowed(level, &form) {
        if matrix.is_known(&form) {
            out.push(Issue::error(
                codes::TASKFORM_NOT_ALLOWED,
                format!(
                    "task form '{form}' is NOT ALLOWED for level {level} (allowed: [{}])",
                    matrix.allowed_for(level).join(", ")
                ),
            ));
        } else {
            out.push(Issue::error(
                codes::TASKFORM_UNRECOGNIZED,
                format!("task form '{form}' is UNRECOGNIZED: not named anywhere in the task-form canon"),
            ));
        }
    } else if !matrix.definitions.is_empty() && !matrix.is_defined(&form) {
        out.push(Issue::warn(
            codes::TASKFORM_UNDEFINED,
            format!("task form '{form}' is allowed for level {level} but has no definition"),
        ));
    }
}

/// Every misconception key must exist in both packs of the item's domain.
pub fn misconceptions(
    item: &ItemView<'_>,
    meta: &PackCoordinate,
    canons: &Canons,
    out: &mut Vec<Issue>,
) {
    let Some(raw) = item
        .metadata()
        .and_then(|metadata| metadata.get("misconceptKeys"))
        .filter(|value| !value.is_null())
    else {
        return;
    };
    let Some(keys) = raw.as_array() else {
        out.push(Issue::error(
            codes::MISCONCEPT_KEYS_NOT_LIST,
            format!("metadata.misconceptKeys must be a list (found {raw})"),
        ));
        return;
    };
    if keys.is_empty() {
        return;
    }
    let domain = item
        .str_field("domain")
        .map(normalize_domain)
        .unwrap_or_else(|| meta.domain.clone());
    let Some(pack) = canons.domain_packs.get(&domain) else {
        let (misconcepts, feedback) = canons.domain_packs.expected_paths(&domain);
        out.push(Issue::error(
            codes::MISCONCEPT_PACK_MISSING,
            format!(
                "domain {domain} has no ready misconception/feedback packs (expected {} and {})",
                misconcepts.display(),
                feedback.display()
            ),
        ));
        return;
    };
    for key in keys {
        let Value::String(key) = key else {
            out.push(Issue::error(
                codes::MISCONCEPT_KEY_INVALID,
                format!("misconception key {key} is not a string"),
            ));
            continue;
        };
        if !pack.has_misconception(key) {
            out.push(Issue::error(
                codes::MISCONCEPT_UNKNOWN,
                format!("misconception key '{key}' is not in the {domain} misconception pack"),
            ));
        }
        if !pack.has_feedback(key) {
            out.push(Issue::error(
                codes::FEEDBACK_MISSING,
                format!("misconception key '{key}' has no feedback in the {domain} feedback pack"),
            ));
        }
    }
}
