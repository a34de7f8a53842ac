use oefen_core::{normalize_domain, Issue, PackCoordinate, UNKNOWN_DOMAIN, UNKNOWN_LEVEL, UNKNOWN_TOPIC};

use crate::codes;
use crate::item::{ItemView, GRADE_RANGE, REQUIRED_FIELDS};

/// One ERROR per missing required field, in declaration order.
pub fn required_fields(item: &ItemView<'_>, out: &mut Vec<Issue>) {
    for field in REQUIRED_FIELDS {
        if item.field(field).is_none() {
            out.push(Issue::error(
                codes::MISSING_FIELD,
                format!("missing required field '{field}'"),
            ));
        }
    }
}

/// The grade, when present, must be an integer within the corpus range.
pub fn grade(item: &ItemView<'_>, out: &mut Vec<Issue>) {
    let Some(raw) = item.field("grade") else {
        return;
    };
    match item.grade() {
        Some(grade) if GRADE_RANGE.contains(&grade) => {}
        _ => out.push(Issue::error(
            codes::GRADE_INVALID,
            format!(
                "grade must be an integer between {} and {} (found {raw})",
                GRADE_RANGE.start(),
                GRADE_RANGE.end()
            ),
        )),
    }
}

/// Warns when the item's own coordinate disagrees with its pack path.
pub fn coordinate(item: &ItemView<'_>, meta: &PackCoordinate, out: &mut Vec<Issue>) {
    let mut mismatches = Vec::new();
    if let Some(domain) = item.str_field("domain") {
        let domain = normalize_domain(domain);
        if meta.domain != UNKNOWN_DOMAIN && domain != meta.domain {
            mismatches.push(format!("domain {domain} vs path {}", meta.domain));
        }
    }
    if let (Some(grade), Some(group)) = (item.grade(), meta.group) {
        if grade != group {
            mismatches.push(format!("grade {grade} vs path groep-{group}"));
        }
    }
    if let Some(level) = item.str_field("level") {
        if meta.level != UNKNOWN_LEVEL && level != meta.level {
            mismatches.push(format!("level {level} vs path {}", meta.level));
        }
    }
    if let Some(topic) = item.str_field("topic") {
        if meta.topic != UNKNOWN_TOPIC && topic != meta.topic {
            mismatches.push(format!("topic {topic} vs path {}", meta.topic));
        }
    }
    if !mismatches.is_empty() {
        out.push(Issue::warn(
            codes::COORDINATE_MISMATCH,
            format!("item coordinate disagrees with pack path: {}", mismatches.join("; ")),
        ));
    }
}
