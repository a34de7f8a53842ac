use oefen_core::{InteractionKind, Issue};
use serde_json::Value;

use crate::codes;
use crate::item::{option_text, parse_decimal, ItemView};

/// Interaction well-formedness for one item.
///
/// This subset needs no canon, so the patch engine reuses it to verify edited
/// items before they are written.
pub fn check_interaction_shape(item: &ItemView<'_>, out: &mut Vec<Issue>) {
    let Some(interaction) = item.field("interaction") else {
        return;
    };
    let kind = match item.interaction_kind() {
        Some(kind) => kind,
        None => {
            let found = interaction
                .get("type")
                .map(Value::to_string)
                .unwrap_or_else(|| "nothing".to_string());
            out.push(Issue::error(
                codes::INTERACTION_TYPE_UNKNOWN,
                format!("interaction.type must be one of numeric, mcq, fill_blanks (found {found})"),
            ));
            return;
        }
    };
    match kind {
        InteractionKind::Mcq => mcq(item, out),
        InteractionKind::Numeric => numeric(item, out),
        InteractionKind::FillBlanks => fill_blanks(item, out),
    }
}

fn mcq(item: &ItemView<'_>, out: &mut Vec<Issue>) {
    let option_count = match item.options() {
        Some(Value::Array(options)) => {
            if options.len() < 2 {
                out.push(Issue::error(
                    codes::MCQ_OPTIONS_INVALID,
                    format!("MCQ needs at least 2 options (found {})", options.len()),
                ));
            }
            for (idx, option) in options.iter().enumerate() {
                if option_text(option).is_none() {
                    out.push(Issue::error(
                        codes::MCQ_OPTIONS_INVALID,
                        format!("MCQ option #{idx} is neither a string nor an object with text"),
                    ));
                }
            }
            Some(options.len())
        }
        Some(other) => {
            out.push(Issue::error(
                codes::MCQ_OPTIONS_INVALID,
                format!("MCQ options must be a list (found {other})"),
            ));
            None
        }
        None => {
            out.push(Issue::error(
                codes::MCQ_OPTIONS_INVALID,
                "MCQ item has no options list",
            ));
            None
        }
    };
    let Some(solution) = item.solution() else {
        return;
    };
    let index = match solution.get("index") {
        Some(Value::Number(number)) if number.is_i64() || number.is_u64() => number.as_i64(),
        Some(other) => {
            out.push(Issue::error(
                codes::MCQ_INDEX_INVALID,
                format!("MCQ solution.index must be an integer (found {other})"),
            ));
            return;
        }
        None => {
            out.push(Issue::error(
                codes::MCQ_INDEX_INVALID,
                "MCQ solution.index is missing",
            ));
            return;
        }
    };
    if let Some(options) = option_count {
        let in_range = index.map_or(false, |index| {
            index >= 0 && usize::try_from(index).map_or(false, |index| index < options)
        });
        if !in_range {
            let shown = index.map_or_else(|| "overflow".to_string(), |index| index.to_string());
            out.push(Issue::error(
                codes::MCQ_INDEX_OUT_OF_RANGE,
                format!("MCQ solution.index out of range (index={shown}, options={options})"),
            ));
        }
    }
}

fn numeric(item: &ItemView<'_>, out: &mut Vec<Issue>) {
    let Some(solution) = item.solution() else {
        return;
    };
    match solution.get("value") {
        Some(value) if parse_decimal(value).is_some() => {}
        Some(value) => out.push(Issue::error(
            codes::NUMERIC_VALUE_INVALID,
            format!("numeric solution.value is not a number (found {value})"),
        )),
        None => out.push(Issue::error(
            codes::NUMERIC_VALUE_INVALID,
            "numeric solution.value is missing",
        )),
    }
}

fn fill_blanks(item: &ItemView<'_>, out: &mut Vec<Issue>) {
    let Some(solution) = item.solution() else {
        return;
    };
    let structured = match solution {
        Value::Object(map) => !map.is_empty(),
        Value::Array(values) => !values.is_empty(),
        _ => false,
    };
    if !structured {
        out.push(Issue::error(
            codes::FILL_BLANKS_SOLUTION_EMPTY,
            format!("fill_blanks solution must be a non-empty structured record (found {solution})"),
        ));
    }
}
