//! Authored patch sets: ordered `(selector, edit)` pairs applied to one pack.
//!
//! A patch set replaces one-off repair scripts. Selectors are structural,
//! edits are typed, application is idempotent, and every touched item must
//! pass the interaction-shape rules before anything is written.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use oefen_core::errors::{ErrorInfo, OefenError};
use oefen_rules::{check_interaction_shape, ItemView};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::io::{read_pack_file, write_pack_file};
use crate::{options_mut, set_solution_index};

/// Ordered list of patches for one pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchSet {
    /// Patches in application order.
    pub patches: Vec<Patch>,
}

/// One selector and the edit applied to the selected item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    /// Which item (and option) the edit targets.
    pub select: Selector,
    /// What changes.
    pub edit: Edit,
}

/// Structural item selector. At least one of `id` or `question_index` is
/// required; when both are given they must agree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    /// Item identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Zero-based item position in the pack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_index: Option<usize>,
    /// Zero-based option position, for option text edits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_index: Option<usize>,
}

/// Typed edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    /// Replaces the whole options array.
    ReplaceOptions {
        /// New options, strings or objects with `text`.
        options: Vec<Value>,
    },
    /// Replaces a text: the selected option's text, or an item field.
    ReplaceText {
        /// New text.
        text: String,
        /// Item field to replace when no option is selected.
        #[serde(default = "Edit::default_text_field")]
        field: String,
    },
    /// Moves the correct marker to another option.
    SetCorrectIndex {
        /// New correct option position.
        index: usize,
    },
}

impl Edit {
    fn default_text_field() -> String {
        "prompt".to_string()
    }

    fn name(&self) -> &'static str {
        match self {
            Edit::ReplaceOptions { .. } => "replace_options",
            Edit::ReplaceText { .. } => "replace_text",
            Edit::SetCorrectIndex { .. } => "set_correct_index",
        }
    }
}

/// Whether a patch changed its item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchStatus {
    /// The item changed.
    Applied,
    /// The item already matched the edit.
    Unchanged,
}

impl fmt::Display for PatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchStatus::Applied => f.write_str("applied"),
            PatchStatus::Unchanged => f.write_str("unchanged"),
        }
    }
}

/// Result of one patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchOutcome {
    /// Position of the patch in the set.
    pub patch: usize,
    /// Selected item position.
    pub item_index: usize,
    /// Selected item identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    /// Edit name.
    pub op: String,
    /// Whether the item changed.
    pub status: PatchStatus,
}

/// Outcome of a whole patch set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchReport {
    /// Per-patch outcomes in application order.
    pub outcomes: Vec<PatchOutcome>,
}

impl PatchReport {
    /// Patches that changed their item.
    pub fn applied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == PatchStatus::Applied)
            .count()
    }

    /// Patches that found their item already edited.
    pub fn unchanged(&self) -> usize {
        self.outcomes.len() - self.applied()
    }
}

fn patch_error(code: &str, patch: usize, message: impl Into<String>) -> OefenError {
    OefenError::Patch(ErrorInfo::new(code, message).with_context("patch", patch.to_string()))
}

fn item_id(item: &Value) -> Option<String> {
    ItemView::new(item).and_then(|view| view.id())
}

fn select(items: &[Value], selector: &Selector, patch: usize) -> Result<usize, OefenError> {
    match (&selector.id, selector.question_index) {
        (None, None) => Err(patch_error(
            "patch.selector_empty",
            patch,
            "selector needs an id or a question_index",
        )),
        (id, Some(index)) => {
            let Some(item) = items.get(index) else {
                return Err(patch_error(
                    "patch.no_match",
                    patch,
                    format!("question_index {index} is past the end of a {}-item pack", items.len()),
                ));
            };
            if let Some(id) = id {
                if item_id(item).as_deref() != Some(id.as_str()) {
                    return Err(patch_error(
                        "patch.no_match",
                        patch,
                        format!("item #{index} does not have id '{id}'"),
                    ));
                }
            }
            Ok(index)
        }
        (Some(id), None) => {
            let matches: Vec<usize> = items
                .iter()
                .enumerate()
                .filter(|(_, item)| item_id(item).as_deref() == Some(id.as_str()))
                .map(|(index, _)| index)
                .collect();
            match matches.as_slice() {
                [index] => Ok(*index),
                [] => Err(patch_error(
                    "patch.no_match",
                    patch,
                    format!("no item has id '{id}'"),
                )),
                _ => Err(patch_error(
                    "patch.ambiguous",
                    patch,
                    format!("{} items share id '{id}'", matches.len()),
                )),
            }
        }
    }
}

fn set_correct_flags(options: &mut [Value], index: usize) {
    for (position, option) in options.iter_mut().enumerate() {
        let Some(map) = option.as_object_mut() else {
            continue;
        };
        for flag in ["isCorrect", "is_correct"] {
            if let Some(value) = map.get_mut(flag) {
                *value = Value::Bool(position == index);
            }
        }
    }
}

fn apply_edit(item: &mut Value, patch: &Patch, number: usize) -> Result<(), OefenError> {
    if patch.select.option_index.is_some() && !matches!(patch.edit, Edit::ReplaceText { .. }) {
        return Err(patch_error(
            "patch.option_index",
            number,
            format!("option_index does not apply to {}", patch.edit.name()),
        ));
    }
    match &patch.edit {
        Edit::ReplaceOptions { options } => match options_mut(item) {
            Some(current) => *current = options.clone(),
            None => {
                let map = item.as_object_mut().ok_or_else(|| {
                    patch_error("patch.not_object", number, "selected item is not an object")
                })?;
                map.insert("options".to_string(), Value::Array(options.clone()));
            }
        },
        Edit::ReplaceText { text, field } => match patch.select.option_index {
            Some(position) => {
                let option = options_mut(item)
                    .and_then(|options| options.get_mut(position))
                    .ok_or_else(|| {
                        patch_error(
                            "patch.no_match",
                            number,
                            format!("selected item has no option #{position}"),
                        )
                    })?;
                match option {
                    Value::Object(map) => {
                        map.insert("text".to_string(), Value::String(text.clone()));
                    }
                    other => *other = Value::String(text.clone()),
                }
            }
            None => {
                let map = item.as_object_mut().ok_or_else(|| {
                    patch_error("patch.not_object", number, "selected item is not an object")
                })?;
                map.insert(field.clone(), Value::String(text.clone()));
            }
        },
        Edit::SetCorrectIndex { index } => {
            let options = options_mut(item).ok_or_else(|| {
                patch_error("patch.no_options", number, "selected item has no options list")
            })?;
            if *index >= options.len() {
                return Err(patch_error(
                    "patch.index_range",
                    number,
                    format!("index {index} is out of range for {} options", options.len()),
                ));
            }
            set_correct_flags(options, *index);
            if !set_solution_index(item, *index) {
                return Err(patch_error(
                    "patch.solution_shape",
                    number,
                    "selected item has a non-object solution",
                ));
            }
        }
    }
    Ok(())
}

/// Applies a patch set to a copy of `items`.
///
/// Returns the edited items and per-patch outcomes. Any selector without a
/// match, any invalid edit, and any touched item failing the interaction
/// shape rules aborts the whole set.
pub fn apply_patches(
    items: &[Value],
    set: &PatchSet,
) -> Result<(Vec<Value>, PatchReport), OefenError> {
    let mut working = items.to_vec();
    let mut touched = BTreeSet::new();
    let mut report = PatchReport::default();
    for (number, patch) in set.patches.iter().enumerate() {
        let index = select(&working, &patch.select, number)?;
        let before = working[index].clone();
        apply_edit(&mut working[index], patch, number)?;
        let status = if working[index] == before {
            PatchStatus::Unchanged
        } else {
            touched.insert(index);
            PatchStatus::Applied
        };
        report.outcomes.push(PatchOutcome {
            patch: number,
            item_index: index,
            item_id: item_id(&working[index]),
            op: patch.edit.name().to_string(),
            status,
        });
    }
    for index in touched {
        let Some(view) = ItemView::new(&working[index]) else {
            continue;
        };
        let mut issues = Vec::new();
        check_interaction_shape(&view, &mut issues);
        let failures: Vec<String> = issues
            .iter()
            .filter(|issue| issue.is_error())
            .map(|issue| format!("[{}] {}", issue.code, issue.message))
            .collect();
        if !failures.is_empty() {
            return Err(OefenError::Patch(
                ErrorInfo::new(
                    "patch.verify_failed",
                    format!("item #{index} fails verification: {}", failures.join("; ")),
                )
                .with_context("item_index", index.to_string()),
            ));
        }
    }
    Ok((working, report))
}

/// Loads a patch set from JSON, or YAML when the extension is `.yaml`/`.yml`.
pub fn load_patch_set(path: &Path) -> Result<PatchSet, OefenError> {
    let bytes = fs::read(path).map_err(|err| {
        OefenError::Input(
            ErrorInfo::new("input.patches_unreadable", err.to_string())
                .with_path(path),
        )
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let parsed: Result<PatchSet, String> = if is_yaml {
        serde_yaml::from_slice(&bytes).map_err(|err| err.to_string())
    } else {
        serde_json::from_slice(&bytes).map_err(|err| err.to_string())
    };
    parsed.map_err(|message| {
        OefenError::Patch(
            ErrorInfo::new("patch.malformed", message)
                .with_path(path),
        )
    })
}

/// Applies a patch file to a pack file.
///
/// The result goes to `out`, or back to `pack` when something changed.
pub fn patch_file(pack: &Path, patches: &Path, out: Option<&Path>) -> Result<PatchReport, OefenError> {
    let items = read_pack_file(pack)?;
    let set = load_patch_set(patches)?;
    let (patched, report) = apply_patches(&items, &set)?;
    match out {
        Some(out) => write_pack_file(out, &patched)?,
        None if report.applied() > 0 => write_pack_file(pack, &patched)?,
        None => {}
    }
    tracing::info!(
        pack = %pack.display(),
        applied = report.applied(),
        unchanged = report.unchanged(),
        "patch set applied"
    );
    Ok(report)
}
