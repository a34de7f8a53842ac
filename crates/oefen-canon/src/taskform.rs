use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use oefen_core::errors::OefenError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{canon_error, read_json};

/// Allowed and disallowed task forms for one level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelForms {
    /// Task forms explicitly allowed at the level.
    pub allowed: BTreeSet<String>,
    /// Task forms explicitly disallowed at the level.
    pub disallowed: BTreeSet<String>,
}

/// Task-form matrix plus the global set of defined task forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFormCanon {
    /// Per-level allowed/disallowed sets.
    pub levels: BTreeMap<String, LevelForms>,
    /// Every task form the canon defines.
    pub definitions: BTreeSet<String>,
}

impl TaskFormCanon {
    /// Returns whether `form` is allowed at `level`.
    pub fn is_allowed(&self, level: &str, form: &str) -> bool {
        self.levels
            .get(level)
            .map_or(false, |forms| forms.allowed.contains(form))
    }

    /// Returns whether `form` is explicitly disallowed at `level`.
    pub fn is_disallowed(&self, level: &str, form: &str) -> bool {
        self.levels
            .get(level)
            .map_or(false, |forms| forms.disallowed.contains(form))
    }

    /// Returns whether `form` appears in the global definitions.
    pub fn is_defined(&self, form: &str) -> bool {
        self.definitions.contains(form)
    }

    /// Returns whether `form` is named anywhere in the canon: the definitions
    /// or any level's allowed or disallowed set.
    pub fn is_known(&self, form: &str) -> bool {
        self.is_defined(form)
            || self
                .levels
                .values()
                .any(|forms| forms.allowed.contains(form) || forms.disallowed.contains(form))
    }

    /// Allowed forms for `level`, empty when the level is unknown.
    pub fn allowed_for(&self, level: &str) -> Vec<&str> {
        self.levels
            .get(level)
            .map(|forms| forms.allowed.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

fn string_set(value: Option<&Value>) -> BTreeSet<String> {
    value
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(|form| form.trim().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Loads the task-form canon:
/// `{levels: {<level>: {allowedTaskForms, disallowedTaskForms}}, taskFormDefinitions}`.
///
/// Definitions may be a map keyed by tag or a plain list of tags.
pub fn load_task_form_canon(path: &Path) -> Result<TaskFormCanon, OefenError> {
    if !path.is_file() {
        return Err(canon_error(
            "canon.missing",
            path,
            format!("task-form canon {} does not exist", path.display()),
        ));
    }
    let document = read_json(path)?;
    let levels_value = document
        .get("levels")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            canon_error(
                "canon.taskform_missing_key",
                path,
                "task-form canon is missing the `levels` object",
            )
        })?;
    let mut levels = BTreeMap::new();
    for (level, level_entry) in levels_value {
        if !level_entry.is_object() {
            return Err(canon_error(
                "canon.taskform_shape",
                path,
                format!("level `{level}` must map to an object"),
            ));
        }
        let allowed = string_set(
            level_entry
                .get("allowedTaskForms")
                .or_else(|| level_entry.get("allowed_task_forms")),
        );
        let disallowed = string_set(
            level_entry
                .get("disallowedTaskForms")
                .or_else(|| level_entry.get("disallowed_task_forms")),
        );
        levels.insert(level.trim().to_string(), LevelForms { allowed, disallowed });
    }
    let definitions = match document
        .get("taskFormDefinitions")
        .or_else(|| document.get("task_form_definitions"))
    {
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        Some(list @ Value::Array(_)) => string_set(Some(list)),
        Some(Value::Null) | None => BTreeSet::new(),
        Some(_) => {
            return Err(canon_error(
                "canon.taskform_shape",
                path,
                "`taskFormDefinitions` must be an object or a list",
            ))
        }
    };
    Ok(TaskFormCanon {
        levels,
        definitions,
    })
}
