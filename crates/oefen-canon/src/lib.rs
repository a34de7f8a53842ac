#![deny(missing_docs)]
#![doc = "Canon loaders: normalized, read-only lookups over the curriculum reference documents."]

/// Duplicate baseline whitelist.
pub mod baseline;
/// Misconception and feedback packs per domain.
pub mod packs;
/// Group gate (permitted kerndoelen per group).
pub mod gate;
/// Allowed task-form matrix.
pub mod taskform;
/// Topic canon.
pub mod topic;

use std::fs;
use std::path::{Path, PathBuf};

use oefen_core::errors::{ErrorInfo, OefenError};
use serde_json::Value;

pub use baseline::{load_duplicate_baseline, BaselineEntry, DuplicateBaseline};
pub use gate::{load_group_gate, GroupGate};
pub use packs::{load_domain_packs, DomainPack, DomainPacks};
pub use taskform::{load_task_form_canon, LevelForms, TaskFormCanon};
pub use topic::{load_topic_canon, TopicCanon, TopicEntry, TopicKey};

/// Paths to the canons a validation run needs.
#[derive(Debug, Clone)]
pub struct CanonPaths {
    /// Topic canon file or directory of per-domain files.
    pub topic_canon: PathBuf,
    /// Task-form canon file.
    pub task_forms: PathBuf,
    /// Shared root holding `misconcepts/` and `feedback/`.
    pub shared_root: PathBuf,
}

/// The canons consulted by the content rule engine, loaded once per run.
#[derive(Debug, Clone)]
pub struct Canons {
    /// Topic canon keyed by (domain, grade, topic).
    pub topics: TopicCanon,
    /// Level to allowed/disallowed task forms.
    pub task_forms: TaskFormCanon,
    /// Misconception and feedback packs per domain.
    pub domain_packs: DomainPacks,
}

impl Canons {
    /// Loads every canon, failing on the first missing or malformed one.
    pub fn load(paths: &CanonPaths) -> Result<Self, OefenError> {
        let topics = load_topic_canon(&paths.topic_canon)?;
        let task_forms = load_task_form_canon(&paths.task_forms)?;
        let domain_packs = load_domain_packs(&paths.shared_root)?;
        tracing::info!(
            topics = topics.len(),
            levels = task_forms.levels.len(),
            ready_domains = domain_packs.ready_domains().count(),
            "canons loaded"
        );
        Ok(Self {
            topics,
            task_forms,
            domain_packs,
        })
    }
}

pub(crate) fn canon_error(code: &str, path: &Path, message: impl Into<String>) -> OefenError {
    OefenError::Canon(
        ErrorInfo::new(code, message.into()).with_path(path),
    )
}

pub(crate) fn read_json(path: &Path) -> Result<Value, OefenError> {
    let bytes = fs::read(path).map_err(|err| {
        canon_error(
            "canon.unreadable",
            path,
            format!("failed to read {}: {err}", path.display()),
        )
    })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        canon_error(
            "canon.malformed",
            path,
            format!("failed to parse {}: {err}", path.display()),
        )
    })
}

/// Reads an integer that authors may write either as a number or a numeric string.
pub(crate) fn loose_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|raw| u32::try_from(raw).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
