use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use oefen_core::errors::{ErrorInfo, OefenError};
use oefen_core::normalize_domain;
use serde_json::Value;
use walkdir::WalkDir;

use crate::read_json;

/// Directory under the shared root holding misconception packs.
pub const MISCONCEPT_DIR: &str = "misconcepts";
/// Directory under the shared root holding feedback packs.
pub const FEEDBACK_DIR: &str = "feedback";

/// Misconception keys and feedback texts of one ready domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainPack {
    /// Misconception keys in authored order.
    pub keys: Vec<String>,
    key_set: BTreeSet<String>,
    /// Feedback text per misconception key.
    pub feedback: BTreeMap<String, String>,
}

impl DomainPack {
    /// Builds a pack from its keys and feedback texts.
    pub fn new(keys: Vec<String>, feedback: BTreeMap<String, String>) -> Self {
        let key_set = keys.iter().cloned().collect();
        Self {
            keys,
            key_set,
            feedback,
        }
    }

    /// Returns whether the misconception pack lists `key`.
    pub fn has_misconception(&self, key: &str) -> bool {
        self.key_set.contains(key)
    }

    /// Returns whether the feedback pack has text for `key`.
    pub fn has_feedback(&self, key: &str) -> bool {
        self.feedback.contains_key(key)
    }
}

/// Ready domains under a shared root.
///
/// A domain is ready iff both `misconcepts/<domain>.json` and
/// `feedback/<domain>.json` exist and parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainPacks {
    root: PathBuf,
    packs: BTreeMap<String, DomainPack>,
}

impl DomainPacks {
    /// Builds a set of ready packs rooted at `root`.
    pub fn from_packs(root: impl Into<PathBuf>, packs: BTreeMap<String, DomainPack>) -> Self {
        let packs = packs
            .into_iter()
            .map(|(domain, pack)| (normalize_domain(&domain), pack))
            .collect();
        Self {
            root: root.into(),
            packs,
        }
    }

    /// Returns the pack of a ready domain.
    pub fn get(&self, domain: &str) -> Option<&DomainPack> {
        self.packs.get(&normalize_domain(domain))
    }

    /// Returns whether the domain is ready.
    pub fn is_ready(&self, domain: &str) -> bool {
        self.get(domain).is_some()
    }

    /// Iterates ready domain names.
    pub fn ready_domains(&self) -> impl Iterator<Item = &str> {
        self.packs.keys().map(String::as_str)
    }

    /// The misconception and feedback paths expected for `domain`.
    pub fn expected_paths(&self, domain: &str) -> (PathBuf, PathBuf) {
        let file = format!("{}.json", normalize_domain(domain));
        (
            self.root.join(MISCONCEPT_DIR).join(&file),
            self.root.join(FEEDBACK_DIR).join(file),
        )
    }
}

fn json_files(dir: &Path) -> BTreeMap<String, PathBuf> {
    let mut files = BTreeMap::new();
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "shared pack directory is missing");
        return files;
    }
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some("json")
        {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            files.insert(normalize_domain(stem), path.to_path_buf());
        }
    }
    files
}

fn parse_misconcepts(document: &Value) -> Option<Vec<String>> {
    let entries = document.get("misconcepts")?.as_array()?;
    let mut keys = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::String(key) => keys.push(key.clone()),
            Value::Object(map) => keys.push(map.get("key")?.as_str()?.to_string()),
            _ => return None,
        }
    }
    Some(keys)
}

fn parse_feedback(document: &Value) -> Option<BTreeMap<String, String>> {
    let entries = document.get("misconceptFeedback")?.as_object()?;
    Some(
        entries
            .iter()
            .map(|(key, text)| {
                let text = match text {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect(),
    )
}

/// Loads every ready domain under `shared_root`.
///
/// Unparseable or malformed files are reported with a warning and leave their
/// domain not ready; only a missing shared root is an error.
pub fn load_domain_packs(shared_root: &Path) -> Result<DomainPacks, OefenError> {
    if !shared_root.is_dir() {
        return Err(OefenError::Input(
            ErrorInfo::new(
                "input.shared_root",
                format!("shared root {} does not exist", shared_root.display()),
            )
            .with_path(shared_root),
        ));
    }
    let misconcept_files = json_files(&shared_root.join(MISCONCEPT_DIR));
    let feedback_files = json_files(&shared_root.join(FEEDBACK_DIR));
    let mut packs = BTreeMap::new();
    for (domain, misconcept_path) in &misconcept_files {
        let Some(feedback_path) = feedback_files.get(domain) else {
            tracing::debug!(%domain, "no feedback pack, domain not ready");
            continue;
        };
        let keys = match read_json(misconcept_path).map(|doc| parse_misconcepts(&doc)) {
            Ok(Some(keys)) => keys,
            Ok(None) => {
                tracing::warn!(path = %misconcept_path.display(), "malformed misconception pack, skipping domain");
                continue;
            }
            Err(err) => {
                tracing::warn!(%err, "unreadable misconception pack, skipping domain");
                continue;
            }
        };
        let feedback = match read_json(feedback_path).map(|doc| parse_feedback(&doc)) {
            Ok(Some(feedback)) => feedback,
            Ok(None) => {
                tracing::warn!(path = %feedback_path.display(), "malformed feedback pack, skipping domain");
                continue;
            }
            Err(err) => {
                tracing::warn!(%err, "unreadable feedback pack, skipping domain");
                continue;
            }
        };
        packs.insert(domain.clone(), DomainPack::new(keys, feedback));
    }
    Ok(DomainPacks::from_packs(shared_root, packs))
}
