use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use globset::{Glob, GlobMatcher};
use oefen_core::errors::OefenError;
use serde::{Deserialize, Serialize};

use crate::canon_error;

/// Allow-flags for one pack in the duplicate baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineEntry {
    /// Silences prompt-exact findings.
    #[serde(default, alias = "allowPromptDuplicates")]
    pub allow_prompt_duplicates: bool,
    /// Silences numeric-core findings.
    #[serde(default, alias = "allowNumericDuplicates")]
    pub allow_numeric_duplicates: bool,
    /// Silences MCQ-signature findings.
    #[serde(default, alias = "allowMcqDuplicates")]
    pub allow_mcq_duplicates: bool,
    /// Silences context-dominance findings.
    #[serde(default, alias = "allowContextDominance")]
    pub allow_context_dominance: bool,
}

impl BaselineEntry {
    fn merge(self, other: BaselineEntry) -> BaselineEntry {
        BaselineEntry {
            allow_prompt_duplicates: self.allow_prompt_duplicates || other.allow_prompt_duplicates,
            allow_numeric_duplicates: self.allow_numeric_duplicates
                || other.allow_numeric_duplicates,
            allow_mcq_duplicates: self.allow_mcq_duplicates || other.allow_mcq_duplicates,
            allow_context_dominance: self.allow_context_dominance
                || other.allow_context_dominance,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BaselineDocument {
    Wrapped { packs: BTreeMap<String, BaselineEntry> },
    Flat(BTreeMap<String, BaselineEntry>),
}

/// Authored whitelist of known-acceptable duplication, keyed by pack path.
///
/// Keys are content-root relative, `/` separated. A key containing glob
/// metacharacters matches every pack it covers; an exact key wins over globs,
/// matching globs are merged.
#[derive(Debug, Clone, Default)]
pub struct DuplicateBaseline {
    exact: BTreeMap<String, BaselineEntry>,
    globs: Vec<(GlobMatcher, BaselineEntry)>,
}

impl DuplicateBaseline {
    /// Builds a baseline from `(key, entry)` pairs.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, BaselineEntry)>,
    ) -> Result<Self, globset::Error> {
        let mut baseline = Self::default();
        for (key, entry) in entries {
            let key = key.replace('\\', "/");
            if key.contains(['*', '?', '[', '{']) {
                let matcher = Glob::new(&key)?.compile_matcher();
                baseline.globs.push((matcher, entry));
            } else {
                baseline.exact.insert(key, entry);
            }
        }
        Ok(baseline)
    }

    /// Allow-flags for a pack; all `false` when the pack is not listed.
    pub fn entry_for(&self, pack_path: &str) -> BaselineEntry {
        if let Some(entry) = self.exact.get(pack_path) {
            return *entry;
        }
        self.globs
            .iter()
            .filter(|(matcher, _)| matcher.is_match(pack_path))
            .fold(BaselineEntry::default(), |acc, (_, entry)| acc.merge(*entry))
    }

    /// Number of listed keys.
    pub fn len(&self) -> usize {
        self.exact.len() + self.globs.len()
    }

    /// Returns whether nothing is whitelisted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Loads a baseline from JSON, or YAML when the extension is `.yaml`/`.yml`.
pub fn load_duplicate_baseline(path: &Path) -> Result<DuplicateBaseline, OefenError> {
    let bytes = fs::read(path).map_err(|err| {
        canon_error(
            "canon.unreadable",
            path,
            format!("failed to read baseline {}: {err}", path.display()),
        )
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let document: BaselineDocument = if is_yaml {
        serde_yaml::from_slice(&bytes)
            .map_err(|err| canon_error("canon.malformed", path, err.to_string()))?
    } else {
        serde_json::from_slice(&bytes)
            .map_err(|err| canon_error("canon.malformed", path, err.to_string()))?
    };
    let entries = match document {
        BaselineDocument::Wrapped { packs } => packs,
        BaselineDocument::Flat(entries) => entries,
    };
    DuplicateBaseline::from_entries(entries)
        .map_err(|err| canon_error("canon.baseline_glob", path, err.to_string()))
}
