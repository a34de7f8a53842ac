use oefen_core::errors::OefenError;
use oefen_core::hash::stable_hash_string;
use oefen_core::serde::to_canonical_json_bytes;
use oefen_core::{sort_issues, tally, Issue};
use serde::{Deserialize, Serialize};

/// Aggregated outcome of a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Number of packs visited.
    pub packs_checked: usize,
    /// Number of items visited.
    pub items_checked: usize,
    /// ERROR count.
    pub errors: usize,
    /// WARN count.
    pub warnings: usize,
    /// Issues sorted by pack path and item position.
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    /// Builds a report, sorting the issues deterministically.
    pub fn new(packs_checked: usize, items_checked: usize, mut issues: Vec<Issue>) -> Self {
        sort_issues(&mut issues);
        let (errors, warnings) = tally(&issues);
        Self {
            packs_checked,
            items_checked,
            errors,
            warnings,
            issues,
        }
    }

    /// Returns whether the run is free of ERROR issues.
    pub fn passed(&self) -> bool {
        self.errors == 0
    }

    /// Issues grouped per pack path, in report order.
    pub fn by_pack(&self) -> Vec<(&str, Vec<&Issue>)> {
        let mut groups: Vec<(&str, Vec<&Issue>)> = Vec::new();
        for issue in &self.issues {
            let same_pack = groups
                .last()
                .map_or(false, |(path, _)| *path == issue.path);
            if same_pack {
                if let Some((_, group)) = groups.last_mut() {
                    group.push(issue);
                }
            } else {
                groups.push((issue.path.as_str(), vec![issue]));
            }
        }
        groups
    }

    /// Stable content hash of the report.
    pub fn report_hash(&self) -> Result<String, OefenError> {
        stable_hash_string(self)
    }

    /// Canonical JSON bytes with the report hash embedded.
    pub fn to_bytes(&self) -> Result<Vec<u8>, OefenError> {
        let hash = self.report_hash()?;
        to_canonical_json_bytes(&serde_json::json!({
            "report": self,
            "report_hash": hash,
        }))
    }
}
