use oefen_core::errors::OefenError;
use oefen_core::hash::stable_hash_string;
use oefen_core::serde::to_canonical_json_bytes;
use oefen_core::{Issue, Severity};
use serde::{Deserialize, Serialize};

/// Similarity notion behind a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DupKind {
    /// Identical prompt strings.
    PromptExact,
    /// Identical tuples of numeric tokens.
    NumericCore,
    /// Identical option tuple and correct index.
    McqSignature,
    /// A context word present in too many prompts.
    ContextDominance,
}

impl DupKind {
    /// Stable issue code.
    pub fn code(self) -> &'static str {
        match self {
            DupKind::PromptExact => "DUP_PROMPT_EXACT",
            DupKind::NumericCore => "DUP_NUMERIC_CORE",
            DupKind::McqSignature => "DUP_MCQ_SIGNATURE",
            DupKind::ContextDominance => "DUP_CONTEXT_DOMINANCE",
        }
    }
}

/// One duplicate finding within a pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DupFinding {
    /// Similarity notion.
    pub kind: DupKind,
    /// Severity from the policy.
    pub severity: Severity,
    /// Content-root relative pack path.
    pub path: String,
    /// Human readable message.
    pub message: String,
    /// Items involved, in pack order.
    pub item_indices: Vec<usize>,
    /// Whether the baseline silences the finding.
    pub suppressed: bool,
}

impl DupFinding {
    /// Returns whether the finding fails the gate.
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error && !self.suppressed
    }

    /// Renders the finding as an issue anchored at its first item.
    pub fn to_issue(&self) -> Issue {
        let issue = match self.severity {
            Severity::Error => Issue::error(self.kind.code(), self.message.clone()),
            Severity::Warn => Issue::warn(self.kind.code(), self.message.clone()),
        }
        .at(self.path.clone());
        match self.item_indices.first() {
            Some(first) => issue.on_item(*first, None),
            None => issue,
        }
    }
}

/// Outcome of a gate run over the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DupReport {
    /// Number of packs analysed.
    pub packs_checked: usize,
    /// Unsuppressed ERROR findings.
    pub errors: usize,
    /// Unsuppressed WARN findings.
    pub warnings: usize,
    /// Findings silenced by the baseline.
    pub suppressed: usize,
    /// Every finding, suppressed ones included, in pack path order.
    pub findings: Vec<DupFinding>,
}

impl DupReport {
    /// Builds a report from findings already in pack order.
    pub fn new(packs_checked: usize, mut findings: Vec<DupFinding>) -> Self {
        findings.sort_by(|a, b| a.path.cmp(&b.path));
        let suppressed = findings.iter().filter(|finding| finding.suppressed).count();
        let errors = findings.iter().filter(|finding| finding.is_blocking()).count();
        let warnings = findings.len() - suppressed - errors;
        Self {
            packs_checked,
            errors,
            warnings,
            suppressed,
            findings,
        }
    }

    /// PASS iff no unsuppressed ERROR finding occurred.
    pub fn passed(&self) -> bool {
        self.errors == 0
    }

    /// Findings that are reported, i.e. not silenced by the baseline.
    pub fn active(&self) -> impl Iterator<Item = &DupFinding> {
        self.findings.iter().filter(|finding| !finding.suppressed)
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
