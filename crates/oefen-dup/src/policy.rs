//! Severity policy of the duplicate gate.

use std::fs;
use std::path::Path;

use oefen_core::errors::{ErrorInfo, OefenError};
use oefen_core::Severity;
use serde::{Deserialize, Serialize};

/// Severity per similarity notion plus the context-dominance thresholds.
///
/// Every field has a default, so an empty YAML document is a valid policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DupPolicy {
    /// Severity of identical prompts.
    #[serde(default = "DupPolicy::default_prompt_exact")]
    pub prompt_exact: Severity,
    /// Severity of numeric-core collisions.
    #[serde(default = "DupPolicy::default_numeric_core")]
    pub numeric_core: Severity,
    /// Severity of MCQ-signature collisions.
    #[serde(default = "DupPolicy::default_mcq_signature")]
    pub mcq_signature: Severity,
    /// Severity of dominant context words.
    #[serde(default = "DupPolicy::default_context_dominance")]
    pub context_dominance: Severity,
    /// Share of prompts a context word may reach before it dominates.
    #[serde(default = "DupPolicy::default_max_context_ratio")]
    pub max_context_ratio: f64,
    /// Packs with fewer prompts are not checked for context dominance.
    ///
    /// The bare dominance rule has no size cutoff; set this to 0 to check
    /// every pack. The default of 5 skips packs too small for a share to mean
    /// much, so a 4-prompt pack built around one word passes silently.
    #[serde(default = "DupPolicy::default_context_min_prompts")]
    pub context_min_prompts: usize,
}

impl DupPolicy {
    const fn default_prompt_exact() -> Severity {
        Severity::Warn
    }

    const fn default_numeric_core() -> Severity {
        Severity::Error
    }

    const fn default_mcq_signature() -> Severity {
        Severity::Error
    }

    const fn default_context_dominance() -> Severity {
        Severity::Warn
    }

    const fn default_max_context_ratio() -> f64 {
        0.4
    }

    const fn default_context_min_prompts() -> usize {
        5
    }
}

impl Default for DupPolicy {
    fn default() -> Self {
        Self {
            prompt_exact: Self::default_prompt_exact(),
            numeric_core: Self::default_numeric_core(),
            mcq_signature: Self::default_mcq_signature(),
            context_dominance: Self::default_context_dominance(),
            max_context_ratio: Self::default_max_context_ratio(),
            context_min_prompts: Self::default_context_min_prompts(),
        }
    }
}

impl DupPolicy {
    /// Replaces the context-ratio threshold, rejecting values outside [0, 1].
    pub fn with_max_context_ratio(mut self, ratio: f64) -> Result<Self, ErrorInfo> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ErrorInfo::new(
                "input.dup_policy_ratio",
                format!("max_context_ratio must lie in [0, 1] (found {ratio})"),
            ));
        }
        self.max_context_ratio = ratio;
        Ok(self)
    }
}

fn policy_error(code: &str, path: &Path, message: impl Into<String>) -> OefenError {
    OefenError::Input(ErrorInfo::new(code, message).with_path(path))
}

/// Loads a policy from a YAML file.
pub fn load_policy(path: &Path) -> Result<DupPolicy, OefenError> {
    let bytes = fs::read(path).map_err(|err| {
        policy_error(
            "input.dup_policy_unreadable",
            path,
            format!("failed to read duplicate policy: {err}"),
        )
    })?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(DupPolicy::default());
    }
    let policy: DupPolicy = serde_yaml::from_slice(&bytes)
        .map_err(|err| policy_error("input.dup_policy_malformed", path, err.to_string()))?;
    let ratio = policy.max_context_ratio;
    policy
        .with_max_context_ratio(ratio)
        .map_err(|info| OefenError::Input(info.with_path(path)))
}
