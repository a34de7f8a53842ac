//! Error families of the pipeline and the diagnostic payload they carry.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic payload of every [`OefenError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Dotted code such as `canon.missing`; stable across releases.
    pub code: String,
    /// What went wrong.
    pub message: String,
    /// Where it went wrong: paths, item positions, patch numbers.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// What the operator can do about it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with a code and message and nothing else.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records one context entry; a repeated key keeps the last value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Records the file the error is about under the `path` key.
    pub fn with_path(self, path: &Path) -> Self {
        self.with_context("path", path.display().to_string())
    }

    /// Attaches a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " ({key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
            f.write_str(")")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Every way a pipeline run can abort.
///
/// Findings about content (issues, duplicate findings, coverage gaps) are
/// data, not errors; an `OefenError` means the run itself could not finish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum OefenError {
    /// A canon or baseline is missing or malformed.
    #[error("canon error {0}")]
    Canon(ErrorInfo),
    /// The content root, a pack path or a config file cannot be read.
    #[error("input error {0}")]
    Input(ErrorInfo),
    /// A pack handed to a transform is not an array of items, or cannot be written.
    #[error("pack error {0}")]
    Pack(ErrorInfo),
    /// A pack cannot be rebalanced, or a rebalance broke a post-condition.
    #[error("rebalance error {0}")]
    Rebalance(ErrorInfo),
    /// A patch set does not select, apply or verify.
    #[error("patch error {0}")]
    Patch(ErrorInfo),
    /// A report could not be encoded or written.
    #[error("serde error {0}")]
    Serde(ErrorInfo),
}

impl OefenError {
    /// Payload of any family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            OefenError::Canon(info)
            | OefenError::Input(info)
            | OefenError::Pack(info)
            | OefenError::Rebalance(info)
            | OefenError::Patch(info)
            | OefenError::Serde(info) => info,
        }
    }

    /// `2` when the run lacked its canons or inputs, `1` for every other abort.
    pub fn exit_code(&self) -> u8 {
        match self {
            OefenError::Canon(_) | OefenError::Input(_) => 2,
            OefenError::Pack(_)
            | OefenError::Rebalance(_)
            | OefenError::Patch(_)
            | OefenError::Serde(_) => 1,
        }
    }
}
