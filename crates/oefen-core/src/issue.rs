//! Typed validation issues with stable codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Issue severity. Only [`Severity::Error`] fails a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocking problem.
    Error,
    /// Advisory problem.
    Warn,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("ERROR"),
            Severity::Warn => f.write_str("WARN"),
        }
    }
}

/// A single finding against a pack or one of its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Severity of the finding.
    pub severity: Severity,
    /// Stable machine readable code.
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// Content-root relative pack path, `/` separated.
    pub path: String,
    /// Index of the item within the pack; `None` for pack level findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_index: Option<usize>,
    /// Identifier of the item when it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
}

impl Issue {
    /// Creates an ERROR issue.
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    /// Creates a WARN issue.
    pub fn warn(code: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, code, message)
    }

    fn new(severity: Severity, code: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.to_string(),
            message: message.into(),
            path: String::new(),
            item_index: None,
            item_id: None,
        }
    }

    /// Attaches the pack path.
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Attaches the item position and identifier.
    pub fn on_item(mut self, index: usize, id: Option<&str>) -> Self {
        self.item_index = Some(index);
        self.item_id = id.map(str::to_string);
        self
    }

    /// Returns whether the issue fails a run.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.code, self.severity, self.path)?;
        if let Some(index) = self.item_index {
            write!(f, "#{index}")?;
        }
        if let Some(id) = &self.item_id {
            write!(f, " (id={id})")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Sorts issues by pack path and item position.
///
/// The sort is stable, so findings for the same item keep the order in which
/// the rules produced them.
pub fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by(|a, b| {
        a.path
            .cmp(&b.path)
            .then_with(|| a.item_index.cmp(&b.item_index))
    });
}

/// Counts issues per severity as `(errors, warnings)`.
pub fn tally(issues: &[Issue]) -> (usize, usize) {
    let errors = issues.iter().filter(|issue| issue.is_error()).count();
    (errors, issues.len() - errors)
}
