use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of loading one pack file.
#[derive(Debug, Clone, PartialEq)]
pub enum PackLoad {
    /// A JSON array with at least one element.
    Ok(Vec<Value>),
    /// Zero bytes after trimming whitespace.
    EmptyFile,
    /// A valid, empty JSON array.
    EmptyArray,
    /// Malformed JSON or an unreadable file.
    ParseError(String),
    /// Valid JSON that is not an array.
    NotArray,
}

/// Status label of a [`PackLoad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadStatus {
    /// Parsed into a non-empty array.
    Ok,
    /// Empty file.
    EmptyFile,
    /// Empty array.
    EmptyArray,
    /// Parse or read failure.
    ParseError,
    /// Not an array.
    NotArray,
}

impl PackLoad {
    /// Status label of the outcome.
    pub fn status(&self) -> LoadStatus {
        match self {
            PackLoad::Ok(_) => LoadStatus::Ok,
            PackLoad::EmptyFile => LoadStatus::EmptyFile,
            PackLoad::EmptyArray => LoadStatus::EmptyArray,
            PackLoad::ParseError(_) => LoadStatus::ParseError,
            PackLoad::NotArray => LoadStatus::NotArray,
        }
    }
}

/// Loads a pack without ever failing; every problem becomes a status.
pub fn tolerant_load(path: &Path) -> PackLoad {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => return PackLoad::ParseError(format!("read failed: {err}")),
    };
    let trimmed = raw.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return PackLoad::EmptyFile;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) if items.is_empty() => PackLoad::EmptyArray,
        Ok(Value::Array(items)) => PackLoad::Ok(items),
        Ok(_) => PackLoad::NotArray,
        Err(err) => PackLoad::ParseError(err.to_string()),
    }
}
