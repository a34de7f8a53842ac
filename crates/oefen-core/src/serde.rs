use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{ErrorInfo, OefenError};

fn serde_error(code: &str, err: impl ToString) -> OefenError {
    OefenError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Re-inserts object keys in sorted order, recursively.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(values) => Value::Array(values.into_iter().map(sort_keys).collect()),
        scalar => scalar,
    }
}

/// Compact JSON with every object's keys sorted, so equal reports encode to
/// equal bytes whatever order their maps were built in.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, OefenError> {
    let tree = serde_json::to_value(value).map_err(|err| serde_error("json_serialize", err))?;
    serde_json::to_vec(&sort_keys(tree)).map_err(|err| serde_error("json_write", err))
}

/// Serializes an authored document as pretty JSON, keeping its key order.
///
/// Output always ends with a single newline so rewritten packs diff cleanly.
pub fn to_pretty_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, OefenError> {
    let mut bytes =
        serde_json::to_vec_pretty(value).map_err(|err| serde_error("json_write", err))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Writes report bytes to `path`, creating missing parent directories.
pub fn write_report_file(path: &Path, bytes: &[u8]) -> Result<(), OefenError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            OefenError::Serde(ErrorInfo::new("report.mkdir", err.to_string()).with_path(parent))
        })?;
    }
    fs::write(path, bytes).map_err(|err| {
        OefenError::Serde(ErrorInfo::new("report.write", err.to_string()).with_path(path))
    })
}
