use std::fs;
use std::path::Path;

use oefen_core::errors::{ErrorInfo, OefenError};
use oefen_core::serde::to_pretty_json_bytes;
use serde_json::Value;

/// Reads a pack that must be a JSON array of items.
///
/// Unlike the walker this is strict: transforms never rewrite a pack they
/// could not fully read.
pub fn read_pack_file(path: &Path) -> Result<Vec<Value>, OefenError> {
    let bytes = fs::read(path).map_err(|err| {
        OefenError::Input(ErrorInfo::new("input.pack_unreadable", err.to_string()).with_path(path))
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let text = text.trim_start_matches('\u{feff}');
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err(OefenError::Pack(
            ErrorInfo::new("pack.not_array", "pack must be a JSON array of items").with_path(path),
        )),
        Err(err) => Err(OefenError::Pack(
            ErrorInfo::new("pack.malformed", err.to_string()).with_path(path),
        )),
    }
}

/// Writes items as pretty JSON with a trailing newline, keeping key order.
pub fn write_pack_file(path: &Path, items: &[Value]) -> Result<(), OefenError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            OefenError::Pack(ErrorInfo::new("pack.mkdir", err.to_string()).with_path(parent))
        })?;
    }
    let bytes = to_pretty_json_bytes(&items)?;
    fs::write(path, bytes).map_err(|err| {
        OefenError::Pack(ErrorInfo::new("pack.write", err.to_string()).with_path(path))
    })
}
