#![deny(missing_docs)]
#![doc = "Pack walker: enumerates `exercises.json` packs under a content root in sorted order."]

/// Path to coordinate parsing.
pub mod coordinate;
/// Tolerant pack loading.
pub mod load;

use std::path::{Path, PathBuf};

use oefen_core::errors::{ErrorInfo, OefenError};
use oefen_core::PackCoordinate;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

pub use coordinate::parse_coordinate;
pub use load::{tolerant_load, LoadStatus, PackLoad};

/// Default locale subtree under the content root.
pub const DEFAULT_LOCALE: &str = "nl";
/// File name of a unit pack.
pub const PACK_FILE_NAME: &str = "exercises.json";

/// Options controlling pack discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkOptions {
    /// Locale segment whose successor names the domain.
    pub locale: String,
    /// File name identifying a pack.
    pub file_name: String,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            file_name: PACK_FILE_NAME.to_string(),
        }
    }
}

/// One discovered pack with its parsed coordinate and load outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Pack {
    /// Filesystem path of the pack.
    pub path: PathBuf,
    /// Content-root relative path, `/` separated.
    pub relative: String,
    /// Coordinate derived from the path.
    pub coordinate: PackCoordinate,
    /// Tolerant load outcome.
    pub load: PackLoad,
}

impl Pack {
    /// Items of the pack; empty unless the load succeeded.
    pub fn items(&self) -> &[serde_json::Value] {
        match &self.load {
            PackLoad::Ok(items) => items,
            _ => &[],
        }
    }

    /// Status of the load.
    pub fn status(&self) -> LoadStatus {
        self.load.status()
    }
}

/// Streaming iterator over packs; each file is read when it is reached.
#[derive(Debug)]
pub struct PackWalk {
    root: PathBuf,
    options: WalkOptions,
    paths: std::vec::IntoIter<PathBuf>,
}

impl Iterator for PackWalk {
    type Item = Pack;

    fn next(&mut self) -> Option<Pack> {
        let path = self.paths.next()?;
        let relative_path = path.strip_prefix(&self.root).unwrap_or(&path).to_path_buf();
        let relative = relative_path.to_string_lossy().replace('\\', "/");
        let coordinate = parse_coordinate(&relative_path, &self.options.locale);
        let load = tolerant_load(&path);
        tracing::debug!(pack = %relative, status = ?load.status(), "pack loaded");
        Some(Pack {
            path,
            relative,
            coordinate,
            load,
        })
    }
}

/// Enumerates every pack under `content_root` in sorted path order.
///
/// Bad pack files never fail the walk; they surface through [`PackLoad`].
/// Only a missing content root is an error.
pub fn walk(content_root: &Path, options: &WalkOptions) -> Result<PackWalk, OefenError> {
    if !content_root.is_dir() {
        return Err(OefenError::Input(
            ErrorInfo::new(
                "input.content_root",
                format!("content root {} does not exist", content_root.display()),
            )
            .with_path(content_root),
        ));
    }
    let mut paths = Vec::new();
    for entry in WalkDir::new(content_root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable directory entry");
                continue;
            }
        };
        if entry.file_type().is_file() && entry.file_name() == options.file_name.as_str() {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    tracing::info!(root = %content_root.display(), packs = paths.len(), "packs discovered");
    Ok(PackWalk {
        root: content_root.to_path_buf(),
        options: options.clone(),
        paths: paths.into_iter(),
    })
}
