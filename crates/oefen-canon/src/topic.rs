use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use oefen_core::errors::OefenError;
use oefen_core::normalize_domain;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::{canon_error, loose_u32, read_json};

/// Lookup key of a topic canon entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TopicKey {
    /// Normalized (kebab-form) domain.
    pub domain: String,
    /// Grade / group number.
    pub grade: u8,
    /// Topic slug.
    pub topic: String,
}

impl TopicKey {
    /// Builds a key, normalizing the domain.
    pub fn new(domain: &str, grade: u8, topic: &str) -> Self {
        Self {
            domain: normalize_domain(domain),
            grade,
            topic: topic.trim().to_string(),
        }
    }
}

/// Canon facts about one (domain, grade, topic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicEntry {
    /// Levels at which the topic may be authored.
    pub allowed_levels: BTreeSet<String>,
    /// Attainment targets the topic contributes to.
    pub kerndoelen: Vec<u32>,
    /// Free-form descriptive fields carried through untouched.
    #[serde(default)]
    pub extra: BTreeMap<String, Value>,
}

/// Topic canon keyed by `(normalized domain, grade, topic)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicCanon {
    entries: BTreeMap<TopicKey, TopicEntry>,
}

impl TopicCanon {
    /// Looks up an entry; the domain is normalized before the lookup.
    pub fn lookup(&self, domain: &str, grade: u8, topic: &str) -> Option<&TopicEntry> {
        self.entries.get(&TopicKey::new(domain, grade, topic))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the canon has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: TopicKey, entry: TopicEntry, path: &Path) -> Result<(), OefenError> {
        if self.entries.contains_key(&key) {
            return Err(canon_error(
                "canon.topic_duplicate",
                path,
                format!(
                    "topic ({}, {}, {}) is defined more than once",
                    key.domain, key.grade, key.topic
                ),
            ));
        }
        self.entries.insert(key, entry);
        Ok(())
    }
}

/// Loads the topic canon from a file or from a directory of per-domain files.
///
/// A file holds either a flat list of entries, each naming its domain, or a
/// per-domain document `{domain, version, topics: [...]}` whose entries
/// inherit the domain. Both shapes produce the same representation.
pub fn load_topic_canon(path: &Path) -> Result<TopicCanon, OefenError> {
    let mut canon = TopicCanon::default();
    if path.is_dir() {
        let mut files = Vec::new();
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|err| {
                canon_error("canon.unreadable", path, format!("failed to list canon dir: {err}"))
            })?;
            let is_json = entry.path().extension().and_then(|ext| ext.to_str()) == Some("json");
            if entry.file_type().is_file() && is_json {
                files.push(entry.into_path());
            }
        }
        if files.is_empty() {
            return Err(canon_error(
                "canon.topic_empty_dir",
                path,
                "topic canon directory holds no .json files",
            ));
        }
        for file in files {
            merge_topic_file(&mut canon, &file)?;
        }
    } else if path.is_file() {
        merge_topic_file(&mut canon, path)?;
    } else {
        return Err(canon_error(
            "canon.missing",
            path,
            format!("topic canon {} does not exist", path.display()),
        ));
    }
    Ok(canon)
}

fn merge_topic_file(canon: &mut TopicCanon, path: &Path) -> Result<(), OefenError> {
    let document = read_json(path)?;
    match &document {
        Value::Array(entries) => {
            for (idx, entry) in entries.iter().enumerate() {
                let (key, topic) = parse_entry(entry, None, path, idx)?;
                canon.insert(key, topic, path)?;
            }
        }
        Value::Object(map) if map.get("topics").map_or(false, Value::is_array) => {
            let domain = map.get("domain").and_then(Value::as_str);
            let entries = map
                .get("topics")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for (idx, entry) in entries.iter().enumerate() {
                let (key, topic) = parse_entry(entry, domain, path, idx)?;
                canon.insert(key, topic, path)?;
            }
        }
        _ => {
            return Err(canon_error(
                "canon.topic_shape",
                path,
                "topic canon must be a list of entries or an object with a `topics` list",
            ))
        }
    }
    Ok(())
}

fn field<'a>(map: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| map.get(*name))
}

fn parse_entry(
    entry: &Value,
    inherited_domain: Option<&str>,
    path: &Path,
    idx: usize,
) -> Result<(TopicKey, TopicEntry), OefenError> {
    let missing = |key: &str| {
        canon_error(
            "canon.topic_missing_key",
            path,
            format!("topic entry #{idx} is missing required key `{key}`"),
        )
    };
    let map = entry.as_object().ok_or_else(|| {
        canon_error(
            "canon.topic_shape",
            path,
            format!("topic entry #{idx} is not an object"),
        )
    })?;
    let domain = field(map, &["domain"])
        .and_then(Value::as_str)
        .or(inherited_domain)
        .ok_or_else(|| missing("domain"))?;
    let grade = field(map, &["grade", "group"])
        .and_then(loose_u32)
        .and_then(|grade| u8::try_from(grade).ok())
        .ok_or_else(|| missing("grade"))?;
    let topic = field(map, &["topic", "slug"])
        .and_then(Value::as_str)
        .ok_or_else(|| missing("topic"))?;
    let allowed_levels = field(map, &["allowedLevels", "allowed_levels"])
        .and_then(Value::as_array)
        .ok_or_else(|| missing("allowedLevels"))?
        .iter()
        .filter_map(Value::as_str)
        .map(|level| level.trim().to_string())
        .collect::<BTreeSet<_>>();
    let kerndoelen = match field(map, &["kerndoelen"]) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(values)) => values
            .iter()
            .map(|value| {
                loose_u32(value).ok_or_else(|| {
                    canon_error(
                        "canon.topic_kerndoel",
                        path,
                        format!("topic entry #{idx} lists a non-integer kerndoel {value}"),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(canon_error(
                "canon.topic_kerndoel",
                path,
                format!("topic entry #{idx} has kerndoelen {other}, expected a list"),
            ))
        }
    };
    const CORE_KEYS: [&str; 9] = [
        "domain",
        "grade",
        "group",
        "topic",
        "slug",
        "allowedLevels",
        "allowed_levels",
        "kerndoelen",
        "version",
    ];
    let extra = map
        .iter()
        .filter(|(key, _)| !CORE_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Ok((
        TopicKey::new(domain, grade, topic),
        TopicEntry {
            allowed_levels,
            kerndoelen,
            extra,
        },
    ))
}
