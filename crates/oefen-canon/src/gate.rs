use std::collections::BTreeMap;
use std::path::Path;

use oefen_core::errors::OefenError;
use serde_json::Value;

use crate::{canon_error, loose_u32, read_json};

/// Permitted kerndoelen per school group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupGate {
    groups: BTreeMap<u8, Vec<u32>>,
}

impl GroupGate {
    /// Builds a gate from explicit entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (u8, Vec<u32>)>) -> Self {
        let mut groups = BTreeMap::new();
        for (group, mut kerndoelen) in entries {
            kerndoelen.sort_unstable();
            kerndoelen.dedup();
            groups.insert(group, kerndoelen);
        }
        Self { groups }
    }

    /// Kerndoelen permitted for `group`; empty when the group is not gated.
    pub fn permitted(&self, group: u8) -> &[u32] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns whether `kerndoel` may appear in `group`.
    pub fn permits(&self, group: u8, kerndoel: u32) -> bool {
        self.permitted(group).binary_search(&kerndoel).is_ok()
    }

    /// Iterates gated groups in ascending order.
    pub fn groups(&self) -> impl Iterator<Item = (u8, &[u32])> {
        self.groups
            .iter()
            .map(|(group, kerndoelen)| (*group, kerndoelen.as_slice()))
    }
}

/// Loads `{groups: [{group, kerndoelen}, ...]}`.
pub fn load_group_gate(path: &Path) -> Result<GroupGate, OefenError> {
    if !path.is_file() {
        return Err(canon_error(
            "canon.missing",
            path,
            format!("group gate {} does not exist", path.display()),
        ));
    }
    let document = read_json(path)?;
    let groups = document
        .get("groups")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            canon_error(
                "canon.gate_missing_key",
                path,
                "group gate is missing the `groups` list",
            )
        })?;
    let mut entries = Vec::with_capacity(groups.len());
    for (idx, entry) in groups.iter().enumerate() {
        let group = entry
            .get("group")
            .and_then(loose_u32)
            .and_then(|group| u8::try_from(group).ok())
            .filter(|group| (1..=8).contains(group))
            .ok_or_else(|| {
                canon_error(
                    "canon.gate_group",
                    path,
                    format!("gate entry #{idx} needs an integer `group` between 1 and 8"),
                )
            })?;
        let kerndoelen = entry
            .get("kerndoelen")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                canon_error(
                    "canon.gate_missing_key",
                    path,
                    format!("gate entry #{idx} is missing `kerndoelen`"),
                )
            })?
            .iter()
            .map(|value| {
                loose_u32(value).ok_or_else(|| {
                    canon_error(
                        "canon.gate_kerndoel",
                        path,
                        format!("gate entry #{idx} lists a non-integer kerndoel {value}"),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        entries.push((group, kerndoelen));
    }
    Ok(GroupGate::from_entries(entries))
}
