//! Pack coordinates derived from the content layout.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder used when a path carries no domain segment.
pub const UNKNOWN_DOMAIN: &str = "unknown-domain";
/// Placeholder used when a path carries no level segment.
pub const UNKNOWN_LEVEL: &str = "unknown-level";
/// Placeholder used when a path carries no `topics/<topic>` segment.
pub const UNKNOWN_TOPIC: &str = "unknown-topic";

/// The implicit (domain, group, level, topic) coordinate shared by a pack.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackCoordinate {
    /// Normalized domain slug.
    pub domain: String,
    /// School group (`groep-N`), when the path names one.
    pub group: Option<u8>,
    /// Level tag.
    pub level: String,
    /// Topic slug.
    pub topic: String,
}

impl PackCoordinate {
    /// Coordinate with every segment set to its placeholder.
    pub fn unknown() -> Self {
        Self {
            domain: UNKNOWN_DOMAIN.to_string(),
            group: None,
            level: UNKNOWN_LEVEL.to_string(),
            topic: UNKNOWN_TOPIC.to_string(),
        }
    }

    /// Label for the group segment, `groep-?` when unknown.
    pub fn group_label(&self) -> String {
        match self.group {
            Some(group) => format!("groep-{group}"),
            None => "groep-?".to_string(),
        }
    }

    /// Returns whether every segment was recovered from the path.
    pub fn is_complete(&self) -> bool {
        self.domain != UNKNOWN_DOMAIN
            && self.group.is_some()
            && self.level != UNKNOWN_LEVEL
            && self.topic != UNKNOWN_TOPIC
    }
}

impl fmt::Display for PackCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.domain,
            self.group_label(),
            self.level,
            self.topic
        )
    }
}
