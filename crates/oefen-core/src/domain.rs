//! Curricular vocabulary: domains, levels and interaction kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Converts a domain label to its canonical kebab form.
///
/// Authoring files and canons use `getal_en_bewerkingen` and
/// `getal-en-bewerkingen` interchangeably; every canon lookup goes through
/// this single rule. Surrounding whitespace is trimmed, nothing else changes.
pub fn normalize_domain(raw: &str) -> String {
    raw.trim().replace('_', "-")
}

/// Known curricular domains, used where behaviour depends on the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurriculumDomain {
    /// Getal en bewerkingen.
    NumberOperations,
    /// Meten en meetkunde.
    MeasurementGeometry,
    /// Verhoudingen.
    Ratios,
    /// Verbanden.
    Data,
}

impl CurriculumDomain {
    /// Resolves a (possibly snake-form) domain slug.
    pub fn from_slug(raw: &str) -> Option<Self> {
        match normalize_domain(raw).as_str() {
            "getal-en-bewerkingen" | "number-and-operations" | "number-operations" => {
                Some(Self::NumberOperations)
            }
            "meten-en-meetkunde" | "measurement-and-geometry" | "measurement-geometry" => {
                Some(Self::MeasurementGeometry)
            }
            "verhoudingen" | "ratios" => Some(Self::Ratios),
            "verbanden" | "data" => Some(Self::Data),
            _ => None,
        }
    }
}

/// Within-grade ability band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Level n1.
    N1,
    /// Level n2.
    N2,
    /// Level n3.
    N3,
    /// Level n4.
    N4,
}

impl Level {
    /// Every level in ascending order.
    pub const ALL: [Level; 4] = [Level::N1, Level::N2, Level::N3, Level::N4];

    /// Parses a level tag such as `n2`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "n1" => Some(Self::N1),
            "n2" => Some(Self::N2),
            "n3" => Some(Self::N3),
            "n4" => Some(Self::N4),
            _ => None,
        }
    }

    /// Tag used in paths and canons.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::N1 => "n1",
            Self::N2 => "n2",
            Self::N3 => "n3",
            Self::N4 => "n4",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interaction kinds an item may declare in `interaction.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Free numeric answer.
    Numeric,
    /// Multiple choice with a single correct option.
    Mcq,
    /// One or more blanks to fill in.
    FillBlanks,
}

impl InteractionKind {
    /// Parses the `interaction.type` tag.
    pub fn from_tag(raw: &str) -> Option<Self> {
        match raw {
            "numeric" => Some(Self::Numeric),
            "mcq" => Some(Self::Mcq),
            "fill_blanks" => Some(Self::FillBlanks),
            _ => None,
        }
    }

    /// Tag as written in pack files.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Mcq => "mcq",
            Self::FillBlanks => "fill_blanks",
        }
    }

    /// Task form assumed when an item carries no explicit `metadata.taskForm`.
    pub fn fallback_task_form(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric_simple",
            Self::Mcq => "select_single",
            Self::FillBlanks => "fill_single_step",
        }
    }
}
