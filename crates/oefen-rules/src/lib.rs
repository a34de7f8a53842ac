#![deny(missing_docs)]
#![doc = "Content rule engine: per-item validation against the topic, task-form and misconception canons."]

/// Canon-backed rules (topic, level, task form, misconceptions).
pub mod canon_rules;
pub mod codes;
/// Pack and item orchestration.
pub mod engine;
/// Field presence and coordinate rules.
pub mod fields;
/// Interaction well-formedness rules.
pub mod interaction;
/// Item accessors.
pub mod item;
/// Validation report.
pub mod report;

pub use engine::{check_item, check_pack, validate_packs};
pub use interaction::check_interaction_shape;
pub use item::{option_text, parse_decimal, ItemView, REQUIRED_FIELDS};
pub use report::ValidationReport;
