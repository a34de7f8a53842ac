#![deny(missing_docs)]
#![doc = "Core types, errors and canonical helpers shared by the exercise corpus pipeline."]

pub mod coordinate;
pub mod domain;
pub mod errors;
/// Canonical hashing helpers.
pub mod hash;
pub mod issue;
pub mod rng;
/// Canonical JSON helpers.
pub mod serde;

pub use coordinate::{PackCoordinate, UNKNOWN_DOMAIN, UNKNOWN_LEVEL, UNKNOWN_TOPIC};
pub use domain::{normalize_domain, CurriculumDomain, InteractionKind, Level};
pub use errors::{ErrorInfo, OefenError};
pub use hash::stable_hash_string;
pub use issue::{sort_issues, tally, Issue, Severity};
pub use rng::{seed_from_label, RngHandle};
