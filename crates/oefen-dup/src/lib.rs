#![deny(missing_docs)]
#![doc = "Duplicate gate: prompt, numeric-core, MCQ-signature and context-word similarity per pack."]

/// Prompt fingerprints.
pub mod extract;
/// Per-pack analysis and the corpus-wide gate.
pub mod gate;
pub mod policy;
/// Findings and the gate report.
pub mod report;

pub use extract::{context_tokens, numeric_core, STOPWORDS};
pub use gate::{analyze_pack, apply_baseline, run_gate};
pub use policy::{load_policy, DupPolicy};
pub use report::{DupFinding, DupKind, DupReport};
