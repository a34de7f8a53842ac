#![deny(missing_docs)]
#![doc = "Coverage aggregation: items attributed to kerndoelen per group, status against a minimum, and an authoring priority plan."]

pub mod aggregate;
/// Authoring priority scoring.
pub mod priority;
/// Coverage report types and renderers.
pub mod report;

pub use aggregate::CoverageAggregator;
pub use priority::{priority_plan, score_pack, write_priority, PriorityPlan, PriorityRow};
pub use report::{
    render_markdown, CoverageReport, CoverageRow, CoverageStatus, DomainRow, GroupDomainRow,
    KerndoelTrace, OutsideGateRow, TraceEntry,
};

/// Default minimum item count per (group, kerndoel) and per pack.
pub const DEFAULT_MIN_ITEMS: usize = 30;
