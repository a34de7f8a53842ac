use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use oefen_core::errors::OefenError;
use oefen_core::hash::stable_hash_string;
use oefen_core::serde::{to_canonical_json_bytes, write_report_file};
use serde::{Deserialize, Serialize};


/// Coverage status of one (group, kerndoel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoverageStatus {
    /// At least the minimum.
    Ok,
    /// Some items, fewer than the minimum.
    Low,
    /// No items.
    None,
}

impl CoverageStatus {
    /// Status of `count` against `min`.
    pub fn classify(count: usize, min: usize) -> Self {
        if count == 0 {
            CoverageStatus::None
        } else if count >= min {
            CoverageStatus::Ok
        } else {
            CoverageStatus::Low
        }
    }

    /// Upper-case label.
    pub fn label(self) -> &'static str {
        match self {
            CoverageStatus::Ok => "OK",
            CoverageStatus::Low => "LOW",
            CoverageStatus::None => "NONE",
        }
    }
}

/// Evaluated (group, kerndoel) row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRow {
    /// School group.
    pub group: u8,
    /// Attainment target.
    pub kerndoel: u32,
    /// Items attributed.
    pub count: usize,
    /// Status against the minimum.
    pub status: CoverageStatus,
}

/// Items counted for a kerndoel the group gate does not permit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutsideGateRow {
    /// School group.
    pub group: u8,
    /// Attainment target.
    pub kerndoel: u32,
    /// Items attributed.
    pub count: usize,
}

/// (group, domain, kerndoel) count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDomainRow {
    /// School group.
    pub group: u8,
    /// Normalized domain.
    pub domain: String,
    /// Attainment target.
    pub kerndoel: u32,
    /// Items attributed.
    pub count: usize,
}

/// (domain, kerndoel) count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRow {
    /// Normalized domain.
    pub domain: String,
    /// Attainment target.
    pub kerndoel: u32,
    /// Items attributed.
    pub count: usize,
}

/// One pack's contribution to a kerndoel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Topic slug.
    pub topic: String,
    /// Normalized domain.
    pub domain: String,
    /// School group.
    pub group: u8,
    /// Level tag.
    pub level: String,
    /// Items in the pack.
    pub count: usize,
    /// Pack path.
    pub path: String,
    /// Items per interaction type.
    pub interactions: BTreeMap<String, usize>,
}

/// Drill-down of every contribution to a kerndoel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KerndoelTrace {
    /// Attainment target.
    pub kerndoel: u32,
    /// Contributions in pack order.
    pub contributions: Vec<TraceEntry>,
}

/// Full coverage outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Minimum applied per (group, kerndoel).
    pub min_per_kerndoel: usize,
    /// Packs visited.
    pub packs_seen: usize,
    /// Items visited.
    pub items_seen: usize,
    /// Gate-permitted rows by group then kerndoel.
    pub rows: Vec<CoverageRow>,
    /// Counted rows the gate does not permit.
    pub outside_gate: Vec<OutsideGateRow>,
    /// Counts per (group, domain, kerndoel).
    pub by_group_domain: Vec<GroupDomainRow>,
    /// Counts per (domain, kerndoel).
    pub by_domain: Vec<DomainRow>,
    /// Per-kerndoel contributions.
    pub traces: Vec<KerndoelTrace>,
    /// Packs whose topic is absent from the canon.
    pub missing_in_canon: usize,
    /// Paths of those packs.
    pub missing_packs: Vec<String>,
}

impl CoverageReport {
    /// Row of a (group, kerndoel), if the gate permits it.
    pub fn row(&self, group: u8, kerndoel: u32) -> Option<&CoverageRow> {
        self.rows
            .iter()
            .find(|row| row.group == group && row.kerndoel == kerndoel)
    }

    /// Number of rows with the given status.
    pub fn count_status(&self, status: CoverageStatus) -> usize {
        self.rows.iter().filter(|row| row.status == status).count()
    }

    /// Stable content hash of the report.
    pub fn report_hash(&self) -> Result<String, OefenError> {
        stable_hash_string(self)
    }

    /// Canonical JSON bytes with the report hash embedded.
    pub fn to_bytes(&self) -> Result<Vec<u8>, OefenError> {
        let hash = self.report_hash()?;
        to_canonical_json_bytes(&serde_json::json!({
            "report": self,
            "report_hash": hash,
        }))
    }

    /// Writes the JSON and Markdown renditions.
    pub fn write(&self, json_path: &Path, md_path: &Path) -> Result<(), OefenError> {
        write_report_file(json_path, &self.to_bytes()?)?;
        write_report_file(md_path, render_markdown(self).as_bytes())
    }
}

/// Markdown rendition: a summary, one table per group, and the packs
/// missing from the canon.
pub fn render_markdown(report: &CoverageReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_markdown(report, &mut out);
    out
}

fn write_markdown(report: &CoverageReport, out: &mut String) -> std::fmt::Result {
    writeln!(out, "# Kerndoel coverage")?;
    writeln!(out)?;
    writeln!(
        out,
        "Minimum per kerndoel: {} | packs: {} | items: {}",
        report.min_per_kerndoel, report.packs_seen, report.items_seen
    )?;
    writeln!(
        out,
        "OK: {} | LOW: {} | NONE: {}",
        report.count_status(CoverageStatus::Ok),
        report.count_status(CoverageStatus::Low),
        report.count_status(CoverageStatus::None)
    )?;

    let mut groups: Vec<u8> = report.rows.iter().map(|row| row.group).collect();
    groups.extend(report.outside_gate.iter().map(|row| row.group));
    groups.sort_unstable();
    groups.dedup();
    for group in groups {
        writeln!(out)?;
        writeln!(out, "## Groep {group}")?;
        let rows: Vec<&CoverageRow> = report.rows.iter().filter(|row| row.group == group).collect();
        if !rows.is_empty() {
            writeln!(out)?;
            writeln!(out, "| Kerndoel | Items | Status |")?;
            writeln!(out, "|---:|---:|---|")?;
            for row in rows {
                writeln!(out, "| {} | {} | {} |", row.kerndoel, row.count, row.status.label())?;
            }
        }
        let outside: Vec<&OutsideGateRow> = report
            .outside_gate
            .iter()
            .filter(|row| row.group == group)
            .collect();
        if !outside.is_empty() {
            writeln!(out)?;
            writeln!(out, "Outside the group gate:")?;
            writeln!(out)?;
            for row in outside {
                writeln!(out, "- kerndoel {}: {} items", row.kerndoel, row.count)?;
            }
        }
    }

    if !report.missing_packs.is_empty() {
        writeln!(out)?;
        writeln!(out, "## Missing in canon ({})", report.missing_in_canon)?;
        writeln!(out)?;
        for path in &report.missing_packs {
            writeln!(out, "- `{path}`")?;
        }
    }
    Ok(())
}
