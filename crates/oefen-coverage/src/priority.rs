use std::cmp::Reverse;
use std::fmt::Write as _;
use std::path::Path;

use oefen_core::errors::{ErrorInfo, OefenError};
use oefen_core::hash::stable_hash_string;
use oefen_core::serde::{to_canonical_json_bytes, write_report_file};
use oefen_core::{CurriculumDomain, PackCoordinate};
use oefen_walk::{LoadStatus, Pack};
use serde::{Deserialize, Serialize};


/// One scored pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRow {
    /// Total score; higher is more urgent.
    pub score: u32,
    /// Normalized domain.
    pub domain: String,
    /// School group, when the path names one.
    pub group: Option<u8>,
    /// Level tag.
    pub level: String,
    /// Topic slug.
    pub topic: String,
    /// Items in the pack.
    pub items: usize,
    /// Load status.
    pub status: LoadStatus,
    /// Why the pack needs work.
    pub reason: String,
    /// Pack path.
    pub path: String,
}

/// Ranked authoring plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityPlan {
    /// Target item count per pack.
    pub min_target: usize,
    /// Packs scored.
    pub packs_scored: usize,
    /// Packs needing work, before truncation.
    pub packs_needing_work: usize,
    /// Top rows, most urgent first.
    pub rows: Vec<PriorityRow>,
}

fn group_bonus(group: Option<u8>) -> u32 {
    match group {
        Some(4..=6) => 300,
        Some(3) | Some(7) => 150,
        _ => 50,
    }
}

fn level_bonus(level: &str) -> u32 {
    match level {
        "n2" => 120,
        "n3" => 80,
        "n1" => 60,
        _ => 40,
    }
}

fn domain_bonus(domain: &str) -> u32 {
    match CurriculumDomain::from_slug(domain) {
        Some(CurriculumDomain::MeasurementGeometry) => 200,
        Some(CurriculumDomain::Ratios) => 120,
        Some(CurriculumDomain::NumberOperations) => 100,
        _ => 0,
    }
}

/// Scores one pack; `None` when the pack needs no work.
///
/// Need: unreadable, empty or non-array files +1000, an empty array +900,
/// a small pack +600 plus its shortfall. Group, level and domain bonuses
/// are added on top.
pub fn score_pack(
    status: LoadStatus,
    items: usize,
    min_target: usize,
    coordinate: &PackCoordinate,
) -> Option<(u32, String)> {
    let (need, reason): (u32, String) = match status {
        LoadStatus::ParseError => (1000, "parse error".to_string()),
        LoadStatus::NotArray => (1000, "not an array".to_string()),
        LoadStatus::EmptyFile => (1000, "empty file".to_string()),
        LoadStatus::EmptyArray => (900, "empty array".to_string()),
        LoadStatus::Ok if items > 0 && items < min_target => {
            let shortfall = min_target - items;
            (
                600u32.saturating_add(u32::try_from(shortfall).unwrap_or(u32::MAX)),
                format!("{items} of {min_target} items"),
            )
        }
        LoadStatus::Ok => return None,
    };
    let score = need
        .saturating_add(group_bonus(coordinate.group))
        .saturating_add(level_bonus(&coordinate.level))
        .saturating_add(domain_bonus(&coordinate.domain));
    Some((score, reason))
}

/// Scores every pack and keeps the `top` most urgent.
///
/// Ties are broken by domain, group, level and topic.
pub fn priority_plan(packs: impl IntoIterator<Item = Pack>, min_target: usize, top: usize) -> PriorityPlan {
    let mut packs_scored = 0;
    let mut rows = Vec::new();
    for pack in packs {
        packs_scored += 1;
        let items = pack.items().len();
        let Some((score, reason)) = score_pack(pack.status(), items, min_target, &pack.coordinate)
        else {
            continue;
        };
        rows.push(PriorityRow {
            score,
            domain: pack.coordinate.domain.clone(),
            group: pack.coordinate.group,
            level: pack.coordinate.level.clone(),
            topic: pack.coordinate.topic.clone(),
            items,
            status: pack.status(),
            reason,
            path: pack.relative,
        });
    }
    rows.sort_by(|a, b| {
        (Reverse(a.score), &a.domain, a.group, &a.level, &a.topic)
            .cmp(&(Reverse(b.score), &b.domain, b.group, &b.level, &b.topic))
    });
    let packs_needing_work = rows.len();
    rows.truncate(top);
    PriorityPlan {
        min_target,
        packs_scored,
        packs_needing_work,
        rows,
    }
}

impl PriorityPlan {
    /// Canonical JSON bytes with the report hash embedded.
    pub fn to_bytes(&self) -> Result<Vec<u8>, OefenError> {
        let hash = stable_hash_string(self)?;
        to_canonical_json_bytes(&serde_json::json!({
            "report": self,
            "report_hash": hash,
        }))
    }

    /// CSV rendition, one header row then one row per pack.
    pub fn to_csv(&self) -> Result<Vec<u8>, OefenError> {
        let csv_error = |code: &str, err: String| OefenError::Serde(ErrorInfo::new(code, err));
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.rows {
            writer
                .serialize(row)
                .map_err(|err| csv_error("priority.csv_row", err.to_string()))?;
        }
        writer
            .into_inner()
            .map_err(|err| csv_error("priority.csv_flush", err.to_string()))
    }

    /// Markdown table rendition.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_markdown(&mut out);
        out
    }

    fn write_markdown(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "# Authoring priorities")?;
        writeln!(out)?;
        writeln!(
            out,
            "Target per pack: {} | packs scored: {} | needing work: {}",
            self.min_target, self.packs_scored, self.packs_needing_work
        )?;
        writeln!(out)?;
        writeln!(out, "| # | Score | Domain | Group | Level | Topic | Items | Reason |")?;
        writeln!(out, "|---:|---:|---|---|---|---|---:|---|")?;
        for (rank, row) in self.rows.iter().enumerate() {
            let group = row
                .group
                .map_or_else(|| "groep-?".to_string(), |group| format!("groep-{group}"));
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} | {} | {} |",
                rank + 1,
                row.score,
                row.domain,
                group,
                row.level,
                row.topic,
                row.items,
                row.reason
            )?;
        }
        Ok(())
    }
}

/// Writes the plan as JSON, CSV or Markdown, chosen by the file extension.
pub fn write_priority(plan: &PriorityPlan, path: &Path) -> Result<(), OefenError> {
    let bytes = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => plan.to_bytes()?,
        Some("csv") => plan.to_csv()?,
        _ => plan.to_markdown().into_bytes(),
    };
    write_report_file(path, &bytes)
}
