//! Attribution of pack item counts to kerndoelen.
//!
//! Every pack is looked up in the topic canon by its walker coordinate; its
//! item count is added once per kerndoel the topic lists. Packs whose topic
//! is unknown, or whose path carries no group, are counted as missing.

use std::collections::BTreeMap;

use oefen_canon::{GroupGate, TopicCanon};
use oefen_rules::ItemView;
use oefen_walk::Pack;

use crate::report::{
    CoverageReport, CoverageRow, CoverageStatus, DomainRow, GroupDomainRow, KerndoelTrace,
    OutsideGateRow, TraceEntry,
};

/// Streaming coverage accumulator; holds counters and traces, never items.
#[derive(Debug)]
pub struct CoverageAggregator<'a> {
    topics: &'a TopicCanon,
    by_group: BTreeMap<(u8, u32), usize>,
    by_group_domain: BTreeMap<(u8, String, u32), usize>,
    by_domain: BTreeMap<(String, u32), usize>,
    traces: BTreeMap<u32, Vec<TraceEntry>>,
    missing_packs: Vec<String>,
    packs_seen: usize,
    items_seen: usize,
}

impl<'a> CoverageAggregator<'a> {
    /// Creates an empty aggregator over a topic canon.
    pub fn new(topics: &'a TopicCanon) -> Self {
        Self {
            topics,
            by_group: BTreeMap::new(),
            by_group_domain: BTreeMap::new(),
            by_domain: BTreeMap::new(),
            traces: BTreeMap::new(),
            missing_packs: Vec::new(),
            packs_seen: 0,
            items_seen: 0,
        }
    }

    /// Attributes one pack.
    pub fn add_pack(&mut self, pack: &Pack) {
        self.packs_seen += 1;
        let items = pack.items();
        self.items_seen += items.len();
        let coordinate = &pack.coordinate;
        let topics = self.topics;
        let entry = coordinate.group.and_then(|group| {
            topics
                .lookup(&coordinate.domain, group, &coordinate.topic)
                .map(|entry| (group, entry))
        });
        let Some((group, entry)) = entry else {
            tracing::debug!(pack = %pack.relative, "topic missing from canon");
            self.missing_packs.push(pack.relative.clone());
            return;
        };

        let count = items.len();
        let mut interactions = BTreeMap::new();
        for item in items {
            let tag = ItemView::new(item)
                .and_then(|view| view.interaction_tag())
                .unwrap_or("unknown");
            *interactions.entry(tag.to_string()).or_insert(0) += 1;
        }
        for kerndoel in &entry.kerndoelen {
            let kerndoel = *kerndoel;
            *self.by_group.entry((group, kerndoel)).or_insert(0) += count;
            *self
                .by_group_domain
                .entry((group, coordinate.domain.clone(), kerndoel))
                .or_insert(0) += count;
            *self
                .by_domain
                .entry((coordinate.domain.clone(), kerndoel))
                .or_insert(0) += count;
            self.traces.entry(kerndoel).or_default().push(TraceEntry {
                topic: coordinate.topic.clone(),
                domain: coordinate.domain.clone(),
                group,
                level: coordinate.level.clone(),
                count,
                path: pack.relative.clone(),
                interactions: interactions.clone(),
            });
        }
    }

    /// Evaluates the counts against the group gate and a minimum.
    ///
    /// Only gate-permitted kerndoelen get a status; counted kerndoelen the
    /// gate does not permit are listed as outside the gate.
    pub fn finish(self, gate: &GroupGate, min_per_kerndoel: usize) -> CoverageReport {
        let mut rows = Vec::new();
        for (group, permitted) in gate.groups() {
            for kerndoel in permitted {
                let count = self.by_group.get(&(group, *kerndoel)).copied().unwrap_or(0);
                rows.push(CoverageRow {
                    group,
                    kerndoel: *kerndoel,
                    count,
                    status: CoverageStatus::classify(count, min_per_kerndoel),
                });
            }
        }
        rows.sort_by_key(|row| (row.group, row.kerndoel));
        let outside_gate = self
            .by_group
            .iter()
            .filter(|((group, kerndoel), _)| !gate.permits(*group, *kerndoel))
            .map(|((group, kerndoel), count)| OutsideGateRow {
                group: *group,
                kerndoel: *kerndoel,
                count: *count,
            })
            .collect();
        let report = CoverageReport {
            min_per_kerndoel,
            packs_seen: self.packs_seen,
            items_seen: self.items_seen,
            rows,
            outside_gate,
            by_group_domain: self
                .by_group_domain
                .into_iter()
                .map(|((group, domain, kerndoel), count)| GroupDomainRow {
                    group,
                    domain,
                    kerndoel,
                    count,
                })
                .collect(),
            by_domain: self
                .by_domain
                .into_iter()
                .map(|((domain, kerndoel), count)| DomainRow {
                    domain,
                    kerndoel,
                    count,
                })
                .collect(),
            traces: self
                .traces
                .into_iter()
                .map(|(kerndoel, contributions)| KerndoelTrace {
                    kerndoel,
                    contributions,
                })
                .collect(),
            missing_in_canon: self.missing_packs.len(),
            missing_packs: self.missing_packs,
        };
        tracing::info!(
            rows = report.rows.len(),
            low = report.count_status(CoverageStatus::Low),
            none = report.count_status(CoverageStatus::None),
            "coverage evaluated"
        );
        report
    }
}
