//! Keyed answer-position rebalancing of MCQ packs.
//!
//! The desired positions form a multiset fixed by the MCQ item count: with `K`
//! positions every position gets `N / K` slots and the lowest `N % K`
//! positions one more. Only the order in which items draw from that multiset
//! is random, and the shuffle is keyed by a seed label so a re-run with the
//! same label rewrites the pack byte for byte.

use std::fmt;
use std::path::Path;

use oefen_core::errors::{ErrorInfo, OefenError};
use oefen_core::{InteractionKind, RngHandle};
use oefen_rules::ItemView;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::io::{read_pack_file, write_pack_file};
use crate::{options_mut, set_solution_index};

/// Caller supplied rebalance settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceOptions {
    /// Seed label; the input path is used when absent.
    pub seed: Option<String>,
    /// Number of positions; the smallest MCQ option count when absent.
    pub positions: Option<usize>,
}

/// Outcome of rebalancing one pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceSummary {
    /// MCQ items taking part.
    pub mcq_items: usize,
    /// Number of target positions.
    pub positions: usize,
    /// Seed derived from the label.
    pub seed: u64,
    /// Correct-position histogram before the run.
    pub before: Vec<usize>,
    /// Correct-position histogram after the run.
    pub after: Vec<usize>,
    /// Items whose correct option moved.
    pub swaps: usize,
}

impl fmt::Display for RebalanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "mcq items: {}, positions: {}, swaps: {}",
            self.mcq_items, self.positions, self.swaps
        )?;
        writeln!(f, "before: {:?}", self.before)?;
        write!(f, "after:  {:?}", self.after)
    }
}

#[derive(Debug, Clone, Copy)]
struct McqSlot {
    item: usize,
    correct: usize,
    options: usize,
}

fn rebalance_error(code: &str, message: impl Into<String>) -> OefenError {
    OefenError::Rebalance(ErrorInfo::new(code, message))
}

/// Desired positions for `n` items over `k` positions, remainder to the lowest.
pub fn target_positions(n: usize, k: usize) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }
    let (base, rem) = (n / k, n % k);
    (0..k)
        .flat_map(|position| std::iter::repeat(position).take(base + usize::from(position < rem)))
        .collect()
}

/// [`target_positions`] in keyed random order.
pub fn shuffled_targets(n: usize, k: usize, rng: &mut RngHandle) -> Vec<usize> {
    let mut targets = target_positions(n, k);
    rng.shuffle(&mut targets);
    targets
}

fn collect_slots(items: &[Value]) -> Result<Vec<McqSlot>, OefenError> {
    let mut slots = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(view) = ItemView::new(item) else {
            continue;
        };
        if view.interaction_kind() != Some(InteractionKind::Mcq) {
            continue;
        }
        let options = view
            .options()
            .and_then(Value::as_array)
            .map(Vec::len)
            .ok_or_else(|| {
                rebalance_error(
                    "rebalance.options",
                    format!("MCQ item #{index} has no options list"),
                )
            })?;
        let correct = view
            .solution()
            .and_then(|solution| solution.get("index"))
            .and_then(Value::as_u64)
            .and_then(|correct| usize::try_from(correct).ok())
            .filter(|correct| *correct < options)
            .ok_or_else(|| {
                rebalance_error(
                    "rebalance.correct_index",
                    format!("MCQ item #{index} has no valid solution.index"),
                )
            })?;
        slots.push(McqSlot {
            item: index,
            correct,
            options,
        });
    }
    Ok(slots)
}

fn histogram(positions: impl IntoIterator<Item = usize>, width: usize) -> Vec<usize> {
    let mut counts = vec![0; width];
    for position in positions {
        if position >= counts.len() {
            counts.resize(position + 1, 0);
        }
        counts[position] += 1;
    }
    counts
}

fn sorted_payloads(options: &[Value]) -> Vec<String> {
    let mut payloads: Vec<String> = options.iter().map(Value::to_string).collect();
    payloads.sort();
    payloads
}

/// Rebalances the MCQ items of a pack in place.
///
/// Non-MCQ items are left untouched. Each MCQ item draws its desired position
/// in source order; when it differs from the current one the two option
/// objects are swapped whole, so text, feedback and flags move together.
/// Post-conditions are checked before returning; on violation the items must
/// not be written.
pub fn rebalance_items(
    items: &mut [Value],
    positions: Option<usize>,
    seed_label: &str,
) -> Result<RebalanceSummary, OefenError> {
    let slots = collect_slots(items)?;
    let mut rng = RngHandle::from_label(seed_label);
    let min_options = slots.iter().map(|slot| slot.options).min().unwrap_or(0);
    let k = positions.unwrap_or(min_options);
    if !slots.is_empty() {
        if k < 2 {
            return Err(rebalance_error(
                "rebalance.positions",
                format!("at least 2 positions are needed (found {k})"),
            ));
        }
        if let Some(short) = slots.iter().find(|slot| slot.options < k) {
            return Err(rebalance_error(
                "rebalance.too_few_options",
                format!(
                    "MCQ item #{} has {} options, fewer than the {k} target positions",
                    short.item, short.options
                ),
            ));
        }
    }

    let targets = shuffled_targets(slots.len(), k, &mut rng);
    let before_payloads: Vec<Vec<Value>> = slots
        .iter()
        .map(|slot| {
            ItemView::new(&items[slot.item])
                .and_then(|view| view.options())
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        })
        .collect();

    let mut swaps = 0;
    for (slot, desired) in slots.iter().zip(&targets) {
        let desired = *desired;
        if slot.correct == desired {
            continue;
        }
        let item = &mut items[slot.item];
        let options = options_mut(item).ok_or_else(|| {
            rebalance_error(
                "rebalance.options",
                format!("MCQ item #{} lost its options list", slot.item),
            )
        })?;
        options.swap(slot.correct, desired);
        set_solution_index(item, desired);
        swaps += 1;
    }

    let mut marked = Vec::with_capacity(slots.len());
    for ((slot, desired), before) in slots.iter().zip(&targets).zip(&before_payloads) {
        let view = ItemView::new(&items[slot.item]);
        let after = view
            .and_then(|view| view.options())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        if sorted_payloads(after) != sorted_payloads(before) {
            return Err(rebalance_error(
                "rebalance.invariant",
                format!("MCQ item #{} changed its option payloads", slot.item),
            ));
        }
        let index = view
            .and_then(|view| view.solution())
            .and_then(|solution| solution.get("index"))
            .and_then(Value::as_u64)
            .and_then(|index| usize::try_from(index).ok());
        if index != Some(*desired) || after.get(*desired) != before.get(slot.correct) {
            return Err(rebalance_error(
                "rebalance.invariant",
                format!("MCQ item #{} no longer marks its original answer correct", slot.item),
            ));
        }
        marked.push(*desired);
    }
    let after = histogram(marked, k);
    if after != histogram(target_positions(slots.len(), k), k) {
        return Err(rebalance_error(
            "rebalance.invariant",
            "correct-position distribution does not match the target",
        ));
    }

    let summary = RebalanceSummary {
        mcq_items: slots.len(),
        positions: k,
        seed: rng.seed(),
        before: histogram(slots.iter().map(|slot| slot.correct), k),
        after,
        swaps,
    };
    tracing::info!(
        mcq_items = summary.mcq_items,
        positions = summary.positions,
        swaps = summary.swaps,
        "rebalanced pack"
    );
    Ok(summary)
}

/// Rebalances a pack file, writing to `output` or back to `input`.
pub fn rebalance_file(
    input: &Path,
    output: Option<&Path>,
    options: &RebalanceOptions,
) -> Result<RebalanceSummary, OefenError> {
    let mut items = read_pack_file(input)?;
    let label = options
        .seed
        .clone()
        .unwrap_or_else(|| input.to_string_lossy().replace('\\', "/"));
    let summary = rebalance_items(&mut items, options.positions, &label)?;
    write_pack_file(output.unwrap_or(input), &items)?;
    Ok(summary)
}
