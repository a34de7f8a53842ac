use std::collections::BTreeMap;

use oefen_canon::{BaselineEntry, DuplicateBaseline};
use oefen_core::{InteractionKind, Severity};
use oefen_rules::{option_text, ItemView};
use oefen_walk::Pack;
use serde_json::Value;

use crate::extract::{context_tokens, numeric_core};
use crate::policy::DupPolicy;
use crate::report::{DupFinding, DupKind, DupReport};

/// Groups item indices by key; only keys shared by two or more items are
/// kept, ordered by the first item that carries them.
fn collisions<K: Ord>(keys: impl IntoIterator<Item = (K, usize)>) -> Vec<(K, Vec<usize>)> {
    let mut groups: BTreeMap<K, Vec<usize>> = BTreeMap::new();
    for (key, index) in keys {
        groups.entry(key).or_default().push(index);
    }
    let mut shared: Vec<(K, Vec<usize>)> = groups
        .into_iter()
        .filter(|(_, indices)| indices.len() > 1)
        .collect();
    shared.sort_by_key(|(_, indices)| indices[0]);
    shared
}

fn quoted(values: &[String]) -> String {
    values
        .iter()
        .map(|value| format!("'{value}'"))
        .collect::<Vec<_>>()
        .join(",")
}

fn prompts(items: &[Value]) -> Vec<(usize, &str)> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| Some((index, ItemView::new(item)?.str_field("prompt")?)))
        .collect()
}

fn mcq_signature(item: &Value) -> Option<(Vec<String>, i64)> {
    let view = ItemView::new(item)?;
    if view.interaction_kind() != Some(InteractionKind::Mcq) {
        return None;
    }
    let texts = view
        .options()?
        .as_array()?
        .iter()
        .map(|option| option_text(option).map(str::to_string))
        .collect::<Option<Vec<_>>>()?;
    let index = view.solution()?.get("index")?.as_i64()?;
    Some((texts, index))
}

fn finding(kind: DupKind, severity: Severity, path: &str, message: String, items: Vec<usize>) -> DupFinding {
    DupFinding {
        kind,
        severity,
        path: path.to_string(),
        message,
        item_indices: items,
        suppressed: false,
    }
}

/// Every similarity finding of one pack, unsuppressed.
///
/// Findings are ordered by notion (prompt, numeric core, MCQ signature,
/// context word) and within a notion by first item. Notions are not
/// deduplicated against each other.
pub fn analyze_pack(pack: &Pack, policy: &DupPolicy) -> Vec<DupFinding> {
    let items = pack.items();
    let path = pack.relative.as_str();
    let prompts = prompts(items);
    let mut findings = Vec::new();

    for (prompt, indices) in collisions(prompts.iter().map(|(index, prompt)| (prompt.trim(), *index))) {
        findings.push(finding(
            DupKind::PromptExact,
            policy.prompt_exact,
            path,
            format!("Duplicate prompt occurs {}x: \"{prompt}\"", indices.len()),
            indices,
        ));
    }

    let cores = prompts
        .iter()
        .map(|(index, prompt)| (numeric_core(prompt), *index))
        .filter(|(core, _)| !core.is_empty());
    for (core, indices) in collisions(cores) {
        findings.push(finding(
            DupKind::NumericCore,
            policy.numeric_core,
            path,
            format!("Duplicate numeric core ({}) occurs {}x", quoted(&core), indices.len()),
            indices,
        ));
    }

    let signatures = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| mcq_signature(item).map(|signature| (signature, index)));
    for ((texts, correct), indices) in collisions(signatures) {
        findings.push(finding(
            DupKind::McqSignature,
            policy.mcq_signature,
            path,
            format!(
                "Duplicate MCQ signature (options [{}], index {correct}) occurs {}x",
                quoted(&texts),
                indices.len()
            ),
            indices,
        ));
    }

    if prompts.len() >= policy.context_min_prompts && !prompts.is_empty() {
        let mut carriers: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (index, prompt) in &prompts {
            for token in context_tokens(prompt) {
                carriers.entry(token).or_default().push(*index);
            }
        }
        let total = prompts.len();
        for (token, indices) in carriers {
            let share = indices.len() as f64 / total as f64;
            if share > policy.max_context_ratio {
                findings.push(finding(
                    DupKind::ContextDominance,
                    policy.context_dominance,
                    path,
                    format!(
                        "Context word '{token}' appears in {} of {total} prompts ({:.0}% > {:.0}%)",
                        indices.len(),
                        share * 100.0,
                        policy.max_context_ratio * 100.0
                    ),
                    indices,
                ));
            }
        }
    }
    findings
}

/// Marks findings silenced by the pack's baseline entry.
pub fn apply_baseline(findings: &mut [DupFinding], entry: BaselineEntry) {
    for finding in findings {
        finding.suppressed = match finding.kind {
            DupKind::PromptExact => entry.allow_prompt_duplicates,
            DupKind::NumericCore => entry.allow_numeric_duplicates,
            DupKind::McqSignature => entry.allow_mcq_duplicates,
            DupKind::ContextDominance => entry.allow_context_dominance,
        };
    }
}

/// Runs the gate over a stream of packs.
pub fn run_gate(
    packs: impl IntoIterator<Item = Pack>,
    baseline: &DuplicateBaseline,
    policy: &DupPolicy,
) -> DupReport {
    let mut packs_checked = 0;
    let mut findings = Vec::new();
    for pack in packs {
        packs_checked += 1;
        let mut pack_findings = analyze_pack(&pack, policy);
        if pack_findings.is_empty() {
            continue;
        }
        apply_baseline(&mut pack_findings, baseline.entry_for(&pack.relative));
        tracing::debug!(
            pack = %pack.relative,
            findings = pack_findings.len(),
            "duplicate findings"
        );
        findings.extend(pack_findings);
    }
    DupReport::new(packs_checked, findings)
}
