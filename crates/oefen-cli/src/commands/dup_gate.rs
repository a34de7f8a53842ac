use std::path::PathBuf;

use clap::Args;
use oefen_canon::{load_duplicate_baseline, DuplicateBaseline};
use oefen_core::serde::write_report_file;
use oefen_core::OefenError;
use oefen_dup::{load_policy, run_gate, DupPolicy};

use crate::context::{ContentArgs, PipelineContext};

#[derive(Args, Debug)]
pub struct DupGateArgs {
    #[command(flatten)]
    pub content: ContentArgs,
    /// Share of prompts a context word may reach; overrides the policy file.
    #[arg(long)]
    pub max_context_ratio: Option<f64>,
    /// Baseline whitelisting known-acceptable duplication (JSON or YAML).
    #[arg(long)]
    pub baseline: Option<PathBuf>,
    /// YAML severity policy.
    #[arg(long)]
    pub policy: Option<PathBuf>,
    /// Write every finding, suppressed ones included, as a JSON report.
    #[arg(long)]
    pub out_json: Option<PathBuf>,
}

pub fn run(args: &DupGateArgs) -> Result<bool, OefenError> {
    let mut policy = match &args.policy {
        Some(path) => load_policy(path)?,
        None => DupPolicy::default(),
    };
    if let Some(ratio) = args.max_context_ratio {
        policy = policy
            .with_max_context_ratio(ratio)
            .map_err(|info| OefenError::Input(info.with_context("flag", "--max-context-ratio")))?;
    }
    let baseline = match &args.baseline {
        Some(path) => load_duplicate_baseline(path)?,
        None => DuplicateBaseline::default(),
    };
    tracing::info!(entries = baseline.len(), "duplicate baseline loaded");

    let ctx = PipelineContext::new((policy, baseline), &args.content);
    let (policy, baseline) = &ctx.canons;
    let report = run_gate(ctx.packs()?, baseline, policy);

    for finding in report.active() {
        println!("{}", finding.to_issue());
    }
    if let Some(out) = &args.out_json {
        write_report_file(out, &report.to_bytes()?)?;
    }
    println!(
        "dup-gate: {} packs, {} errors, {} warnings, {} suppressed: {}",
        report.packs_checked,
        report.errors,
        report.warnings,
        report.suppressed,
        if report.passed() { "PASS" } else { "FAIL" }
    );
    Ok(report.passed())
}
