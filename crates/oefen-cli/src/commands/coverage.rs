use std::path::PathBuf;

use clap::Args;
use oefen_canon::{load_group_gate, load_topic_canon};
use oefen_core::OefenError;
use oefen_coverage::{CoverageAggregator, CoverageStatus, DEFAULT_MIN_ITEMS};

use crate::context::{ContentArgs, PipelineContext};

#[derive(Args, Debug)]
pub struct CoverageArgs {
    #[command(flatten)]
    pub content: ContentArgs,
    /// Directory of per-domain topic canon files (a single file also works).
    #[arg(long, alias = "topic-canon")]
    pub topic_canon_dir: PathBuf,
    /// Group gate listing the kerndoelen permitted per group.
    #[arg(long)]
    pub group_gate: PathBuf,
    /// Minimum items per (group, kerndoel) for OK.
    #[arg(long, default_value_t = DEFAULT_MIN_ITEMS)]
    pub min_per_kerndoel: usize,
    /// JSON report path.
    #[arg(long)]
    pub out_json: PathBuf,
    /// Markdown report path.
    #[arg(long)]
    pub out_md: PathBuf,
}

pub fn run(args: &CoverageArgs) -> Result<bool, OefenError> {
    let topics = load_topic_canon(&args.topic_canon_dir)?;
    let gate = load_group_gate(&args.group_gate)?;
    let ctx = PipelineContext::new((topics, gate), &args.content);
    let (topics, gate) = &ctx.canons;

    let mut aggregator = CoverageAggregator::new(topics);
    for pack in ctx.packs()? {
        aggregator.add_pack(&pack);
    }
    let report = aggregator.finish(gate, args.min_per_kerndoel);
    report.write(&args.out_json, &args.out_md)?;

    println!(
        "coverage: {} packs, {} items, OK {}, LOW {}, NONE {}, outside gate {}, missing in canon {}",
        report.packs_seen,
        report.items_seen,
        report.count_status(CoverageStatus::Ok),
        report.count_status(CoverageStatus::Low),
        report.count_status(CoverageStatus::None),
        report.outside_gate.len(),
        report.missing_in_canon
    );
    Ok(true)
}
