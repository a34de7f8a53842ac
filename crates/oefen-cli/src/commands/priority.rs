use std::path::PathBuf;

use clap::Args;
use oefen_core::OefenError;
use oefen_coverage::{priority_plan, write_priority, DEFAULT_MIN_ITEMS};

use crate::context::{ContentArgs, PipelineContext};

#[derive(Args, Debug)]
pub struct PriorityArgs {
    #[command(flatten)]
    pub content: ContentArgs,
    /// Target item count per pack.
    #[arg(long, default_value_t = DEFAULT_MIN_ITEMS)]
    pub min_target: usize,
    /// Number of rows to emit.
    #[arg(long, default_value_t = 25)]
    pub top: usize,
    /// Output path; `.json`, `.csv`, anything else is Markdown.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &PriorityArgs) -> Result<bool, OefenError> {
    let ctx = PipelineContext::new((), &args.content);
    let plan = priority_plan(ctx.packs()?, args.min_target, args.top);
    write_priority(&plan, &args.out)?;
    println!(
        "priority: {} packs scored, {} need work, {} written to {}",
        plan.packs_scored,
        plan.packs_needing_work,
        plan.rows.len(),
        args.out.display()
    );
    Ok(true)
}
