use std::path::PathBuf;

use clap::Args;
use oefen_canon::{CanonPaths, Canons};
use oefen_core::serde::write_report_file;
use oefen_core::OefenError;
use oefen_rules::validate_packs;

use crate::context::{ContentArgs, PipelineContext};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Topic canon file or directory of per-domain files.
    #[arg(long, alias = "topic-canon-dir")]
    pub topic_canon: PathBuf,
    /// Task-form canon file.
    #[arg(long)]
    pub taskforms: PathBuf,
    #[command(flatten)]
    pub content: ContentArgs,
    /// Shared root holding `misconcepts/` and `feedback/`.
    #[arg(long)]
    pub shared_root: PathBuf,
    /// Also write the full issue list as a JSON report.
    #[arg(long)]
    pub out_json: Option<PathBuf>,
}

pub fn run(args: &ValidateArgs) -> Result<bool, OefenError> {
    let canons = Canons::load(&CanonPaths {
        topic_canon: args.topic_canon.clone(),
        task_forms: args.taskforms.clone(),
        shared_root: args.shared_root.clone(),
    })?;
    let ctx = PipelineContext::new(canons, &args.content);
    let report = validate_packs(ctx.packs()?, &ctx.canons);

    for (path, issues) in report.by_pack() {
        println!("{path}");
        for issue in issues {
            println!("  {issue}");
        }
    }
    if let Some(out) = &args.out_json {
        write_report_file(out, &report.to_bytes()?)?;
    }
    println!(
        "validate: {} packs, {} items, {} errors, {} warnings: {}",
        report.packs_checked,
        report.items_checked,
        report.errors,
        report.warnings,
        if report.passed() { "PASS" } else { "FAIL" }
    );
    Ok(report.passed())
}
