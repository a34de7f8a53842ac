use std::path::PathBuf;

use clap::Args;
use oefen_core::OefenError;
use oefen_curate::patch_file;

#[derive(Args, Debug)]
pub struct PatchArgs {
    /// Pack to patch.
    #[arg(long)]
    pub pack: PathBuf,
    /// Patch set (JSON or YAML).
    #[arg(long)]
    pub patches: PathBuf,
    /// Destination; the pack is rewritten in place when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &PatchArgs) -> Result<bool, OefenError> {
    let report = patch_file(&args.pack, &args.patches, args.out.as_deref())?;
    for outcome in &report.outcomes {
        let id = outcome.item_id.as_deref().unwrap_or("-");
        println!(
            "patch #{} item #{} (id={id}) {}: {}",
            outcome.patch, outcome.item_index, outcome.op, outcome.status
        );
    }
    println!(
        "patch: {} applied, {} unchanged",
        report.applied(),
        report.unchanged()
    );
    Ok(true)
}
