use std::path::PathBuf;

use clap::Args;
use oefen_core::OefenError;
use oefen_curate::{rebalance_file, RebalanceOptions};

#[derive(Args, Debug)]
pub struct RebalanceArgs {
    /// Pack to rebalance.
    pub input: PathBuf,
    /// Destination; the input is rewritten in place when omitted.
    pub output: Option<PathBuf>,
    /// Seed label; defaults to the input path.
    #[arg(long)]
    pub seed: Option<String>,
    /// Number of target positions; defaults to the smallest option count.
    #[arg(long)]
    pub positions: Option<usize>,
}

pub fn run(args: &RebalanceArgs) -> Result<bool, OefenError> {
    let options = RebalanceOptions {
        seed: args.seed.clone(),
        positions: args.positions,
    };
    let summary = rebalance_file(&args.input, args.output.as_deref(), &options)?;
    println!("{summary}");
    Ok(true)
}
