use std::process::ExitCode;

use clap::{Parser, Subcommand};
use oefen_core::OefenError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use commands::{
    coverage::{self, CoverageArgs},
    dup_gate::{self, DupGateArgs},
    patch::{self, PatchArgs},
    priority::{self, PriorityArgs},
    rebalance::{self, RebalanceArgs},
    validate::{self, ValidateArgs},
};

mod commands;
mod context;

#[derive(Parser, Debug)]
#[command(name = "oefen", about = "Exercise corpus validation and curation pipeline")]
struct Cli {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence.
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every pack against the topic, task-form and misconception canons.
    Validate(ValidateArgs),
    /// Detect near-duplicate items within each pack.
    DupGate(DupGateArgs),
    /// Aggregate items per group and kerndoel and report coverage status.
    Coverage(CoverageArgs),
    /// Rebalance the correct-answer positions of an MCQ pack.
    Rebalance(RebalanceArgs),
    /// Rank packs by authoring priority.
    Priority(PriorityArgs),
    /// Apply an authored patch set to a pack.
    Patch(PatchArgs),
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let outcome: Result<bool, OefenError> = match &cli.command {
        Command::Validate(args) => validate::run(args),
        Command::DupGate(args) => dup_gate::run(args),
        Command::Coverage(args) => coverage::run(args),
        Command::Rebalance(args) => rebalance::run(args),
        Command::Priority(args) => priority::run(args),
        Command::Patch(args) => patch::run(args),
    };
    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("oefen: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
