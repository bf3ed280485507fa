//! Run one workflow synchronously and print the collected results as JSON.

use std::path::PathBuf;

use cads_workflow::Runner;
use clap::Parser;

/// Execute an FMU workflow and print its results
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// The workflow document to execute, absolute or relative to the root
    workflow: PathBuf,

    /// Working root; autodetected from the current directory when omitted
    #[arg(long)]
    root: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    sensible_env_logger::try_init_timed!()?;

    let args = Args::parse();
    let runner = Runner::new(args.root)?;
    log::info!("working root: {}", runner.root().display());

    let results = runner.run(&args.workflow)?;
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
