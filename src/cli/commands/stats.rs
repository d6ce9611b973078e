use anyhow::Result;
use clap::Args;

use crate::cli::output;
use crate::core::stats::compute_stats;
use crate::core::store::FixStore;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,
}

pub async fn execute(store: &FixStore, args: &StatsArgs) -> Result<()> {
    let report = compute_stats(store)?;

    if args.format == "json" {
        output::print_json(&report);
    } else {
        output::print_stats(&report);
    }
    Ok(())
}
