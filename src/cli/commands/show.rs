use anyhow::Result;
use clap::Args;

use crate::cli::output;
use crate::core::error::FixError;
use crate::core::store::FixStore;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Issue id of the fix to display
    pub issue_id: String,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,
}

pub async fn execute(store: &FixStore, args: &ShowArgs) -> Result<()> {
    let record = store
        .get(&args.issue_id)?
        .ok_or_else(|| FixError::NotFound(args.issue_id.clone()))?;

    if args.format == "json" {
        output::print_json(&record);
    } else {
        output::print_fix_detail(&record);
    }
    Ok(())
}
