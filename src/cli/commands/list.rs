use anyhow::Result;
use clap::Args;

use crate::cli::output;
use crate::core::store::FixStore;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,
}

pub async fn execute(store: &FixStore, args: &ListArgs) -> Result<()> {
    let fixes = store.list_all()?;

    if args.format == "json" {
        let records: Vec<_> = fixes.iter().map(|f| &f.record).collect();
        output::print_json(&records);
        return Ok(());
    }

    for loaded in &fixes {
        output::print_fix_line(&loaded.record);
    }
    Ok(())
}
