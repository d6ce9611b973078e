use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cli::output;
use crate::core::store::FixStore;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Keyword to look for in issue id, title and root cause summary
    pub keyword: String,
}

pub async fn execute(store: &FixStore, args: &SearchArgs) -> Result<()> {
    let matches = store.search(&args.keyword)?;

    if matches.is_empty() {
        println!("{}", "No matching fixes found".yellow());
        return Ok(());
    }

    for loaded in &matches {
        output::print_fix_line(&loaded.record);
    }
    Ok(())
}
