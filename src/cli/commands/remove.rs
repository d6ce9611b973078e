use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cli::output;
use crate::core::store::FixStore;

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Issue id of the fix to delete
    pub issue_id: String,

    /// Delete without asking for confirmation
    #[arg(long)]
    pub force: bool,
}

pub async fn execute(store: &FixStore, args: &RemoveArgs) -> Result<()> {
    if !args.force {
        let prompt = format!("Delete fix '{}'? This cannot be undone.", args.issue_id);
        if !output::confirm(&prompt)? {
            println!("{}", "Removal cancelled.".yellow());
            return Ok(());
        }
    }

    store.remove(&args.issue_id)?;

    println!(
        "{} Fix '{}' removed.",
        "✔".green().bold(),
        args.issue_id.cyan()
    );
    Ok(())
}
