use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::cli::output;
use crate::core::store::FixStore;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Fix YAML file replacing the stored record with the same issue id
    pub fix_file: PathBuf,

    /// Replace without asking for confirmation
    #[arg(long)]
    pub force: bool,
}

pub async fn execute(store: &FixStore, args: &UpdateArgs) -> Result<()> {
    if !args.fix_file.exists() {
        bail!("fix file not found: {}", args.fix_file.display());
    }

    if !args.force {
        let proceed = output::confirm("Replace the stored fix? A backup of the old record is kept.")?;
        if !proceed {
            println!("{}", "Update cancelled.".yellow());
            return Ok(());
        }
    }

    let (fix, backup) = store.update(&args.fix_file)?;

    println!(
        "{} Fix '{}' updated (backup at {}).",
        "✔".green().bold(),
        fix.issue_id.cyan(),
        backup.display()
    );
    Ok(())
}
