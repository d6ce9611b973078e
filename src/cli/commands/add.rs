use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::core::store::FixStore;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Fix YAML file to validate and add
    pub fix_file: PathBuf,
}

pub async fn execute(store: &FixStore, args: &AddArgs) -> Result<()> {
    if !args.fix_file.exists() {
        bail!("fix file not found: {}", args.fix_file.display());
    }

    let fix = store.add(&args.fix_file)?;

    println!(
        "{} Fix '{}' added successfully.",
        "✔".green().bold(),
        fix.issue_id.cyan()
    );
    Ok(())
}
