pub mod commands;
pub mod output;
pub mod progress;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::core::config::Config;
use crate::core::store::FixStore;

#[derive(Parser, Debug)]
#[command(
    name = "logdoctor",
    version,
    about = "Diagnose error logs against a repository of known fixes"
)]
pub struct Cli {
    /// Directory containing fix records (overrides .logdoctor.yml)
    #[arg(long, global = true)]
    pub fix_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Diagnose an error log and suggest a fix
    Diagnose(commands::diagnose::DiagnoseArgs),
    /// List all fixes in the repository
    List(commands::list::ListArgs),
    /// Search fixes by keyword
    Search(commands::search::SearchArgs),
    /// Show a single fix in full
    Show(commands::show::ShowArgs),
    /// Validate a fix file and add it to the repository
    Add(commands::add::AddArgs),
    /// Replace an existing fix, keeping a backup of the old record
    Update(commands::update::UpdateArgs),
    /// Delete a fix from the repository
    Remove(commands::remove::RemoveArgs),
    /// Show repository statistics
    Stats(commands::stats::StatsArgs),
}

impl Cli {
    /// Resolve the fix store: `--fix-dir` wins, then `.logdoctor.yml` in
    /// the working directory, then the default `fixes/` directory.
    pub fn store(&self) -> FixStore {
        match &self.fix_dir {
            Some(dir) => FixStore::new(dir.clone()),
            None => FixStore::new(Config::load(Path::new(".")).fix_dir()),
        }
    }
}
