use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use crate::cli::output;
use crate::cli::progress::ScanProgress;
use crate::core::engine;
use crate::core::error::FixError;
use crate::core::script::generate_script;
use crate::core::store::FixStore;

#[derive(Args, Debug)]
pub struct DiagnoseArgs {
    /// Log file to diagnose
    pub logfile: PathBuf,

    /// Skip generating the fix shell script
    #[arg(long)]
    pub no_generate: bool,

    /// Directory to write the generated script into
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,
}

pub async fn execute(store: &FixStore, args: &DiagnoseArgs) -> Result<()> {
    let log = fs::read_to_string(&args.logfile)
        .with_context(|| format!("failed to read log file {}", args.logfile.display()))?;

    let progress = ScanProgress::new();
    progress.set_log(&args.logfile.to_string_lossy());
    let report = engine::diagnose(store, &log)?;
    progress.finish();

    output::print_pattern_warnings(&report.invalid_patterns);

    let Some(fix) = report.matched else {
        return Err(FixError::NoMatch.into());
    };

    if args.format == "json" {
        output::print_json(&fix);
    } else {
        output::print_diagnosis(&fix);
    }

    if !args.no_generate {
        let script = generate_script(&fix, &args.output_dir)?;
        println!();
        println!("{}", "Fix script generated:".cyan());
        println!("  {}", script.display());
        println!();
        println!("To apply the fix, run:");
        println!("  source {}", script.display());
    }

    Ok(())
}
