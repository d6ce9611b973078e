mod cli;
mod core;

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use cli::{Cli, Commands};
use crate::core::error::FixError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let store = cli.store();

    let result = match &cli.command {
        Commands::Diagnose(args) => cli::commands::diagnose::execute(&store, args).await,
        Commands::List(args) => cli::commands::list::execute(&store, args).await,
        Commands::Search(args) => cli::commands::search::execute(&store, args).await,
        Commands::Show(args) => cli::commands::show::execute(&store, args).await,
        Commands::Add(args) => cli::commands::add::execute(&store, args).await,
        Commands::Update(args) => cli::commands::update::execute(&store, args).await,
        Commands::Remove(args) => cli::commands::remove::execute(&store, args).await,
        Commands::Stats(args) => cli::commands::stats::execute(&store, args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            exit_code_for(&err)
        }
    }
}

// Validation problems and add-time conflicts get their own exit status so
// scripted callers can tell them apart from not-found/no-match.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<FixError>() {
        Some(FixError::Schema(_)) | Some(FixError::AlreadyExists(_)) => ExitCode::from(2),
        _ => ExitCode::from(1),
    }
}
