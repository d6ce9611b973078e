use colored::*;
use std::io::{self, BufRead, Write};

use crate::core::engine::PatternDiagnostic;
use crate::core::fix::FixRecord;
use crate::core::stats::StatsReport;

/// Compact one-line rendering used by `list` and `search`.
pub fn print_fix_line(record: &FixRecord) {
    println!(
        "- {} [{}] {}",
        record.issue_id.as_deref().unwrap_or("?").cyan().bold(),
        record.category.as_deref().unwrap_or("n/a"),
        record.title.as_deref().unwrap_or(""),
    );
}

/// The diagnosis result block: identification plus suggested steps.
pub fn print_diagnosis(record: &FixRecord) {
    println!();
    println!("{}", "Issue detected!".green().bold());
    println!("  Issue ID    : {}", record.issue_id.as_deref().unwrap_or("?").cyan());
    println!("  Title       : {}", record.title.as_deref().unwrap_or("n/a"));
    println!("  Category    : {}", record.category.as_deref().unwrap_or("unknown"));
    println!("  Severity    : {}", severity_colored(record.severity.as_deref()));

    println!();
    println!("{}", "Suggested fix:".bold());
    for step in steps(record) {
        println!("  $ {}", step);
    }
}

/// Full record rendering used by `show`.
pub fn print_fix_detail(record: &FixRecord) {
    println!();
    println!(
        "{} {}",
        record.issue_id.as_deref().unwrap_or("?").cyan().bold(),
        record.title.as_deref().unwrap_or("").bold()
    );
    println!("{}", "─".repeat(64));
    println!("  Category    : {} / {}",
        record.category.as_deref().unwrap_or("unknown"),
        record.subcategory.as_deref().unwrap_or("unknown")
    );
    println!("  Severity    : {}", severity_colored(record.severity.as_deref()));
    println!("  Confidence  : {}", record.confidence.as_deref().unwrap_or("unknown"));

    if let Some(scope) = &record.scope {
        let entries: Vec<String> = scope.iter().map(|(k, v)| format!("{k}={v}")).collect();
        println!("  Scope       : {}", entries.join(", "));
    }
    if let Some(sig) = &record.error_signature {
        println!(
            "  Signature   : {} `{}`",
            sig.kind.as_deref().unwrap_or("regex"),
            sig.pattern.as_deref().unwrap_or("")
        );
    }

    if let Some(description) = &record.description {
        println!();
        println!("  {}", description);
    }

    if let Some(root_cause) = &record.root_cause {
        println!();
        println!("{}", "  Root cause".bold());
        if let Some(summary) = &root_cause.summary {
            println!("    {}", summary);
        }
        if let Some(details) = &root_cause.details {
            println!("    {}", details.dimmed());
        }
    }

    if let Some(resolution) = &record.resolution {
        println!();
        println!(
            "{} ({}, {} risk)",
            "  Resolution".bold(),
            resolution.strategy.as_deref().unwrap_or("manual"),
            resolution.risk_level.as_deref().unwrap_or("unknown")
        );
        for step in resolution.steps.iter().flatten() {
            println!("    $ {}", step);
        }
    }

    if let Some(verification) = &record.verification {
        println!();
        println!("{}", "  Verify".bold());
        for criterion in verification.success_criteria.iter().flatten() {
            println!("    - {}", criterion);
        }
    }
    println!();
}

pub fn print_pattern_warnings(diagnostics: &[PatternDiagnostic]) {
    for d in diagnostics {
        eprintln!(
            "{} invalid regex in {}: {}",
            "warning:".yellow().bold(),
            d.issue_id.cyan(),
            d.error
        );
    }
}

pub fn print_stats(report: &StatsReport) {
    println!();
    println!("{}", "logdoctor fix statistics".cyan().bold());
    println!("{}", "─".repeat(35));

    if report.invalid > 0 {
        print!(
            "{} {}",
            "Total fixes :".bold(),
            report.total.to_string().green()
        );
        println!(
            " | {} {}",
            "Invalid fixes :".bold(),
            report.invalid.to_string().red()
        );
    } else {
        println!(
            "{} {}",
            "Total fixes :".bold(),
            report.total.to_string().green()
        );
    }

    for invalid in &report.invalid_files {
        println!("  {} {} - {}", "invalid".red(), invalid.file, invalid.error);
    }

    print_histogram("By Category", &report.by_category);
    print_histogram("By Severity", &report.by_severity);
    println!();
}

fn print_histogram(title: &str, entries: &[(String, usize)]) {
    println!();
    println!("  {}", title.magenta().bold());
    println!("  {:<18} {}", "Name".bold(), "Count".bold());
    println!("  {}", "─".repeat(26));
    for (name, count) in entries {
        println!("  {:<18} {}", name.cyan(), count.to_string().green());
    }
}

fn severity_colored(severity: Option<&str>) -> ColoredString {
    match severity {
        Some("critical") => "critical".red().bold(),
        Some("error") => "error".red(),
        Some("warning") => "warning".yellow(),
        Some("info") => "info".blue(),
        Some(other) => other.normal(),
        None => "unknown".dimmed(),
    }
}

fn steps(record: &FixRecord) -> Vec<&str> {
    record
        .resolution
        .as_ref()
        .and_then(|r| r.steps.as_ref())
        .map(|steps| steps.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Interactive y/N confirmation, defaulting to no.
pub fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// JSON rendering shared by the `--format json` branches.
pub fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("{} failed to encode json: {e}", "error:".red().bold()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fix::ResolutionRecord;

    #[test]
    fn test_steps_extraction() {
        let record = FixRecord {
            resolution: Some(ResolutionRecord {
                strategy: None,
                risk_level: None,
                steps: Some(vec!["a".to_string(), "b".to_string()]),
            }),
            ..FixRecord::default()
        };
        assert_eq!(steps(&record), vec!["a", "b"]);
        assert!(steps(&FixRecord::default()).is_empty());
    }
}
