use serde::Serialize;
use std::collections::HashMap;
use std::fs;

use crate::core::error::FixError;
use crate::core::schema;
use crate::core::store::FixStore;

/// A stored file that failed strict validation, reported by name.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidFix {
    pub file: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub total: usize,
    pub invalid: usize,
    pub invalid_files: Vec<InvalidFix>,
    pub by_category: Vec<(String, usize)>,
    pub by_severity: Vec<(String, usize)>,
}

/// Full strict rescan of the store. Unlike `list_all`, every file must pass
/// complete schema validation; failures are tallied as invalid and excluded
/// from the histograms.
pub fn compute_stats(store: &FixStore) -> Result<StatsReport, FixError> {
    let mut total = 0;
    let mut invalid_files = Vec::new();
    let mut categories: HashMap<String, usize> = HashMap::new();
    let mut severities: HashMap<String, usize> = HashMap::new();

    for path in store.fix_files()? {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let fix = fs::read_to_string(&path)
            .map_err(FixError::from)
            .and_then(|content| {
                serde_yaml::from_str::<serde_yaml::Value>(&content).map_err(|source| {
                    FixError::Parse {
                        path: path.clone(),
                        source,
                    }
                })
            })
            .and_then(|value| schema::validate(&value).map_err(FixError::from));

        match fix {
            Ok(fix) => {
                total += 1;
                let category = if fix.category.is_empty() {
                    "unknown".to_string()
                } else {
                    fix.category
                };
                *categories.entry(category).or_insert(0) += 1;
                *severities.entry(fix.severity.to_string()).or_insert(0) += 1;
            }
            Err(e) => {
                invalid_files.push(InvalidFix {
                    file,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(StatsReport {
        total,
        invalid: invalid_files.len(),
        invalid_files,
        by_category: sorted_histogram(categories),
        by_severity: sorted_histogram(severities),
    })
}

// Descending by count, ties broken alphabetically so output is stable.
fn sorted_histogram(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<_> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}
