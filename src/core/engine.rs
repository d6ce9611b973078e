use regex::RegexBuilder;

use crate::core::error::FixError;
use crate::core::fix::FixRecord;
use crate::core::store::FixStore;

/// A stored pattern that failed to compile during a scan. Reported to the
/// caller and skipped; never aborts the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDiagnostic {
    pub issue_id: String,
    pub error: String,
}

#[derive(Debug)]
pub struct DiagnosisReport {
    pub matched: Option<FixRecord>,
    pub invalid_patterns: Vec<PatternDiagnostic>,
}

/// Scan the log text against every stored fix, in store enumeration order.
///
/// First-match-wins: the scan stops at the first record whose signature
/// matches, with no ranking or specificity scoring. Records without an
/// `error_signature` are legacy entries and never match. The whole log is
/// one unanchored, case-insensitive search subject.
pub fn diagnose(store: &FixStore, log_text: &str) -> Result<DiagnosisReport, FixError> {
    let mut invalid_patterns = Vec::new();

    for loaded in store.list_all()? {
        let file_name = loaded.file_name();
        let record = loaded.record;
        let Some(signature) = &record.error_signature else {
            continue;
        };
        let Some(pattern) = signature.pattern.as_deref() else {
            continue;
        };

        // Literal signatures are escaped, so they match verbatim and can
        // never fail to compile.
        let pattern = if signature.kind.as_deref() == Some("string") {
            regex::escape(pattern)
        } else {
            pattern.to_string()
        };

        let compiled = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(re) => re,
            Err(e) => {
                invalid_patterns.push(PatternDiagnostic {
                    issue_id: record.issue_id.clone().unwrap_or(file_name),
                    error: e.to_string(),
                });
                continue;
            }
        };

        if compiled.is_match(log_text) {
            return Ok(DiagnosisReport {
                matched: Some(record),
                invalid_patterns,
            });
        }
    }

    Ok(DiagnosisReport {
        matched: None,
        invalid_patterns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store_with(records: &[(&str, &str)]) -> (TempDir, FixStore) {
        let tmp = TempDir::new().unwrap();
        let store = FixStore::new(tmp.path());
        for (issue_id, pattern) in records {
            write_fix(&store, issue_id, pattern, "regex");
        }
        (tmp, store)
    }

    fn write_fix(store: &FixStore, issue_id: &str, pattern: &str, kind: &str) {
        let yaml = format!(
            "\
schema_version: 1.0
issue_id: {issue_id}
title: Fix {issue_id}
category: kernel
subcategory: general
severity: error
confidence: medium
error_signature:
  type: {kind}
  pattern: \"{pattern}\"
description: test
root_cause:
  summary: s
  details: d
resolution:
  strategy: manual
  risk_level: low
  steps:
    - echo fix
verification:
  success_criteria:
    - ok
"
        );
        fs::create_dir_all(store.base_dir()).unwrap();
        fs::write(store.record_path(issue_id), yaml).unwrap();
    }

    #[test]
    fn test_matches_case_insensitively() {
        let (_tmp, store) = store_with(&[("OOM_KILL", "out of memory")]);
        let report = diagnose(&store, "Out Of Memory: process killed").unwrap();
        let matched = report.matched.unwrap();
        assert_eq!(matched.issue_id.as_deref(), Some("OOM_KILL"));
        assert!(report.invalid_patterns.is_empty());
    }

    #[test]
    fn test_no_match_returns_none() {
        let (_tmp, store) = store_with(&[("OOM_KILL", "out of memory")]);
        let report = diagnose(&store, "everything is fine").unwrap();
        assert!(report.matched.is_none());
    }

    #[test]
    fn test_first_match_wins_in_enumeration_order() {
        // Both patterns match; AAA sorts before ZZZ, so AAA must win even
        // though ZZZ's pattern is more specific.
        let (_tmp, store) = store_with(&[
            ("ZZZ_SPECIFIC", "disk error on /dev/sda"),
            ("AAA_BROAD", "disk error"),
        ]);
        let report = diagnose(&store, "disk error on /dev/sda detected").unwrap();
        assert_eq!(report.matched.unwrap().issue_id.as_deref(), Some("AAA_BROAD"));
    }

    #[test]
    fn test_records_without_signature_never_match() {
        let tmp = TempDir::new().unwrap();
        let store = FixStore::new(tmp.path());
        fs::write(
            store.record_path("LEGACY"),
            "issue_id: LEGACY\ntitle: anything\ndescription: matches nothing\n",
        )
        .unwrap();

        let report = diagnose(&store, "anything at all, even LEGACY itself").unwrap();
        assert!(report.matched.is_none());
        assert!(report.invalid_patterns.is_empty());
    }

    #[test]
    fn test_invalid_regex_reported_and_scan_continues() {
        let (_tmp, store) = store_with(&[
            ("AAA_BROKEN", "(unclosed"),
            ("BBB_GOOD", "kernel panic"),
        ]);
        let report = diagnose(&store, "Kernel PANIC - not syncing").unwrap();

        assert_eq!(report.matched.unwrap().issue_id.as_deref(), Some("BBB_GOOD"));
        assert_eq!(report.invalid_patterns.len(), 1);
        assert_eq!(report.invalid_patterns[0].issue_id, "AAA_BROKEN");
        assert!(!report.invalid_patterns[0].error.is_empty());
    }

    #[test]
    fn test_literal_kind_matches_metacharacters_verbatim() {
        let tmp = TempDir::new().unwrap();
        let store = FixStore::new(tmp.path());
        write_fix(&store, "LITERAL_DOTS", "error (code 1.5)", "string");

        // As a regex this would also match "error (code 1x5)"; literal must not.
        let report = diagnose(&store, "got error (code 1x5)").unwrap();
        assert!(report.matched.is_none());

        let report = diagnose(&store, "got ERROR (CODE 1.5)").unwrap();
        assert_eq!(
            report.matched.unwrap().issue_id.as_deref(),
            Some("LITERAL_DOTS")
        );
    }

    #[test]
    fn test_unanchored_search_over_whole_log() {
        let (_tmp, store) = store_with(&[("MID_LOG", "segfault at")]);
        let log = "line one\nline two\nprocess crashed: segfault at 0x0\nline four\n";
        assert!(diagnose(&store, log).unwrap().matched.is_some());
    }
}
