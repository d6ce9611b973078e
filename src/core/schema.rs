use serde_yaml::Value;

use crate::core::error::{SchemaError, Violation};
use crate::core::fix::{Confidence, Fix, RiskLevel, Severity, SignatureKind, Strategy};

/// Validate a raw YAML document against the fix schema.
///
/// Collects every violation before failing, so a caller gets the complete
/// report rather than the first broken field. Only a document with zero
/// violations is deserialized into a `Fix`.
pub fn validate(value: &Value) -> Result<Fix, SchemaError> {
    let mut violations = Vec::new();

    if value.as_mapping().is_none() {
        return Err(SchemaError {
            violations: vec![Violation::new("fix", "document must be a mapping")],
        });
    }

    check_version(value, &mut violations);
    check_issue_id(value, &mut violations);

    for field in ["title", "category", "subcategory", "description"] {
        require_string(value, field, &mut violations);
    }

    require_enum(value, "severity", &Severity::ALLOWED, &mut violations);
    require_enum(value, "confidence", &Confidence::ALLOWED, &mut violations);

    check_scope(value, &mut violations);
    check_signature(value, &mut violations);

    match value.get("root_cause") {
        None => violations.push(Violation::new("root_cause", "required field is missing")),
        Some(rc) if rc.as_mapping().is_none() => {
            violations.push(Violation::new("root_cause", "must be a mapping"));
        }
        Some(rc) => {
            require_string(rc, "summary", &mut with_prefix("root_cause", &mut violations));
            require_string(rc, "details", &mut with_prefix("root_cause", &mut violations));
        }
    }

    check_resolution(value, &mut violations);

    match value.get("verification") {
        None => violations.push(Violation::new("verification", "required field is missing")),
        Some(v) if v.as_mapping().is_none() => {
            violations.push(Violation::new("verification", "must be a mapping"));
        }
        Some(v) => {
            require_string_list(
                v,
                "success_criteria",
                &mut with_prefix("verification", &mut violations),
            );
        }
    }

    if !violations.is_empty() {
        return Err(SchemaError { violations });
    }

    serde_yaml::from_value(value.clone()).map_err(|e| SchemaError {
        violations: vec![Violation::new("fix", e.to_string())],
    })
}

/// Collector that prefixes field names with the parent path, so nested
/// violations read as `root_cause.summary` rather than bare `summary`.
struct Prefixed<'a> {
    prefix: &'static str,
    sink: &'a mut Vec<Violation>,
}

impl Prefixed<'_> {
    fn push(&mut self, violation: Violation) {
        self.sink.push(Violation::new(
            format!("{}.{}", self.prefix, violation.field),
            violation.message,
        ));
    }
}

fn with_prefix<'a>(prefix: &'static str, sink: &'a mut Vec<Violation>) -> Prefixed<'a> {
    Prefixed { prefix, sink }
}

trait Collect {
    fn add(&mut self, violation: Violation);
}

impl Collect for Vec<Violation> {
    fn add(&mut self, violation: Violation) {
        self.push(violation);
    }
}

impl Collect for Prefixed<'_> {
    fn add(&mut self, violation: Violation) {
        self.push(violation);
    }
}

fn require_string(value: &Value, field: &str, out: &mut impl Collect) -> Option<String> {
    match value.get(field) {
        None => {
            out.add(Violation::new(field, "required field is missing"));
            None
        }
        Some(v) => match v.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                out.add(Violation::new(field, "must be a string"));
                None
            }
        },
    }
}

fn require_enum(
    value: &Value,
    field: &str,
    allowed: &[&str],
    out: &mut impl Collect,
) -> Option<String> {
    let s = require_string(value, field, out)?;
    if allowed.contains(&s.as_str()) {
        Some(s)
    } else {
        out.add(Violation::new(
            field,
            format!("must be one of: {}", allowed.join(", ")),
        ));
        None
    }
}

fn require_string_list(value: &Value, field: &str, out: &mut impl Collect) {
    match value.get(field) {
        None => out.add(Violation::new(field, "required field is missing")),
        Some(v) => match v.as_sequence() {
            None => out.add(Violation::new(field, "must be a sequence of strings")),
            Some(items) => {
                if items.iter().any(|item| item.as_str().is_none()) {
                    out.add(Violation::new(field, "every entry must be a string"));
                }
            }
        },
    }
}

fn check_version(value: &Value, violations: &mut Vec<Violation>) {
    match value.get("schema_version") {
        None => violations.push(Violation::new("schema_version", "required field is missing")),
        Some(v) => match v.as_f64() {
            None => violations.push(Violation::new("schema_version", "must be a number")),
            Some(n) if n < 1.0 => {
                violations.push(Violation::new("schema_version", "must be >= 1.0"));
            }
            Some(_) => {}
        },
    }
}

fn check_issue_id(value: &Value, violations: &mut Vec<Violation>) {
    if let Some(id) = require_string(value, "issue_id", violations) {
        let well_formed = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
        if !well_formed {
            violations.push(Violation::new(
                "issue_id",
                "must match [A-Z0-9_]+ (uppercase letters, digits, underscores)",
            ));
        }
    }
}

fn check_scope(value: &Value, violations: &mut Vec<Violation>) {
    // Optional; when present it must be a string-to-string mapping.
    let Some(scope) = value.get("scope") else {
        return;
    };
    if scope.is_null() {
        return;
    }
    match scope.as_mapping() {
        None => violations.push(Violation::new("scope", "must be a mapping of strings")),
        Some(map) => {
            if map
                .iter()
                .any(|(k, v)| k.as_str().is_none() || v.as_str().is_none())
            {
                violations.push(Violation::new("scope", "every key and value must be a string"));
            }
        }
    }
}

fn check_signature(value: &Value, violations: &mut Vec<Violation>) {
    match value.get("error_signature") {
        None => violations.push(Violation::new("error_signature", "required field is missing")),
        Some(sig) if sig.as_mapping().is_none() => {
            violations.push(Violation::new("error_signature", "must be a mapping"));
        }
        Some(sig) => {
            let kind = {
                let mut out = with_prefix("error_signature", violations);
                require_enum(sig, "type", &SignatureKind::ALLOWED, &mut out)
            };
            let pattern = {
                let mut out = with_prefix("error_signature", violations);
                require_string(sig, "pattern", &mut out)
            };
            // A regex signature must compile; a literal one is escaped at
            // diagnosis time and cannot fail.
            if let (Some(kind), Some(pattern)) = (kind, pattern) {
                if kind == "regex" {
                    if let Err(e) = regex::Regex::new(&pattern) {
                        violations.push(Violation::new(
                            "error_signature.pattern",
                            format!("invalid regex: {e}"),
                        ));
                    }
                }
            }
        }
    }
}

fn check_resolution(value: &Value, violations: &mut Vec<Violation>) {
    match value.get("resolution") {
        None => violations.push(Violation::new("resolution", "required field is missing")),
        Some(res) if res.as_mapping().is_none() => {
            violations.push(Violation::new("resolution", "must be a mapping"));
        }
        Some(res) => {
            let mut out = with_prefix("resolution", violations);
            require_enum(res, "strategy", &Strategy::ALLOWED, &mut out);
            require_enum(res, "risk_level", &RiskLevel::ALLOWED, &mut out);
            require_string_list(res, "steps", &mut out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fix::{Severity, SignatureKind};

    fn valid_yaml() -> String {
        "\
schema_version: 1.0
issue_id: OOM_KILL
title: Out of memory killer triggered
category: kernel
subcategory: memory
severity: critical
confidence: high
error_signature:
  type: regex
  pattern: out of memory
description: The kernel killed a process to reclaim memory.
root_cause:
  summary: Memory overcommit exhausted
  details: The OOM killer selects the process with the highest badness score.
resolution:
  strategy: automatic
  risk_level: medium
  steps:
    - sudo sysctl -w vm.overcommit_memory=1
verification:
  success_criteria:
    - dmesg shows no new oom-killer entries
"
        .to_string()
    }

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_valid_fix_passes() {
        let fix = validate(&parse(&valid_yaml())).unwrap();
        assert_eq!(fix.issue_id, "OOM_KILL");
        assert_eq!(fix.severity, Severity::Critical);
        assert_eq!(fix.error_signature.kind, SignatureKind::Regex);
        assert_eq!(fix.resolution.steps.len(), 1);
    }

    #[test]
    fn test_round_trip_through_schema() {
        let fix = validate(&parse(&valid_yaml())).unwrap();
        let serialized = serde_yaml::to_string(&fix).unwrap();
        let reparsed = validate(&parse(&serialized)).unwrap();
        assert_eq!(fix, reparsed);
    }

    #[test]
    fn test_reports_every_violation_not_just_first() {
        let yaml = valid_yaml()
            .replace("issue_id: OOM_KILL", "issue_id: oom-kill")
            .replace("severity: critical", "severity: fatal")
            .replace("confidence: high", "confidence: certain");
        let err = validate(&parse(&yaml)).unwrap_err();
        let fields: Vec<_> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert!(fields.contains(&"issue_id"));
        assert!(fields.contains(&"severity"));
        assert!(fields.contains(&"confidence"));
        assert_eq!(err.violations.len(), 3);
    }

    #[test]
    fn test_missing_required_fields_are_all_reported() {
        let err = validate(&parse("schema_version: 1.0\nissue_id: X1\n")).unwrap_err();
        let fields: Vec<_> = err.violations.iter().map(|v| v.field.as_str()).collect();
        for expected in [
            "title",
            "category",
            "subcategory",
            "description",
            "severity",
            "confidence",
            "error_signature",
            "root_cause",
            "resolution",
            "verification",
        ] {
            assert!(fields.contains(&expected), "missing violation for {expected}");
        }
    }

    #[test]
    fn test_schema_version_below_one_rejected() {
        let yaml = valid_yaml().replace("schema_version: 1.0", "schema_version: 0.9");
        let err = validate(&parse(&yaml)).unwrap_err();
        assert_eq!(err.violations[0].field, "schema_version");
    }

    #[test]
    fn test_integer_schema_version_accepted() {
        let yaml = valid_yaml().replace("schema_version: 1.0", "schema_version: 2");
        assert!(validate(&parse(&yaml)).is_ok());
    }

    #[test]
    fn test_invalid_regex_pattern_is_strict_failure() {
        let yaml = valid_yaml().replace("pattern: out of memory", "pattern: \"(unclosed\"");
        let err = validate(&parse(&yaml)).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "error_signature.pattern");
        assert!(err.violations[0].message.contains("invalid regex"));
    }

    #[test]
    fn test_literal_signature_skips_regex_check() {
        let yaml = valid_yaml()
            .replace("type: regex", "type: string")
            .replace("pattern: out of memory", "pattern: \"(unclosed\"");
        assert!(validate(&parse(&yaml)).is_ok());
    }

    #[test]
    fn test_nested_violations_carry_full_path() {
        let yaml = valid_yaml().replace("risk_level: medium", "risk_level: extreme");
        let err = validate(&parse(&yaml)).unwrap_err();
        assert_eq!(err.violations[0].field, "resolution.risk_level");
    }

    #[test]
    fn test_scope_must_map_strings_to_strings() {
        let yaml = valid_yaml() + "scope:\n  os: ubuntu\n  version: 22\n";
        let err = validate(&parse(&yaml)).unwrap_err();
        assert_eq!(err.violations[0].field, "scope");
    }

    #[test]
    fn test_optional_scope_accepted() {
        let yaml = valid_yaml() + "scope:\n  os: ubuntu\n";
        let fix = validate(&parse(&yaml)).unwrap();
        assert_eq!(fix.scope.unwrap().get("os").unwrap(), "ubuntu");
    }

    #[test]
    fn test_non_mapping_document_rejected() {
        let err = validate(&parse("- just\n- a\n- list\n")).unwrap_err();
        assert_eq!(err.violations[0].field, "fix");
    }

    #[test]
    fn test_steps_must_be_strings() {
        let yaml = valid_yaml().replace(
            "    - sudo sysctl -w vm.overcommit_memory=1",
            "    - 42",
        );
        let err = validate(&parse(&yaml)).unwrap_err();
        assert_eq!(err.violations[0].field, "resolution.steps");
    }
}
