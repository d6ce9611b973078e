use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub const ALLOWED: [&'static str; 4] = ["info", "warning", "error", "critical"];
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub const ALLOWED: [&'static str; 3] = ["low", "medium", "high"];
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// How a signature pattern is interpreted: as a regular expression or as a
/// literal substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureKind {
    #[serde(rename = "regex")]
    Regex,
    #[serde(rename = "string")]
    Literal,
}

impl SignatureKind {
    pub const ALLOWED: [&'static str; 2] = ["regex", "string"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Manual,
    Automatic,
}

impl Strategy {
    pub const ALLOWED: [&'static str; 2] = ["manual", "automatic"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALLOWED: [&'static str; 3] = ["low", "medium", "high"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSignature {
    #[serde(rename = "type")]
    pub kind: SignatureKind,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootCause {
    pub summary: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub strategy: Strategy,
    pub risk_level: RiskLevel,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub success_criteria: Vec<String>,
}

/// A fully validated fix record. Instances only come out of
/// `schema::validate`, so every field is known to be well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub schema_version: f64,
    pub issue_id: String,
    pub title: String,
    pub category: String,
    pub subcategory: String,
    pub severity: Severity,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<BTreeMap<String, String>>,
    pub error_signature: ErrorSignature,
    pub description: String,
    pub root_cause: RootCause,
    pub resolution: Resolution,
    pub verification: Verification,
}

/// A leniently parsed fix record. Every field is optional so legacy or
/// partial documents (for example records predating `error_signature`)
/// still load on the read paths that tolerate them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixRecord {
    #[serde(default)]
    pub schema_version: Option<f64>,
    #[serde(default)]
    pub issue_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default)]
    pub scope: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub error_signature: Option<SignatureRecord>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub root_cause: Option<RootCauseRecord>,
    #[serde(default)]
    pub resolution: Option<ResolutionRecord>,
    #[serde(default)]
    pub verification: Option<VerificationRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignatureRecord {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootCauseRecord {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionRecord {
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub steps: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    #[serde(default)]
    pub success_criteria: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_serialize_lowercase() {
        assert_eq!(serde_yaml::to_string(&Severity::Critical).unwrap().trim(), "critical");
        assert_eq!(serde_yaml::to_string(&Confidence::High).unwrap().trim(), "high");
        assert_eq!(serde_yaml::to_string(&SignatureKind::Literal).unwrap().trim(), "string");
        assert_eq!(serde_yaml::to_string(&Strategy::Automatic).unwrap().trim(), "automatic");
    }

    #[test]
    fn test_lenient_record_tolerates_missing_fields() {
        let yaml = "issue_id: OOM_KILL\ntitle: Out of memory\n";
        let record: FixRecord = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(record.issue_id.as_deref(), Some("OOM_KILL"));
        assert!(record.error_signature.is_none());
        assert!(record.resolution.is_none());
    }

    #[test]
    fn test_lenient_record_ignores_unknown_fields() {
        let yaml = "issue_id: X1\nlegacy_notes: old field\n";
        let record: FixRecord = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(record.issue_id.as_deref(), Some("X1"));
    }
}
