use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A single field-level problem found during schema validation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Exhaustive validation report: every violated field, not just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub violations: Vec<Violation>,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "schema validation failed ({} violation{})",
            self.violations.len(),
            if self.violations.len() == 1 { "" } else { "s" }
        )?;
        for v in &self.violations {
            write!(f, "\n  - {}", v)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaError {}

/// Errors that can occur during fix repository operations.
#[derive(Error, Debug)]
pub enum FixError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error for a specific file
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Fix record failed schema validation
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Referenced issue id has no record in the store
    #[error("no fix found for issue id '{0}'")]
    NotFound(String),

    /// Add targeting an issue id that is already stored
    #[error("fix with issue id '{0}' already exists")]
    AlreadyExists(String),

    /// Diagnosis exhausted the store without a match
    #[error("no known issue matched the log")]
    NoMatch,

    /// A lenient record is missing a field an operation needs
    #[error("fix record is missing '{0}'")]
    Incomplete(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_every_violation() {
        let err = SchemaError {
            violations: vec![
                Violation::new("issue_id", "required field is missing"),
                Violation::new("severity", "must be one of: info, warning, error, critical"),
            ],
        };
        let text = err.to_string();
        assert!(text.contains("2 violations"));
        assert!(text.contains("issue_id: required field is missing"));
        assert!(text.contains("severity: must be one of"));
    }

    #[test]
    fn test_fix_error_messages() {
        assert_eq!(
            FixError::NotFound("OOM_KILL".into()).to_string(),
            "no fix found for issue id 'OOM_KILL'"
        );
        assert_eq!(
            FixError::AlreadyExists("OOM_KILL".into()).to_string(),
            "fix with issue id 'OOM_KILL' already exists"
        );
        assert_eq!(FixError::NoMatch.to_string(), "no known issue matched the log");
    }
}
