use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::FixError;
use crate::core::fix::{Fix, FixRecord};
use crate::core::schema;

pub const FIX_EXTENSION: &str = "yaml";
pub const BACKUP_SUFFIX: &str = "bak";

/// A leniently parsed record together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedFix {
    pub path: PathBuf,
    pub record: FixRecord,
}

impl LoadedFix {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Filesystem-backed repository of fix records, one `{issue_id}.yaml` file
/// per fix under a single base directory. The store holds no in-memory
/// state; every operation re-reads the directory.
pub struct FixStore {
    base_dir: PathBuf,
}

impl FixStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn record_path(&self, issue_id: &str) -> PathBuf {
        self.base_dir.join(format!("{issue_id}.{FIX_EXTENSION}"))
    }

    pub fn backup_path(&self, issue_id: &str) -> PathBuf {
        self.base_dir
            .join(format!("{issue_id}.{FIX_EXTENSION}.{BACKUP_SUFFIX}"))
    }

    /// Every fix file in the store, sorted lexicographically by filename.
    /// Sorting pins the enumeration order that first-match-wins diagnosis
    /// depends on; backups (`.bak`) don't carry the fix extension and are
    /// excluded by the filter.
    pub fn fix_files(&self) -> Result<Vec<PathBuf>, FixError> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }
        let mut files: Vec<PathBuf> = fs::read_dir(&self.base_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path.extension().map(|e| e == FIX_EXTENSION).unwrap_or(false)
            })
            .collect();
        files.sort_by_key(|path| path.file_name().map(|n| n.to_os_string()));
        Ok(files)
    }

    /// Lenient bulk read. Files that fail to parse as YAML are skipped with
    /// a stderr diagnostic rather than failing the whole listing.
    pub fn list_all(&self) -> Result<Vec<LoadedFix>, FixError> {
        let mut fixes = Vec::new();
        for path in self.fix_files()? {
            let content = fs::read_to_string(&path)?;
            match serde_yaml::from_str::<FixRecord>(&content) {
                Ok(record) => fixes.push(LoadedFix { path, record }),
                Err(e) => {
                    eprintln!(
                        "{} skipping {}: {}",
                        "warning:".yellow().bold(),
                        path.display(),
                        e
                    );
                }
            }
        }
        Ok(fixes)
    }

    /// Direct single-file lookup; lenient parse, `Ok(None)` when absent.
    pub fn get(&self, issue_id: &str) -> Result<Option<FixRecord>, FixError> {
        let path = self.record_path(issue_id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let record =
            serde_yaml::from_str(&content).map_err(|source| FixError::Parse { path, source })?;
        Ok(Some(record))
    }

    /// Validate a candidate file and copy it into the store.
    pub fn add(&self, candidate: &Path) -> Result<Fix, FixError> {
        let (fix, content) = self.validate_candidate(candidate)?;
        let destination = self.record_path(&fix.issue_id);
        if destination.exists() {
            return Err(FixError::AlreadyExists(fix.issue_id));
        }
        fs::create_dir_all(&self.base_dir)?;
        self.write_atomic(&destination, &content)?;
        Ok(fix)
    }

    /// Validate a candidate file and replace the stored record with it,
    /// keeping the previous content in a sibling `.bak` file. The backup
    /// copy and the rename are two separate steps; a crash between them
    /// leaves the old record intact plus a fresh backup.
    pub fn update(&self, candidate: &Path) -> Result<(Fix, PathBuf), FixError> {
        let (fix, content) = self.validate_candidate(candidate)?;
        let destination = self.record_path(&fix.issue_id);
        if !destination.exists() {
            return Err(FixError::NotFound(fix.issue_id));
        }
        let backup = self.backup_path(&fix.issue_id);
        fs::copy(&destination, &backup)?;
        self.write_atomic(&destination, &content)?;
        Ok((fix, backup))
    }

    /// Delete a record's file.
    pub fn remove(&self, issue_id: &str) -> Result<(), FixError> {
        let path = self.record_path(issue_id);
        if !path.exists() {
            return Err(FixError::NotFound(issue_id.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// Case-insensitive substring search over issue id, title and root
    /// cause summary.
    pub fn search(&self, keyword: &str) -> Result<Vec<LoadedFix>, FixError> {
        let keyword = keyword.to_lowercase();
        let matches = self
            .list_all()?
            .into_iter()
            .filter(|loaded| {
                let record = &loaded.record;
                let haystack = format!(
                    "{} {} {}",
                    record.issue_id.as_deref().unwrap_or_default(),
                    record.title.as_deref().unwrap_or_default(),
                    record
                        .root_cause
                        .as_ref()
                        .and_then(|rc| rc.summary.as_deref())
                        .unwrap_or_default(),
                );
                haystack.to_lowercase().contains(&keyword)
            })
            .collect();
        Ok(matches)
    }

    fn validate_candidate(&self, candidate: &Path) -> Result<(Fix, String), FixError> {
        let content = fs::read_to_string(candidate)?;
        let value: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|source| FixError::Parse {
                path: candidate.to_path_buf(),
                source,
            })?;
        let fix = schema::validate(&value)?;
        Ok((fix, content))
    }

    // Write via a temp sibling plus rename so a crash mid-write never
    // leaves a truncated record behind.
    fn write_atomic(&self, destination: &Path, content: &str) -> Result<(), FixError> {
        let file_name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp = self.base_dir.join(format!(".{file_name}.tmp"));
        fs::write(&tmp, content)?;
        fs::rename(&tmp, destination)?;
        Ok(())
    }
}
