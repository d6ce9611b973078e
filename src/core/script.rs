use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::FixError;
use crate::core::fix::FixRecord;

const SHEBANG: &str = "#!/bin/bash";

/// Render a fix's resolution steps into an executable shell script at
/// `output_dir/fix_{issue_id}.sh`.
///
/// Steps are transcribed verbatim, one per line, with no escaping or
/// validation. An existing script is overwritten.
pub fn generate_script(record: &FixRecord, output_dir: &Path) -> Result<PathBuf, FixError> {
    let issue_id = record
        .issue_id
        .as_deref()
        .ok_or(FixError::Incomplete("issue_id"))?;
    let steps = record
        .resolution
        .as_ref()
        .and_then(|r| r.steps.as_ref())
        .ok_or(FixError::Incomplete("resolution.steps"))?;

    let path = output_dir.join(format!("fix_{issue_id}.sh"));
    let mut body = format!("{SHEBANG}\n\n");
    for step in steps {
        body.push_str(step);
        body.push('\n');
    }
    fs::write(&path, body)?;
    mark_executable(&path)?;
    Ok(path)
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
