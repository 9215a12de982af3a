//! Target resolution and candidate discovery inside `out/`.

use crate::error::{AggregateError, Result};
use crate::report::REPORT_FILE_NAME;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn candidate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4}\.txt$").expect("candidate pattern is valid"))
}

/// Whether `name` looks like a case output: four ASCII digits then `.txt`.
pub fn is_candidate_name(name: &str) -> bool {
    candidate_pattern().is_match(name)
}

/// List the candidate output files directly inside `dir`, sorted by name.
///
/// Zero-padded four digit names make lexicographic order numeric order.
pub fn list_candidates(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| AggregateError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AggregateError::io(dir, e))?;
        if let Some(name) = entry.file_name().to_str() {
            if is_candidate_name(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Resolve a user-supplied directory argument under `out_root`.
///
/// Only the final path component is used, so arguments such as
/// `../../etc` cannot escape `out_root`.
pub fn resolve_target(out_root: &Path, arg: &str) -> Result<PathBuf> {
    let name = Path::new(arg)
        .file_name()
        .ok_or_else(|| AggregateError::InvalidTarget(arg.to_string()))?;
    Ok(out_root.join(name))
}

/// Whether `dir` already holds a report from an earlier run.
pub fn has_report(dir: &Path) -> bool {
    dir.join(REPORT_FILE_NAME).is_file()
}
