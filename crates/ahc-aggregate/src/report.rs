//! Plain-text `aggregate.txt` rendering.

use crate::error::{AggregateError, Result};
use crate::result::{AggregateResult, Extreme};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// File name of the per-directory report. Its presence marks a directory as done.
pub const REPORT_FILE_NAME: &str = "aggregate.txt";

/// Placeholder for statistics that are undefined on an empty accepted set.
const MISSING: &str = "N/A";

/// Render the report text for one directory.
pub fn render_report(result: &AggregateResult) -> String {
    let mut out = String::new();

    // The header keeps its trailing space; existing reports look like this.
    let _ = writeln!(out, "[{}] ", result.dir_name());
    let _ = writeln!(out, "AC: {}", result.accepted_count());
    let _ = writeln!(out, "WA: {}", result.rejected_count());
    let _ = writeln!(
        out,
        "avg: {}",
        result.average().map_or_else(|| MISSING.to_string(), format_average)
    );
    let _ = writeln!(out, "max: {}", format_extreme(result.max()));
    let _ = writeln!(out, "min: {}", format_extreme(result.min()));
    out.push('\n');

    for record in result.records() {
        let _ = writeln!(out, "({}, {})", record.name, record.outcome);
    }
    out
}

/// Write `aggregate.txt` into `dir`, returning the written path.
pub fn write_report(dir: &Path, result: &AggregateResult) -> Result<PathBuf> {
    let path = dir.join(REPORT_FILE_NAME);
    std::fs::write(&path, render_report(result)).map_err(|e| AggregateError::io(&path, e))?;
    Ok(path)
}

/// Integral averages keep one decimal (`100.0`); others use shortest round-trip form.
pub fn format_average(avg: f64) -> String {
    if avg.is_finite() && avg.fract() == 0.0 {
        format!("{avg:.1}")
    } else {
        format!("{avg}")
    }
}

fn format_extreme(extreme: Option<&Extreme>) -> String {
    match extreme {
        Some(e) => format!("{} ({})", e.score, e.name),
        None => MISSING.to_string(),
    }
}
