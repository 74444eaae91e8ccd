//! Run records on disk and exported summaries.

use crate::error::SummaryError;
use crate::model::{BenchSummary, RunRecord};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load every file in `dir` as a run record, ordered by file name.
pub fn load_runs(dir: &Path) -> Result<Vec<RunRecord>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("read run directory {}", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("list run directory {}", dir.display()))?
            .path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut runs = Vec::with_capacity(paths.len());
    for path in paths {
        runs.push(load_run(&path)?);
    }
    debug!(count = runs.len(), dir = %dir.display(), "loaded run records");
    Ok(runs)
}

/// Parse a single run record file.
pub fn load_run(path: &Path) -> Result<RunRecord> {
    let origin = path.display().to_string();
    let data = fs::read_to_string(path).with_context(|| format!("read {origin}"))?;
    let value: serde_json::Value =
        serde_json::from_str(&data).map_err(|e| SummaryError::MalformedRecord {
            origin: origin.clone(),
            reason: e.to_string(),
        })?;
    Ok(RunRecord::from_value(value, &origin)?)
}

/// Write structured summaries as pretty JSON.
pub fn export_json(path: &Path, records: &[BenchSummary]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
