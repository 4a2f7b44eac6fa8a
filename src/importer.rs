use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::dao::{self, InsertOutcome};
use crate::db::Database;
use crate::error::PipelineError;
use crate::types::ChartFile;

/// Counters for one importer run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub failed: usize,
    /// A transaction-level fault rolled back the current file and stopped the run.
    pub aborted: bool,
}

/// Expand the command-line inputs: directories become their immediate `*.json`
/// children (sorted, non-recursive); anything else is taken as a file path.
pub fn expand_paths(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::with_capacity(inputs.len());
    for input in inputs {
        if input.is_dir() {
            match json_children(input) {
                Ok(mut children) => {
                    children.sort();
                    files.extend(children);
                }
                Err(e) => error!("Error listing directory {}: {e:#}", input.display()),
            }
        } else {
            files.push(input.clone());
        }
    }
    files
}

fn json_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if !hidden && path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
            out.push(path);
        }
    }
    Ok(out)
}

pub async fn read_chart_file(path: &Path) -> Result<ChartFile> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Error processing file {}", path.display()))?;
    let file = ChartFile::from_json(&raw).map_err(|source| PipelineError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file)
}

/// Import every file named by `inputs`, one transaction per file.
///
/// Entry and file faults are logged and skipped. Only a failure to open or commit a
/// transaction ends the run early; files committed before it stay committed.
pub async fn import_paths(db: &Database, inputs: &[PathBuf]) -> ImportReport {
    let files = expand_paths(inputs);
    let mut report = ImportReport::default();

    for file in &files {
        info!("Processing file: {}", file.display());
        if let Err(e) = import_file(db, file, &mut report).await {
            error!("An error occurred: {e:#}");
            report.aborted = true;
            break;
        }
    }

    if !report.aborted {
        info!("Processing completed successfully");
    }
    info!(
        files = report.files_processed,
        skipped = report.files_skipped,
        inserted = report.inserted,
        duplicates = report.duplicates,
        failed = report.failed,
        "Import summary"
    );
    report
}

/// Returns `Err` only for transaction-level faults; everything below that is
/// recorded in `report`.
async fn import_file(db: &Database, path: &Path, report: &mut ImportReport) -> Result<()> {
    let chart = match read_chart_file(path).await {
        Ok(c) => c,
        Err(e) => {
            error!("{e:#}");
            report.files_skipped += 1;
            return Ok(());
        }
    };

    // Dropping `tx` without committing rolls the file back.
    let mut tx = db.pool().begin().await.context("starting transaction")?;
    for (idx, entry) in chart.entries().enumerate() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                error!("Malformed entry #{idx} in {}: {e}", path.display());
                report.failed += 1;
                continue;
            }
        };
        match dao::insert_entry(&mut tx, &entry).await {
            Ok(InsertOutcome::Inserted) => {
                debug!("Inserted: {}", entry.label());
                report.inserted += 1;
            }
            Ok(InsertOutcome::Duplicate) => {
                debug!("Duplicate entry skipped: {}", entry.label());
                report.duplicates += 1;
            }
            Err(e) => {
                error!("Error inserting record {}: {e}", entry.label());
                report.failed += 1;
            }
        }
    }
    tx.commit()
        .await
        .with_context(|| format!("committing {}", path.display()))?;
    report.files_processed += 1;
    Ok(())
}
