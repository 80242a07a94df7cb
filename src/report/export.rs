//! Dashboard snapshot export to JSON

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{DashboardSnapshot, LoadStats};

/// Metadata about the export run
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the export (ISO 8601 format)
    pub timestamp: String,
    /// paxsat version
    pub paxsat_version: String,
    /// Input file path
    pub input_file: String,
    /// Number of histogram buckets requested
    pub bins: usize,
    /// Row accounting from loading
    pub load_stats: LoadStats,
}

/// Complete export: metadata plus the snapshot
#[derive(Serialize)]
pub struct SnapshotExport<'a> {
    pub metadata: ExportMetadata,
    pub snapshot: &'a DashboardSnapshot,
}

/// Parameters for the export metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub bins: usize,
    pub load_stats: &'a LoadStats,
}

/// Build the export document for a snapshot.
pub fn build_export<'a>(snapshot: &'a DashboardSnapshot, params: &ExportParams) -> SnapshotExport<'a> {
    SnapshotExport {
        metadata: ExportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            paxsat_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            bins: params.bins,
            load_stats: params.load_stats.clone(),
        },
        snapshot,
    }
}

/// Write a snapshot as pretty-printed JSON to `output_path`.
pub fn export_snapshot(
    snapshot: &DashboardSnapshot,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let export = build_export(snapshot, params);
    let json = serde_json::to_string_pretty(&export).context("Failed to serialize snapshot")?;
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write export file: {}", output_path.display()))?;
    Ok(())
}
