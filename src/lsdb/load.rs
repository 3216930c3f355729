use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::Snapshot;
use super::parse::parse_snapshot;

/// Reads and ingests one snapshot artifact from disk.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot file {}", path.display()))?;
    let snapshot = parse_snapshot(&raw)
        .with_context(|| format!("failed to ingest snapshot {}", path.display()))?;

    tracing::info!(
        timestamp = %snapshot.timestamp,
        nodes = snapshot.graph.node_count(),
        links = snapshot.graph.link_count(),
        routers = snapshot.adjacencies.len(),
        "snapshot ingested"
    );

    Ok(snapshot)
}

/// Reads the companion plain-text log artifact. The log is presentation
/// only; a missing file is the caller's notice to render, not a failure.
pub fn load_log(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read log file {}", path.display()))
}
