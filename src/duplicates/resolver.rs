use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::grouper::{FingerprintGroup, ScanResult};
use super::hasher::Fingerprint;
use crate::common::errors::DupError;
use crate::common::format::serialize_path;

/// What to do with the duplicates of each group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Report only, never touch the filesystem
    #[default]
    DryRun,
    /// Delete every path but the first-seen one
    Commit,
}

/// Outcome for one removal candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemovalStatus {
    /// Dry run: would be removed
    Duplicate,
    /// Removed from disk
    Deleted,
    /// Removal was attempted and failed
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct Removal {
    #[serde(serialize_with = "serialize_path")]
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: RemovalStatus,
}

/// A group after resolution: the kept path and what happened to the rest
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedGroup {
    pub fingerprint: Fingerprint,
    #[serde(serialize_with = "serialize_path")]
    pub keep: PathBuf,
    pub removals: Vec<Removal>,
}

/// Full result of resolving a scan
#[derive(Debug, Clone, Serialize)]
pub struct ActionReport {
    pub mode: Mode,
    pub groups: Vec<ResolvedGroup>,
    /// Sum over groups of (size - 1)
    pub total_duplicates: usize,
    /// Deletions tried (zero in a dry run)
    pub attempted: usize,
    pub deleted: usize,
    pub failed: usize,
}

/// Resolve one group. In commit mode each duplicate is removed on its
/// own; a failure is logged and recorded and the rest still proceed.
pub fn resolve_group(group: &FingerprintGroup, mode: Mode) -> ResolvedGroup {
    let removals = group
        .duplicates()
        .iter()
        .map(|path| Removal {
            path: path.clone(),
            status: match mode {
                Mode::DryRun => RemovalStatus::Duplicate,
                Mode::Commit => remove(path),
            },
        })
        .collect();

    ResolvedGroup {
        fingerprint: group.fingerprint,
        keep: group.keep().to_path_buf(),
        removals,
    }
}

/// Resolve every group of a scan.
///
/// Deletion is irreversible and not transactional, neither within a group
/// nor across the run. Only one scan of a tree is expected at a time: if
/// another process removes a candidate first, that shows up here as a
/// per-file failure.
pub fn resolve_all(result: &ScanResult, mode: Mode) -> ActionReport {
    match mode {
        Mode::DryRun => info!(groups = result.groups().len(), "reporting"),
        Mode::Commit => info!(groups = result.groups().len(), "deleting"),
    }

    let groups: Vec<ResolvedGroup> = result
        .groups()
        .iter()
        .map(|g| resolve_group(g, mode))
        .collect();

    let removals = || groups.iter().flat_map(|g| g.removals.iter());
    let total_duplicates = removals().count();
    let deleted = removals()
        .filter(|r| r.status == RemovalStatus::Deleted)
        .count();
    let failed = removals()
        .filter(|r| matches!(r.status, RemovalStatus::Failed { .. }))
        .count();
    let attempted = match mode {
        Mode::DryRun => 0,
        Mode::Commit => total_duplicates,
    };

    info!(total_duplicates, deleted, failed, "done");
    ActionReport {
        mode,
        groups,
        total_duplicates,
        attempted,
        deleted,
        failed,
    }
}

fn remove(path: &Path) -> RemovalStatus {
    match std::fs::remove_file(path) {
        Ok(()) => RemovalStatus::Deleted,
        Err(source) => {
            let err = DupError::Delete {
                path: path.to_path_buf(),
                source,
            };
            error!("{}", err);
            RemovalStatus::Failed {
                reason: err.to_string(),
            }
        }
    }
}
