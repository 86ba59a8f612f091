use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use super::hasher::{self, Fingerprint};
use super::walker;
use crate::common::config::Config;
use crate::common::errors::{DupError, DupResult};
use crate::common::format::serialize_paths;

/// Configuration for duplicate scanning
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directory to scan
    pub root: PathBuf,
    /// Directory names pruned from the walk
    pub exclude_dirs: BTreeSet<String>,
    /// File basenames skipped at any depth
    pub exclude_files: BTreeSet<String>,
    /// Show a spinner on stderr while scanning
    pub show_progress: bool,
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            root: root.into(),
            exclude_dirs: config.exclude_dirs.clone(),
            exclude_files: config.exclude_files.clone(),
            show_progress: false,
        }
    }
}

/// One walked file and its fingerprint, if it could be read
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub fingerprint: Option<Fingerprint>,
}

/// Paths sharing one fingerprint, in discovery order
#[derive(Debug, Clone, Serialize)]
pub struct FingerprintGroup {
    pub fingerprint: Fingerprint,
    #[serde(serialize_with = "serialize_paths")]
    paths: Vec<PathBuf>,
}

impl FingerprintGroup {
    /// Build a group; `None` unless there are at least two paths
    pub fn new(fingerprint: Fingerprint, paths: Vec<PathBuf>) -> Option<Self> {
        if paths.len() < 2 {
            return None;
        }
        Some(Self { fingerprint, paths })
    }

    /// All paths in discovery order
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// First-seen path, the one that survives a commit run
    pub fn keep(&self) -> &Path {
        &self.paths[0]
    }

    /// Every path after the first
    pub fn duplicates(&self) -> &[PathBuf] {
        &self.paths[1..]
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

/// Outcome of a single scan. Only fingerprints seen at least twice are
/// present; groups are ordered by when their fingerprint was first seen.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    groups: Vec<FingerprintGroup>,
    index: HashMap<Fingerprint, usize>,
    /// Files yielded by the walk
    pub files_scanned: usize,
    /// Files that could not be fingerprinted
    pub files_skipped: usize,
    pub duration_secs: f64,
}

impl ScanResult {
    pub fn groups(&self) -> &[FingerprintGroup] {
        &self.groups
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&FingerprintGroup> {
        self.index.get(fingerprint).map(|&i| &self.groups[i])
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum over groups of (size - 1)
    pub fn duplicate_count(&self) -> usize {
        self.groups.iter().map(|g| g.len() - 1).sum()
    }
}

/// Accumulates fingerprint -> paths for one scan call
#[derive(Default)]
struct Accumulator {
    order: Vec<Fingerprint>,
    paths: HashMap<Fingerprint, Vec<PathBuf>>,
    scanned: usize,
    skipped: usize,
}

impl Accumulator {
    fn push(&mut self, record: FileRecord) {
        self.scanned += 1;
        let Some(fp) = record.fingerprint else {
            self.skipped += 1;
            return;
        };
        match self.paths.entry(fp) {
            Entry::Occupied(mut e) => e.get_mut().push(record.path),
            Entry::Vacant(e) => {
                self.order.push(fp);
                e.insert(vec![record.path]);
            }
        }
    }

    fn finish(mut self, duration_secs: f64) -> ScanResult {
        let mut groups = Vec::new();
        let mut index = HashMap::new();
        for fp in self.order {
            let Some(group) = self
                .paths
                .remove(&fp)
                .and_then(|paths| FingerprintGroup::new(fp, paths))
            else {
                continue;
            };
            index.insert(fp, groups.len());
            groups.push(group);
        }
        ScanResult {
            groups,
            index,
            files_scanned: self.scanned,
            files_skipped: self.skipped,
            duration_secs,
        }
    }
}

/// Fingerprint one path, turning a read failure into "no fingerprint"
pub fn record_for(path: PathBuf) -> FileRecord {
    let fingerprint = match hasher::fingerprint(&path) {
        Ok(fp) => Some(fp),
        Err(e) => {
            debug!("{}", e);
            None
        }
    };
    FileRecord { path, fingerprint }
}

/// Check that the root exists and is a directory
pub fn validate_root(root: &Path) -> DupResult<()> {
    let meta = std::fs::metadata(root).map_err(|e| DupError::InvalidRoot {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !meta.is_dir() {
        return Err(DupError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    Ok(())
}

/// Walk, fingerprint and group every candidate file under the root
pub fn scan(config: &ScanConfig) -> DupResult<ScanResult> {
    validate_root(&config.root)?;
    let start = Instant::now();
    info!(root = %config.root.display(), "scanning");

    let pb = make_spinner(config.show_progress, "Hashing files...");
    let mut acc = Accumulator::default();
    for path in walker::walk_files(&config.root, &config.exclude_dirs, &config.exclude_files) {
        acc.push(record_for(path));
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }
    let result = acc.finish(start.elapsed().as_secs_f64());
    finish_spinner(pb, &format!("Hashed {} files", result.files_scanned));

    info!(
        files = result.files_scanned,
        skipped = result.files_skipped,
        groups = result.groups.len(),
        "scan complete"
    );
    Ok(result)
}

// ── Progress helpers ──────────────────────────────────────────────────────────

fn make_spinner(show: bool, msg: &str) -> Option<ProgressBar> {
    if !show {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg} {pos}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    Some(pb)
}

fn finish_spinner(pb: Option<ProgressBar>, msg: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(msg.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(byte: u8) -> Option<Fingerprint> {
        Some(Fingerprint::from_bytes([byte; 32]))
    }

    fn record(path: &str, fingerprint: Option<Fingerprint>) -> FileRecord {
        FileRecord {
            path: PathBuf::from(path),
            fingerprint,
        }
    }

    #[test]
    fn singletons_are_dropped() {
        let mut acc = Accumulator::default();
        acc.push(record("/a", fp(1)));
        acc.push(record("/b", fp(2)));
        acc.push(record("/c", fp(1)));

        let result = acc.finish(0.0);
        assert_eq!(result.groups().len(), 1);
        assert_eq!(result.groups()[0].paths(), [PathBuf::from("/a"), PathBuf::from("/c")]);
        assert!(result.get(&Fingerprint::from_bytes([2; 32])).is_none());
        assert_eq!(result.files_scanned, 3);
    }

    #[test]
    fn groups_follow_first_seen_order() {
        let mut acc = Accumulator::default();
        acc.push(record("/x1", fp(9)));
        acc.push(record("/y1", fp(3)));
        acc.push(record("/y2", fp(3)));
        acc.push(record("/x2", fp(9)));

        let result = acc.finish(0.0);
        let keeps: Vec<&Path> = result.groups().iter().map(|g| g.keep()).collect();
        assert_eq!(keeps, vec![Path::new("/x1"), Path::new("/y1")]);
    }

    #[test]
    fn unreadable_records_are_counted_not_grouped() {
        let mut acc = Accumulator::default();
        acc.push(record("/a", None));
        acc.push(record("/b", None));

        let result = acc.finish(0.0);
        assert!(result.is_empty());
        assert_eq!(result.files_skipped, 2);
        assert_eq!(result.duplicate_count(), 0);
    }

    #[test]
    fn missing_file_records_no_fingerprint() {
        let path = PathBuf::from("/nonexistent/dupfind/file.txt");
        let record = record_for(path.clone());
        assert_eq!(record.path, path);
        assert!(record.fingerprint.is_none());
    }

    #[test]
    fn missing_root_is_invalid() {
        let err = validate_root(Path::new("/nonexistent/dupfind-root")).unwrap_err();
        assert!(matches!(err, DupError::InvalidRoot { .. }));
    }
}
