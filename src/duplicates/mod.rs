pub mod grouper;
pub mod hasher;
pub mod resolver;
pub mod walker;

pub use grouper::{scan, FileRecord, FingerprintGroup, ScanConfig, ScanResult};
pub use hasher::{fingerprint, Fingerprint};
pub use resolver::{resolve_all, resolve_group, ActionReport, Mode, RemovalStatus, ResolvedGroup};
pub use walker::walk_files;
