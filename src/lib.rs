//! # dupfind
//!
//! Content-based duplicate file finder.
//!
//! dupfind walks a directory tree, fingerprints every file with SHA-256
//! and groups files whose content is identical. For each group the
//! first-seen file is kept and the rest are reported, or deleted when
//! running in commit mode.
//!
//! - **Dry-run by default**: nothing is touched unless asked
//! - **Fail-soft**: unreadable files are skipped, failed deletions are
//!   reported per file and never stop the run
//! - **Deterministic**: a fixed tree always yields the same groups in the
//!   same order
//!
//! ```no_run
//! use dupfind::common::config::Config;
//! use dupfind::duplicates::{resolve_all, scan, Mode, ScanConfig};
//!
//! let config = ScanConfig::new("/data/photos", &Config::default());
//! let result = scan(&config)?;
//! let report = resolve_all(&result, Mode::DryRun);
//! println!("{} duplicates", report.total_duplicates);
//! # Ok::<(), dupfind::common::errors::DupError>(())
//! ```

pub mod cli;
pub mod common;
pub mod duplicates;
