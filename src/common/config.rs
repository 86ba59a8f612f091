use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use super::errors::{DupError, DupResult};

/// Directory names never descended into: version control, virtual envs,
/// caches and dependency/build output.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".venv",
    "venv",
    "__pycache__",
    ".gemini",
    ".agent",
    "node_modules",
    "dist",
    "build",
];

/// File basenames skipped at any depth (package markers, prior reports).
pub const DEFAULT_EXCLUDE_FILES: &[&str] = &[
    "__init__.py",
    "duplicates.txt",
    "duplicates_utf8.txt",
    "find_duplicates.py",
];

/// Exclusion settings for a scan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Directory names to skip entirely
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: BTreeSet<String>,

    /// File basenames to skip
    #[serde(default = "default_exclude_files")]
    pub exclude_files: BTreeSet<String>,
}

fn default_exclude_dirs() -> BTreeSet<String> {
    DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect()
}
fn default_exclude_files() -> BTreeSet<String> {
    DEFAULT_EXCLUDE_FILES.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude_dirs: default_exclude_dirs(),
            exclude_files: default_exclude_files(),
        }
    }
}

impl Config {
    /// Load config from an explicit TOML file, or the built-in defaults.
    /// Keys present in the file replace the corresponding default list.
    pub fn load(path: Option<&Path>) -> DupResult<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let contents = std::fs::read_to_string(path).map_err(|e| DupError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| DupError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Add extra exclusions on top of what was loaded
    pub fn extend<I, J>(&mut self, dirs: I, files: J)
    where
        I: IntoIterator<Item = String>,
        J: IntoIterator<Item = String>,
    {
        self.exclude_dirs.extend(dirs);
        self.exclude_files.extend(files);
    }
}
