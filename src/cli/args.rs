use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// dupfind — find and remove duplicate files by content
#[derive(Parser, Debug)]
#[command(
    name = "dupfind",
    version,
    about = "Find and remove duplicate files",
    long_about = "dupfind walks a directory tree, fingerprints every file by its content\n\
                  and reports all but the first-seen file of each duplicate group.\n\
                  Nothing is removed unless --delete is given.",
    after_help = "EXAMPLES:\n  \
        dupfind ~/Downloads                       Report duplicates\n  \
        dupfind ~/Downloads --delete              Delete all but the first copy\n  \
        dupfind . --format json                   Machine-readable report\n  \
        dupfind . --exclude-dir target            Also skip target/ directories"
)]
pub struct Cli {
    /// Directory to search for duplicates
    pub path: String,

    /// Delete duplicate files (keeps the first-seen copy of each group)
    #[arg(long)]
    pub delete: bool,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Additional directory name to skip (repeatable)
    #[arg(long = "exclude-dir", value_name = "NAME")]
    pub exclude_dirs: Vec<String>,

    /// Additional file name to skip (repeatable)
    #[arg(long = "exclude-file", value_name = "NAME")]
    pub exclude_files: Vec<String>,

    /// TOML file with exclude_dirs / exclude_files lists
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode — no progress spinner
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}
