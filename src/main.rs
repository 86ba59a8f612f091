use anyhow::{Context, Result};
use clap::Parser;

use dupfind::cli::args::{Cli, OutputFormat};
use dupfind::cli::output;
use dupfind::common::config::Config;
use dupfind::common::format;
use dupfind::duplicates::{self, Mode, ScanConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("dupfind=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = Config::load(cli.config.as_deref())?;
    config.extend(cli.exclude_dirs.clone(), cli.exclude_files.clone());

    let root = format::absolutize(&format::expand_tilde(&cli.path));
    duplicates::grouper::validate_root(&root)?;

    let human = matches!(cli.format, OutputFormat::Human);
    if human {
        output::print_header(&root);
    }

    let mut scan_config = ScanConfig::new(root.clone(), &config);
    scan_config.show_progress = human && !cli.quiet;

    let scan = duplicates::scan(&scan_config)
        .with_context(|| format!("Scan of {} failed", root.display()))?;

    let mode = if cli.delete { Mode::Commit } else { Mode::DryRun };
    let report = duplicates::resolve_all(&scan, mode);

    match cli.format {
        OutputFormat::Human => output::print_report(&scan, &report),
        OutputFormat::Json => output::print_json(&root, &scan, &report)
            .context("Failed to serialize report")?,
        OutputFormat::Quiet => output::print_quiet(&report),
    }

    Ok(())
}
