use colored::*;
use serde::Serialize;
use std::path::Path;

use crate::common::format::{format_count, format_duration, serialize_path};
use crate::duplicates::{ActionReport, Mode, RemovalStatus, ScanResult};

pub fn print_header(root: &Path) {
    println!("Searching for duplicates in: {}", root.display().to_string().cyan());
}

/// Human report: one line per kept file, one per duplicate, then a summary
pub fn print_report(scan: &ScanResult, report: &ActionReport) {
    if report.groups.is_empty() {
        print_stats(scan);
        println!("No duplicate files found.");
        return;
    }

    for group in &report.groups {
        println!();
        println!(
            "{}",
            format!("Duplicate group (Hash: {}):", group.fingerprint).bold()
        );
        println!("  {} {}", "[KEEP]".green(), group.keep.display());
        for removal in &group.removals {
            match &removal.status {
                RemovalStatus::Duplicate => {
                    println!("  {} {}", "[DUPLICATE]".yellow(), removal.path.display())
                }
                RemovalStatus::Deleted => {
                    println!("  {} {}", "[DELETED]".red(), removal.path.display())
                }
                RemovalStatus::Failed { reason } => {
                    println!("  {} {}", "[ERROR]".red().bold(), reason)
                }
            }
        }
    }

    println!();
    print_stats(scan);
    match report.mode {
        Mode::DryRun => println!(
            "Found {}. Run with {} to remove them.",
            format_count(report.total_duplicates),
            "--delete".cyan()
        ),
        Mode::Commit => println!(
            "Deleted {} of {}.",
            report.deleted,
            format_count(report.attempted)
        ),
    }
}

fn print_stats(scan: &ScanResult) {
    let mut line = format!(
        "Scanned {} files in {}",
        scan.files_scanned,
        format_duration(scan.duration_secs)
    );
    if scan.files_skipped > 0 {
        line.push_str(&format!(" ({} unreadable, skipped)", scan.files_skipped));
    }
    println!("{}", line.dimmed());
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(serialize_with = "serialize_path")]
    root: &'a Path,
    files_scanned: usize,
    files_skipped: usize,
    duration_secs: f64,
    #[serde(flatten)]
    report: &'a ActionReport,
}

pub fn print_json(root: &Path, scan: &ScanResult, report: &ActionReport) -> serde_json::Result<()> {
    let json = JsonReport {
        root,
        files_scanned: scan.files_scanned,
        files_skipped: scan.files_skipped,
        duration_secs: scan.duration_secs,
        report,
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// `<groups> <duplicates> <deleted>`
pub fn print_quiet(report: &ActionReport) {
    println!(
        "{} {} {}",
        report.groups.len(),
        report.total_duplicates,
        report.deleted
    );
}
