//! Patch and check command implementations

use std::path::PathBuf;

use colored::Colorize;
use tagger_core::{BatchReport, FileReport, Outcome, RunMode, Runner};

use crate::cli::PolicyArgs;
use crate::error::Result;

use super::{Completion, load_policy};

/// Run the patch command
///
/// Writes patched files, or prints diffs with `--dry-run`. Skipped files
/// never fail the command.
pub fn run_patch(files: &[PathBuf], args: &PolicyArgs, dry_run: bool, json: bool) -> Result<Completion> {
    let mode = if dry_run { RunMode::DryRun } else { RunMode::Write };
    let runner = Runner::new(load_policy(args)?).with_mode(mode);
    let batch = runner.run(files);

    if json {
        println!("{}", batch.to_json()?);
    } else {
        for report in &batch.files {
            print_status(report);
            if let Some(diff) = &report.diff {
                print_diff(diff);
            }
        }
        print_patch_summary(&batch, dry_run);
    }
    Ok(Completion::Done)
}

/// Run the check command
///
/// Exits with status 1 when any file would change.
pub fn run_check(files: &[PathBuf], args: &PolicyArgs, json: bool) -> Result<Completion> {
    let runner = Runner::new(load_policy(args)?).with_mode(RunMode::DryRun);
    let batch = runner.run(files);

    if json {
        println!("{}", batch.to_json()?);
    } else {
        for report in &batch.files {
            print_status(report);
        }
        print_check_summary(&batch);
    }

    Ok(if batch.has_pending_changes() {
        Completion::ChangesPending
    } else {
        Completion::Done
    })
}

fn print_status(report: &FileReport) {
    let kind = report.kind.map(|kind| kind.label()).unwrap_or("?");
    let path = &report.path;
    match &report.outcome {
        Outcome::Patched => println!("{} ({kind}): {path}", "Patched".green().bold()),
        Outcome::WouldPatch => println!("{} ({kind}): {path}", "Would patch".yellow().bold()),
        Outcome::Unchanged => println!("{}", format!("No data storage definitions found ({kind}): {path}").dimmed()),
        Outcome::SkippedUnreadable { reason } => {
            println!("{} (unreadable {kind}): {path}", "Skip".yellow());
            tracing::debug!(%path, %reason, "unreadable");
        }
        Outcome::SkippedUnknownType => println!("{} (unknown type): {path}", "Skip".yellow()),
        Outcome::SkippedExcluded { pattern } => {
            println!("{} (path contains \"{pattern}\"): {path}", "Skip".yellow())
        }
        Outcome::Failed { reason } => println!("{} ({kind}): {path}: {reason}", "Failed".red().bold()),
    }
}

fn print_diff(diff: &str) {
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }
}

fn print_patch_summary(batch: &BatchReport, dry_run: bool) {
    let (changed, tags) = if dry_run {
        (format!("{} file(s) would change", batch.pending()), "tag(s) to add")
    } else {
        (format!("{} file(s) patched", batch.patched()), "tag(s) added")
    };
    let mut summary = format!("{changed}, {} {tags}, {} skipped", batch.entries_added(), batch.skipped());
    let failed = batch.failed();
    if failed > 0 {
        summary.push_str(&format!(", {failed} failed"));
    }
    println!("{} {summary}", "Done.".bold());
}

fn print_check_summary(batch: &BatchReport) {
    let pending = batch.pending();
    if pending == 0 {
        println!("{} All templates carry the required tags.", "OK".green().bold());
    } else {
        println!(
            "{} {} file(s) need tags. Run {} to fix.",
            "MISSING".red().bold(),
            pending,
            "tagger patch".cyan()
        );
    }
}
