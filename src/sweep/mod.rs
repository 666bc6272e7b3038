pub mod decision;

pub use decision::{decide, SweepReport, Verdict, VisitOutcome};

use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Immutable inputs for one sweep pass.
#[derive(Debug, Clone, Copy)]
pub struct SweepContext {
    /// Files modified strictly before this instant qualify.
    pub purge_before: DateTime<Utc>,
    /// When false, qualifying files are counted and logged but left alone.
    pub delete: bool,
    pub verbose: bool,
}

/// Walk the tree under `root` once, pre-order, and apply the purge decision
/// to every regular file. Never fails as a whole; per-entry trouble lands in
/// the report as soft errors and the walk keeps going.
pub fn run_sweep(root: &Path, ctx: &SweepContext) -> SweepReport {
    let mut report = SweepReport::default();

    for entry in WalkDir::new(root) {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                visit_file(entry.path(), ctx, &mut report);
            }
            Ok(_) => {}
            Err(e) => {
                warn!("walk: {}", e);
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                report.record(VisitOutcome::SoftError {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}

fn visit_file(path: &Path, ctx: &SweepContext, report: &mut SweepReport) {
    let modified = match file_mtime(path) {
        Ok(t) => t,
        Err(e) => {
            warn!("{}: {}", path.display(), e);
            report.record(VisitOutcome::SoftError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            return;
        }
    };

    if decide(modified, ctx.purge_before) == Verdict::Keep {
        report.record(VisitOutcome::Kept);
        return;
    }

    if ctx.verbose {
        info!("purge {} (modified {})", path.display(), modified.to_rfc3339());
    }

    let mut removed = false;
    if ctx.delete {
        match fs::remove_file(path) {
            Ok(()) => removed = true,
            Err(e) => {
                warn!("remove {}: {}", path.display(), e);
                report.soft_error(path.to_path_buf(), e.to_string());
            }
        }
    }
    report.record(VisitOutcome::Purged { removed });

    // The parent is checked even when nothing was removed, so a dry run
    // still reports directories that would fall empty.
    if let Some(parent) = path.parent() {
        cascade_empty_dir(parent, ctx, report);
    }
}

fn cascade_empty_dir(dir: &Path, ctx: &SweepContext, report: &mut SweepReport) {
    if !is_empty_dir(dir) {
        return;
    }

    info!("empty directory {}", dir.display());
    if ctx.delete {
        match fs::remove_dir(dir) {
            Ok(()) => report.dir_removed(),
            Err(e) => {
                warn!("remove {}: {}", dir.display(), e);
                report.soft_error(dir.to_path_buf(), e.to_string());
            }
        }
    }
}

/// A directory counts as empty only when it opens cleanly and yields no
/// entries. An unreadable directory is never cascaded.
fn is_empty_dir(dir: &Path) -> bool {
    match fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_none(),
        Err(e) => {
            warn!("{}: {}", dir.display(), e);
            false
        }
    }
}

fn file_mtime(path: &Path) -> io::Result<DateTime<Utc>> {
    let modified = path.metadata()?.modified()?;
    Ok(modified.into())
}
