use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Age verdict for a single regular file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Purge,
    Keep,
}

/// A file qualifies only when its mtime falls strictly before the window.
pub fn decide(modified: DateTime<Utc>, purge_before: DateTime<Utc>) -> Verdict {
    if modified < purge_before {
        Verdict::Purge
    } else {
        Verdict::Keep
    }
}

/// What happened to one filesystem entry during a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    /// The file qualified for purging. `removed` stays false on a dry run
    /// and on a failed removal; qualification is counted either way.
    Purged { removed: bool },
    Kept,
    /// The entry could not be evaluated (walk error, unreadable metadata).
    SoftError { path: PathBuf, reason: String },
}

/// Aggregated result of one sweep. Built fresh for every cycle.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub files_identified: u64,
    pub files_removed: u64,
    pub dirs_removed: u64,
    pub soft_errors: Vec<SoftError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftError {
    pub path: PathBuf,
    pub reason: String,
}

impl SweepReport {
    pub fn record(&mut self, outcome: VisitOutcome) {
        match outcome {
            VisitOutcome::Purged { removed } => {
                self.files_identified += 1;
                if removed {
                    self.files_removed += 1;
                }
            }
            VisitOutcome::Kept => {}
            VisitOutcome::SoftError { path, reason } => self.soft_error(path, reason),
        }
    }

    pub fn soft_error(&mut self, path: PathBuf, reason: impl Into<String>) {
        self.soft_errors.push(SoftError {
            path,
            reason: reason.into(),
        });
    }

    pub fn dir_removed(&mut self) {
        self.dirs_removed += 1;
    }
}
