use chrono::{DateTime, Duration as Age, Utc};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::PurgeError;
use crate::sweep::{run_sweep, SweepContext, SweepReport};

/// Outcome of one scheduler cycle. State lives here and is handed back to
/// the loop rather than in anything process-wide.
#[derive(Debug)]
pub struct CycleSummary {
    pub started: DateTime<Utc>,
    pub purge_before: DateTime<Utc>,
    /// `None` when the root was missing and the sweep was skipped.
    pub report: Option<SweepReport>,
    pub elapsed: Duration,
}

/// Append a seconds suffix to bare numbers so `45` reads as `45s`.
pub fn normalize_age(raw: &str) -> String {
    if raw.contains(['s', 'm', 'h']) {
        raw.to_string()
    } else {
        format!("{raw}s")
    }
}

/// A malformed age threshold is the one unrecoverable error in the tool.
pub fn parse_age(raw: &str) -> Result<Age, PurgeError> {
    let threshold = humantime::parse_duration(&normalize_age(raw)).map_err(|e| {
        PurgeError::Threshold {
            input: raw.to_string(),
            reason: e.to_string(),
        }
    })?;

    Age::from_std(threshold).map_err(|_| PurgeError::Threshold {
        input: raw.to_string(),
        reason: "duration out of range".to_string(),
    })
}

/// Run sweeps until the schedule says stop: once for a single-shot config,
/// forever at the configured cadence otherwise.
pub fn run(config: &Config) -> Result<(), PurgeError> {
    if config.rescan_interval.is_none() && !config.root.exists() {
        return Err(PurgeError::MissingRoot(config.root.clone()));
    }

    let threshold = parse_age(&config.age)?;

    loop {
        run_cycle(config, threshold);

        match config.rescan_interval {
            Some(interval) => thread::sleep(interval),
            None => break,
        }
    }

    Ok(())
}

/// One cycle: recompute the purge window, sweep if the root is there, and
/// log the summary. A missing root only costs this cycle.
pub fn run_cycle(config: &Config, threshold: Age) -> CycleSummary {
    let started = Utc::now();
    let clock = Instant::now();
    let purge_before = started
        .checked_sub_signed(threshold)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    info!("scan started {}", started.to_rfc3339());
    info!("purging files modified before {}", purge_before.to_rfc3339());

    let report = if config.root.exists() {
        let ctx = SweepContext {
            purge_before,
            delete: config.delete,
            verbose: config.verbose,
        };
        Some(run_sweep(&config.root, &ctx))
    } else {
        warn!(
            "root {} does not exist, skipping this cycle",
            config.root.display()
        );
        None
    };

    let elapsed = clock.elapsed();

    if let Some(report) = &report {
        if !config.delete {
            info!("dry run, nothing was removed");
        }
        info!(
            "done: {} files identified, {} files and {} directories removed, {} soft errors, {:.2} files/sec",
            report.files_identified,
            report.files_removed,
            report.dirs_removed,
            report.soft_errors.len(),
            throughput(report.files_identified, elapsed)
        );
    }

    CycleSummary {
        started,
        purge_before,
        report,
        elapsed,
    }
}

fn throughput(identified: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        identified as f64 / secs
    } else {
        0.0
    }
}
