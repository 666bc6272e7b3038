use std::path::PathBuf;
use thiserror::Error;

/// The only errors that abort the process; everything else is logged and
/// survived.
#[derive(Debug, Error)]
pub enum PurgeError {
    #[error("invalid age threshold {input:?}: {reason}")]
    Threshold { input: String, reason: String },

    #[error("root path does not exist: {0}")]
    MissingRoot(PathBuf),
}
