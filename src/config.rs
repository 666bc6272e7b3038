use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;

/// Defaults read from the optional config file. Command-line flags always
/// win; the file can only flip a default on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub sweep: SweepDefaults,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SweepDefaults {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub delete: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl FileConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("agesweep")
            .join("config.toml")
    }
}

/// Fully merged runtime configuration, immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub age: String,
    pub verbose: bool,
    pub delete: bool,
    /// `None` means a single sweep; a zero interval on the command line is
    /// folded into `None` as well.
    pub rescan_interval: Option<Duration>,
    pub log_filter: String,
}

impl Config {
    pub fn merge(cli: Cli, file: FileConfig) -> Self {
        Self {
            root: PathBuf::from(cli.path),
            age: cli.age,
            verbose: cli.verbose || file.sweep.verbose,
            delete: cli.delete || file.sweep.delete,
            rescan_interval: cli.interval.filter(|d| !d.is_zero()),
            log_filter: file.log.filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn cli(verbose: bool, delete: bool, interval: Option<Duration>) -> Cli {
        Cli {
            path: "/tmp/scratch".to_string(),
            age: "1h".to_string(),
            verbose,
            delete,
            interval,
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = FileConfig::load_from(Path::new("/no/such/config.toml")).unwrap();
        assert!(!config.sweep.verbose);
        assert!(!config.sweep.delete);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[sweep]\nverbose = true\n").unwrap();

        let config = FileConfig::load_from(&path).unwrap();
        assert!(config.sweep.verbose);
        assert!(!config.sweep.delete);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "sweep = nonsense").unwrap();

        assert!(FileConfig::load_from(&path).is_err());
    }

    #[test]
    fn cli_flags_or_with_file_defaults() {
        let mut file = FileConfig::default();
        file.sweep.delete = true;

        let config = Config::merge(cli(true, false, None), file);
        assert!(config.verbose);
        assert!(config.delete);
    }

    #[test]
    fn zero_interval_means_single_shot() {
        let config = Config::merge(
            cli(false, false, Some(Duration::ZERO)),
            FileConfig::default(),
        );
        assert_eq!(config.rescan_interval, None);

        let config = Config::merge(
            cli(false, false, Some(Duration::from_secs(5))),
            FileConfig::default(),
        );
        assert_eq!(config.rescan_interval, Some(Duration::from_secs(5)));
    }
}
