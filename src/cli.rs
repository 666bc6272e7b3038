use clap::Parser;
use std::time::Duration;

use crate::schedule::normalize_age;

const DURATION_EXAMPLES: &str = "\
Duration examples:
    3h6m12s - 3 hours 6 minutes and 12 seconds
    7m11s   - 7 minutes and 11 seconds
    100500s - 100500 seconds
    3h      - 3 hours

A bare number is taken as seconds.";

#[derive(Parser)]
#[command(name = "agesweep")]
#[command(about = "Purge files older than a given age", long_about = None)]
#[command(version)]
#[command(after_help = DURATION_EXAMPLES)]
pub struct Cli {
    #[arg(help = "Root path to scan")]
    pub path: String,

    #[arg(help = "Purge files last modified longer ago than this")]
    pub age: String,

    #[arg(short, long, help = "Log every qualifying file")]
    pub verbose: bool,

    #[arg(short, long, help = "Delete files for real (default is a dry run)")]
    pub delete: bool,

    #[arg(
        short,
        long,
        value_parser = parse_interval,
        help = "Rescan interval; zero or absent runs a single sweep"
    )]
    pub interval: Option<Duration>,
}

fn parse_interval(raw: &str) -> Result<Duration, humantime::DurationError> {
    humantime::parse_duration(&normalize_age(raw))
}

impl Cli {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
