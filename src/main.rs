mod cli;
mod config;
mod error;
mod schedule;
mod sweep;

use anyhow::Result;
use cli::Cli;
use config::{Config, FileConfig};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let result = match FileConfig::load() {
        Ok(file) => {
            let config = Config::merge(cli, file);
            init_tracing(&config.log_filter);
            run(&config)
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(config: &Config) -> Result<()> {
    schedule::run(config)?;
    Ok(())
}

fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
