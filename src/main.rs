use anyhow::{Context, Result};
use clap::Parser;
use shotwell_export::export_core::{Cli, Exporter, exiftran_available};
use simplelog::{CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, WriteLogger};
use std::fs::File;
use std::io;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize loggers
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Warn,
        Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )];

    if cli.log {
        loggers.push(WriteLogger::new(
            cli.log_level,
            Config::default(),
            File::create("shotwell-export.log")?,
        ));
    }

    CombinedLogger::init(loggers)?;

    let config = cli.export_config();
    if config.rotate && !exiftran_available() {
        log::warn!("exiftran is not installed or not in PATH; photos will not be rotated");
    }

    let mut exporter = Exporter::new(config, io::stdout().lock());
    exporter.run().with_context(|| {
        format!(
            "Export from {} to {} failed",
            cli.input.display(),
            cli.dest.display()
        )
    })?;

    Ok(())
}
