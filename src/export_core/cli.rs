use clap::Parser;
use simplelog::LevelFilter;
use std::path::PathBuf;

use crate::export_core::{CompareMode, ExportConfig};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Export Shotwell events into a date-ordered directory tree"
)]
pub struct Cli {
    /// Input Shotwell catalog (photo.db)
    #[arg(short = 'i', long = "input", value_name = "CATALOG")]
    pub input: PathBuf,

    /// Destination to copy events into
    #[arg(short = 'd', long = "dest", value_name = "DIR")]
    pub dest: PathBuf,

    /// Rotate source photos in place using their orientation tag.
    ///
    /// Requires `exiftran` to be installed. Slows the export down.
    #[arg(short = 'r', long)]
    pub rotate: bool,

    /// Compare files by name rather than by content hash (hashing is slower and the default)
    #[arg(short = 'f', long)]
    pub compare_by_name: bool,

    /// Show what would be copied without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable file logging to shotwell-export.log
    #[arg(long = "log")]
    pub log: bool,

    /// Log level for file logging (debug, info, warn, error)
    #[arg(long, default_value_t = LevelFilter::Debug)]
    pub log_level: LevelFilter,
}

impl Cli {
    /// Build the run configuration from the parsed arguments.
    pub fn export_config(&self) -> ExportConfig {
        let compare_mode = if self.compare_by_name {
            CompareMode::Name
        } else {
            CompareMode::Content
        };

        ExportConfig::new(&self.input, &self.dest)
            .with_rotate(self.rotate)
            .with_compare_mode(compare_mode)
            .with_dry_run(self.dry_run)
    }
}
