pub mod catalog;
pub mod cleanup;
pub mod cli;
pub mod copier;
pub mod error;
pub mod event;
pub mod export;
pub mod layout;
pub mod rotate;

pub use catalog::Catalog;
pub use cleanup::remove_empty_dirs;
pub use cli::Cli;
pub use copier::{CompareMode, CopyCounts, CopyOutcome, DedupCopier, hash_file};
pub use error::ExportError;
pub use event::{CopyTask, Event, PhotoRecord, event_year_month};
pub use export::{
    EventOutcome, EventReport, ExportConfig, ExportSummary, Exporter, SkipReason, get_local_tz,
};
pub use layout::{EventDirs, RAW_DIR_NAME, event_dir_name, plan_event};
pub use rotate::{Exiftran, Rotate, exiftran_available};
