use crate::export_core::catalog::Catalog;
use crate::export_core::cleanup::remove_empty_dirs;
use crate::export_core::copier::{CompareMode, CopyCounts, DedupCopier};
use crate::export_core::error::{ExportError, Result};
use crate::export_core::event::{Event, PhotoRecord, event_year_month};
use crate::export_core::layout::{EventDirs, event_dir_name, plan_event};
use crate::export_core::rotate::{Exiftran, Rotate};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use time::{OffsetDateTime, UtcOffset};

const EVENT_SEPARATOR: &str = "======================";

/// Everything a single export run needs to know.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub catalog_path: PathBuf,
    pub destination: PathBuf,
    pub rotate: bool,
    pub compare_mode: CompareMode,
    pub dry_run: bool,
    /// Offset used to turn exposure times into `YYYY-MM` directory prefixes.
    pub utc_offset: UtcOffset,
}

impl ExportConfig {
    pub fn new(catalog_path: &Path, destination: &Path) -> Self {
        ExportConfig {
            catalog_path: catalog_path.to_path_buf(),
            destination: destination.to_path_buf(),
            rotate: false,
            compare_mode: CompareMode::default(),
            dry_run: false,
            utc_offset: get_local_tz(),
        }
    }

    pub fn with_rotate(mut self, rotate: bool) -> Self {
        self.rotate = rotate;
        self
    }

    pub fn with_compare_mode(mut self, compare_mode: CompareMode) -> Self {
        self.compare_mode = compare_mode;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_utc_offset(mut self, utc_offset: UtcOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }
}

/// Local UTC offset, falling back to UTC when it cannot be determined.
pub fn get_local_tz() -> UtcOffset {
    OffsetDateTime::now_local()
        .map(|dt| dt.offset())
        .unwrap_or_else(|_| {
            log::warn!("Failed to get local time offset, using UTC instead.");
            UtcOffset::UTC
        })
}

/// Why an event was not exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoName,
    NoDatedPhotos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Skipped(SkipReason),
    Processed {
        directory: PathBuf,
        counts: CopyCounts,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventReport {
    pub event_id: i64,
    pub name: Option<String>,
    pub outcome: EventOutcome,
}

/// Result of an export run.
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub events: Vec<EventReport>,
    pub removed_dirs: Vec<PathBuf>,
}

impl ExportSummary {
    pub fn event(&self, event_id: i64) -> Option<&EventReport> {
        self.events.iter().find(|r| r.event_id == event_id)
    }

    /// Copy counts of a processed event.
    pub fn counts(&self, event_id: i64) -> Option<CopyCounts> {
        match self.event(event_id)?.outcome {
            EventOutcome::Processed { counts, .. } => Some(counts),
            EventOutcome::Skipped(_) => None,
        }
    }
}

/// Drives an export: catalog events in, event directories out.
///
/// Progress text goes to `out`; diagnostics go through `log`.
pub struct Exporter<W: Write> {
    config: ExportConfig,
    rotator: Box<dyn Rotate>,
    out: W,
}

impl<W: Write> Exporter<W> {
    pub fn new(config: ExportConfig, out: W) -> Self {
        Exporter {
            config,
            rotator: Box::new(Exiftran),
            out,
        }
    }

    /// Replace the rotation tool.
    pub fn with_rotator<R: Rotate + 'static>(mut self, rotator: R) -> Self {
        self.rotator = Box::new(rotator);
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Export every catalog event, then prune empty event directories.
    pub fn run(&mut self) -> Result<ExportSummary> {
        let catalog = Catalog::open(&self.config.catalog_path)?;

        let dry_run_prefix = if self.config.dry_run { "[DRY RUN] " } else { "" };
        writeln!(
            self.out,
            "{}Going to output to {}",
            dry_run_prefix,
            self.config.destination.display()
        )?;
        writeln!(self.out, "Going to read catalog from {}", catalog.path().display())?;
        writeln!(self.out, "Rotation of source photos? {}", self.config.rotate)?;
        writeln!(self.out, "Compare files by {}", self.config.compare_mode)?;

        if !self.config.dry_run {
            fs::create_dir_all(&self.config.destination).map_err(|e| {
                ExportError::DestinationUnwritable {
                    path: self.config.destination.clone(),
                    source: e,
                }
            })?;
        }

        let mut summary = ExportSummary::default();

        for event in catalog.events()? {
            let outcome = self.export_event(&catalog, &event)?;
            summary.events.push(EventReport {
                event_id: event.id,
                name: event.name,
                outcome,
            });
        }

        // Event directories stay empty in a dry run
        let pending: Vec<PathBuf> = if self.config.dry_run {
            summary
                .events
                .iter()
                .filter_map(|report| match &report.outcome {
                    EventOutcome::Processed { directory, .. } => Some(directory.clone()),
                    EventOutcome::Skipped(_) => None,
                })
                .collect()
        } else {
            Vec::new()
        };
        summary.removed_dirs =
            remove_empty_dirs(&self.config.destination, self.config.dry_run, &pending);
        for dir in &summary.removed_dirs {
            writeln!(
                self.out,
                "{}Removed empty directory '{}'",
                dry_run_prefix,
                dir.display()
            )?;
        }

        log::info!(
            "Export finished: {} events read, {} empty directories removed",
            summary.events.len(),
            summary.removed_dirs.len()
        );

        Ok(summary)
    }

    fn export_event(&mut self, catalog: &Catalog, event: &Event) -> Result<EventOutcome> {
        let Some(name) = event.display_name() else {
            log::info!("Skipping event {} without a name", event.id);
            return Ok(EventOutcome::Skipped(SkipReason::NoName));
        };

        writeln!(self.out, "{}", EVENT_SEPARATOR)?;
        writeln!(self.out, "Dealing with event '{}'", name)?;

        let Some(exposure_time) = catalog.earliest_exposure(event.id)? else {
            writeln!(
                self.out,
                "Seems no files present in catalog that match this event; skipped"
            )?;
            log::info!("Skipping event {} ({}) without dated photos", event.id, name);
            return Ok(EventOutcome::Skipped(SkipReason::NoDatedPhotos));
        };

        let earliest = OffsetDateTime::from_unix_timestamp(exposure_time)
            .ok()
            .and_then(|ts| ts.checked_to_offset(self.config.utc_offset))
            .ok_or(ExportError::InvalidTimestamp {
                event_id: event.id,
                value: exposure_time,
            })?;
        let year_month = event_year_month(&earliest);
        writeln!(self.out, "Identified event date '{}'", year_month)?;

        let event_dir = self
            .config
            .destination
            .join(event_dir_name(&year_month, name));
        let mut dirs = EventDirs::new(event_dir, self.config.dry_run);
        dirs.ensure_event_dir()?;

        let photos = catalog.photos(event.id)?;
        if self.config.rotate {
            self.rotate_photos(&photos);
        }

        let tasks = plan_event(&mut dirs, &photos)?;
        for dir in dirs.created() {
            writeln!(self.out, "Creating '{}'", dir.display())?;
        }

        let copier = DedupCopier::new(self.config.compare_mode, self.config.dry_run);
        let mut counts = CopyCounts::default();
        for task in &tasks {
            let outcome = copier.execute(task)?;
            write!(self.out, "{}", outcome.marker())?;
            self.out.flush()?;
            counts.record(outcome);
        }

        writeln!(self.out)?;
        writeln!(self.out, "{}", counts)?;
        log::info!(
            "Event {} ({}): {} copied, {} already present",
            event.id,
            name,
            counts.copied,
            counts.present
        );

        Ok(EventOutcome::Processed {
            directory: dirs.event_dir().to_path_buf(),
            counts,
        })
    }

    fn rotate_photos(&self, photos: &[PhotoRecord]) {
        for photo in photos {
            if self.config.dry_run {
                log::debug!("[DRY RUN] Would rotate {}", photo.source.display());
                continue;
            }
            if let Err(e) = self.rotator.rotate(&photo.source) {
                log::warn!("Failed to rotate {}: {}", photo.source.display(), e);
            }
        }
    }
}
