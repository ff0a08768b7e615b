use crate::export_core::error::{ExportError, Result};
use crate::export_core::event::{CopyTask, PhotoRecord};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf, is_separator};

/// Subdirectory of an event directory holding RAW files with a developed copy.
pub const RAW_DIR_NAME: &str = "RAW";

/// Directory name for an event: `<YYYY-MM>_<name>`.
pub fn event_dir_name(year_month: &str, event_name: &str) -> String {
    format!("{}_{}", year_month, sanitize_name(event_name))
}

/// Replace path separators so a catalog name can never introduce nested directories.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c == '/' || is_separator(c) { '_' } else { c })
        .collect()
}

/// Directory bookkeeping for one event.
///
/// Remembers which directories have already been ensured so that the `RAW`
/// subdirectory is created at most once per event. Lives only as long as the
/// event is being processed. In dry-run mode nothing is created on disk but
/// directories that would be created are still reported.
#[derive(Debug)]
pub struct EventDirs {
    event_dir: PathBuf,
    dry_run: bool,
    ensured: HashSet<PathBuf>,
    created: Vec<PathBuf>,
}

impl EventDirs {
    pub fn new(event_dir: PathBuf, dry_run: bool) -> Self {
        EventDirs {
            event_dir,
            dry_run,
            ensured: HashSet::new(),
            created: Vec::new(),
        }
    }

    pub fn event_dir(&self) -> &Path {
        &self.event_dir
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.event_dir.join(RAW_DIR_NAME)
    }

    /// Directories created (or, in dry-run mode, that would be created) so far.
    pub fn created(&self) -> &[PathBuf] {
        &self.created
    }

    pub fn ensure_event_dir(&mut self) -> Result<PathBuf> {
        let dir = self.event_dir.clone();
        self.ensure(&dir)?;
        Ok(dir)
    }

    pub fn ensure_raw_dir(&mut self) -> Result<PathBuf> {
        let dir = self.raw_dir();
        self.ensure(&dir)?;
        Ok(dir)
    }

    fn ensure(&mut self, dir: &Path) -> Result<()> {
        if self.ensured.contains(dir) {
            return Ok(());
        }

        if !dir.is_dir() {
            if !self.dry_run {
                fs::create_dir_all(dir).map_err(|e| ExportError::DestinationUnwritable {
                    path: dir.to_path_buf(),
                    source: e,
                })?;
            }
            log::info!("Created directory {}", dir.display());
            self.created.push(dir.to_path_buf());
        }

        self.ensured.insert(dir.to_path_buf());
        Ok(())
    }
}

/// Plan the copies for an event's photos.
///
/// Photos with a backing file go into `RAW/`, and the backing file (when it
/// exists on disk) is copied next to the other photos. Tasks sharing a
/// destination are collapsed to the first one.
pub fn plan_event(dirs: &mut EventDirs, photos: &[PhotoRecord]) -> Result<Vec<CopyTask>> {
    let mut tasks = Vec::new();

    for photo in photos {
        let Some(file_name) = photo.source.file_name() else {
            log::warn!(
                "Skipping photo without a file name: {}",
                photo.source.display()
            );
            continue;
        };

        let destination = match &photo.backing {
            Some(backing) => {
                let raw_dir = dirs.ensure_raw_dir()?;

                if backing.exists() {
                    match backing.file_name() {
                        Some(backing_name) => {
                            tasks.push(CopyTask::new(
                                backing.clone(),
                                dirs.event_dir().join(backing_name),
                            ));
                        }
                        None => log::warn!(
                            "Skipping backing file without a file name: {}",
                            backing.display()
                        ),
                    }
                } else {
                    log::debug!(
                        "Backing file {} for {} does not exist",
                        backing.display(),
                        photo.source.display()
                    );
                }

                raw_dir.join(file_name)
            }
            None => dirs.event_dir().join(file_name),
        };

        tasks.push(CopyTask::new(photo.source.clone(), destination));
    }

    Ok(dedup_by_destination(tasks))
}

/// Drop tasks whose destination is already targeted by an earlier task.
pub fn dedup_by_destination(tasks: Vec<CopyTask>) -> Vec<CopyTask> {
    let mut seen_destinations: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut deduped = Vec::with_capacity(tasks.len());

    for task in tasks {
        match seen_destinations.entry(task.destination.clone()) {
            Entry::Vacant(e) => {
                e.insert(task.source.clone());
                deduped.push(task);
            }
            Entry::Occupied(e) if e.get() == &task.source => {
                log::debug!(
                    "Skipping duplicate copy of {} to {}",
                    task.source.display(),
                    task.destination.display()
                );
            }
            Entry::Occupied(e) => {
                log::warn!(
                    "Skipping {}: destination {} is already taken by {}",
                    task.source.display(),
                    task.destination.display(),
                    e.get().display()
                );
            }
        }
    }

    deduped
}
