use crate::export_core::error::{ExportError, Result};
use crate::export_core::event::CopyTask;
use base64::{Engine, engine::general_purpose};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// How an existing destination file is compared with its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareMode {
    /// Copy when the SHA-256 digests differ.
    #[default]
    Content,
    /// Copy only when the destination does not exist.
    Name,
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareMode::Content => write!(f, "content hash"),
            CompareMode::Name => write!(f, "file name"),
        }
    }
}

/// What happened to a single copy task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Present,
}

impl CopyOutcome {
    /// Progress marker printed for this outcome.
    pub fn marker(&self) -> char {
        match self {
            CopyOutcome::Copied => '.',
            CopyOutcome::Present => 'e',
        }
    }
}

/// Per-event copy counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyCounts {
    pub copied: usize,
    pub present: usize,
}

impl CopyCounts {
    pub fn record(&mut self, outcome: CopyOutcome) {
        match outcome {
            CopyOutcome::Copied => self.copied += 1,
            CopyOutcome::Present => self.present += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.copied + self.present
    }
}

impl fmt::Display for CopyCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Copied {} files. (Ignored {} files as they already existed)",
            self.copied, self.present
        )
    }
}

/// Calculate the SHA256 hash of a file at the given path and returns it as base64.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    let hash = hasher.finalize();
    Ok(general_purpose::STANDARD.encode(hash))
}

fn file_digest(path: &Path) -> Option<String> {
    match hash_file(path) {
        Ok(hash) => Some(hash),
        Err(e) => {
            log::debug!("Could not hash {}: {}", path.display(), e);
            None
        }
    }
}

/// Decide whether `task` has to be copied under `mode`.
///
/// A file that cannot be hashed never matches, so an unreadable source is
/// always attempted (and then fails loudly) rather than skipped.
pub fn copy_needed(task: &CopyTask, mode: CompareMode) -> bool {
    if !task.destination.exists() {
        return true;
    }

    match mode {
        CompareMode::Name => false,
        CompareMode::Content => {
            match (file_digest(&task.source), file_digest(&task.destination)) {
                (Some(source), Some(destination)) => source != destination,
                _ => true,
            }
        }
    }
}

/// Copy `source` over `destination` byte for byte.
pub fn copy_file(source: &Path, destination: &Path) -> Result<u64> {
    let mut reader = fs::File::open(source).map_err(|e| ExportError::SourceUnreadable {
        path: source.to_path_buf(),
        source: e,
    })?;
    let mut writer =
        fs::File::create(destination).map_err(|e| ExportError::DestinationUnwritable {
            path: destination.to_path_buf(),
            source: e,
        })?;

    io::copy(&mut reader, &mut writer).map_err(|e| ExportError::CopyFailed {
        from: source.to_path_buf(),
        to: destination.to_path_buf(),
        error: e,
    })
}

/// Executes copy tasks, skipping destinations that are already up to date.
#[derive(Debug, Clone, Copy)]
pub struct DedupCopier {
    mode: CompareMode,
    dry_run: bool,
}

impl DedupCopier {
    pub fn new(mode: CompareMode, dry_run: bool) -> Self {
        DedupCopier { mode, dry_run }
    }

    pub fn execute(&self, task: &CopyTask) -> Result<CopyOutcome> {
        if !copy_needed(task, self.mode) {
            log::debug!("Already present: {}", task.destination.display());
            return Ok(CopyOutcome::Present);
        }

        if self.dry_run {
            log::debug!(
                "[DRY RUN] Would copy {} -> {}",
                task.source.display(),
                task.destination.display()
            );
        } else {
            let bytes = copy_file(&task.source, &task.destination)?;
            log::debug!(
                "Copied {} -> {} ({} bytes)",
                task.source.display(),
                task.destination.display(),
                bytes
            );
        }

        Ok(CopyOutcome::Copied)
    }
}
