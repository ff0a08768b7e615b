use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Remove empty directories directly below `root`.
///
/// Only the immediate children are inspected. Failures are logged and
/// skipped. Directories listed in `keep` are left alone even when empty.
/// Returns the removed (or, for a dry run, removable) directories.
pub fn remove_empty_dirs(root: &Path, dry_run: bool, keep: &[PathBuf]) -> Vec<PathBuf> {
    let mut removed = Vec::new();

    let entries = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Cleanup could not list {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        if keep.iter().any(|k| k == dir) {
            log::debug!("Keeping {}", dir.display());
            continue;
        }

        match is_empty_dir(dir) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                log::warn!("Cleanup could not read {}: {}", dir.display(), e);
                continue;
            }
        }

        if dry_run {
            log::info!("[DRY RUN] Would remove empty directory {}", dir.display());
            removed.push(dir.to_path_buf());
            continue;
        }

        match fs::remove_dir(dir) {
            Ok(()) => {
                log::info!("Removed empty directory {}", dir.display());
                removed.push(dir.to_path_buf());
            }
            Err(e) => log::warn!("Failed to remove {}: {}", dir.display(), e),
        }
    }

    removed
}

fn is_empty_dir(dir: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(dir)?.next().is_none())
}
