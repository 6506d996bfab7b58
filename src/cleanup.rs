//! Residual-cleanup sweep, grounded on `diffhouse.utils.cleanup` (the
//! final, `src/diffhouse/utils/cleanup.py` revision).
//!
//! The only process-wide surface in the crate. Idempotent, silent on
//! empty runs, and warn-but-not-fail on permission errors: a half-cleaned
//! leftover from a killed process must never turn into a hard failure for
//! an unrelated run.

use crate::config::PACKAGE_TAG;
use std::path::Path;

/// Removes any file or directory under the system temporary directory
/// whose name starts with the package tag (`git-quarry_`). Intended to be
/// called once at process start.
pub fn remove_residual_resources() {
    sweep(&std::env::temp_dir());
}

fn sweep(temp_dir: &Path) {
    let prefix = format!("{PACKAGE_TAG}_");

    let entries = match std::fs::read_dir(temp_dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("Failed to scan {}: {err}", temp_dir.display());
            return;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.starts_with(&prefix) {
            continue;
        }
        let path = entry.path();
        log::info!("Removing residual resource at {}", path.display());
        let result = if path.is_dir() {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };
        if let Err(err) = result {
            log::warn!(
                "Failed to remove residual resource at {}: {err}",
                path.display()
            );
        }
    }
}
