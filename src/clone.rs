//! Scoped acquisition of a temporary working copy, grounded on
//! `diffhouse.git.cloning.TempClone`.

use crate::config::PACKAGE_TAG;
use crate::error::GitQuarryError;
use crate::git::GitDriver;
use std::path::Path;

/// A local clone of a git repository living in a temporary directory.
///
/// Cleanup is guaranteed on every exit path: `CloneManager` owns a
/// [`tempfile::TempDir`], whose `Drop` recursively removes the directory
/// regardless of how the owning scope ends (normal return, early `?`, or
/// panic unwinding).
pub struct CloneManager {
    temp_dir: tempfile::TempDir,
}

impl CloneManager {
    /// Clones `source` into a fresh temporary directory.
    ///
    /// `shallow = true` clones bare with `--filter=blob:none` ("metadata
    /// only, no blobs"); this disables any pipeline that needs file
    /// contents ([`crate::pipelines::filemod`], [`crate::pipelines::diff`]).
    pub fn new(
        source: &str,
        shallow: bool,
        minimum_git_version: (u32, u32, u32),
    ) -> crate::error::Result<Self> {
        let temp_dir = tempfile::Builder::new()
            .prefix(&format!("{PACKAGE_TAG}_"))
            .tempdir()
            .map_err(|err| {
                GitQuarryError::Parser(format!("failed to create temporary directory: {err}"))
            })?;

        log::info!("Cloning from {source}");
        let driver = GitDriver::new(temp_dir.path(), minimum_git_version)?;
        let mut args = vec!["clone"];
        if shallow {
            args.push("--bare");
            args.push("--filter=blob:none");
        }
        args.push(source);
        args.push(".");
        driver.run(&args)?;
        log::debug!("Cloned {source} to {}", temp_dir.path().display());

        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Consumes the manager and removes the temporary directory,
    /// clearing any read-only bits under `.git/objects` first (Windows
    /// marks packed object files read-only, which would otherwise make
    /// removal fail).
    pub fn dispose(self) {
        #[cfg(windows)]
        clear_readonly_recursively(&self.temp_dir.path().join(".git").join("objects"));
        drop(self.temp_dir);
    }
}

#[cfg(windows)]
fn clear_readonly_recursively(dir: &Path) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            clear_readonly_recursively(&path);
        } else if let Ok(metadata) = path.metadata() {
            let mut permissions = metadata.permissions();
            if permissions.readonly() {
                permissions.set_readonly(false);
                let _ = std::fs::set_permissions(&path, permissions);
            }
        }
    }
}
