//! `RepoFacade`, grounded on `diffhouse.api.repo.Repo` (the concrete Python
//! this spec distills) and the teacher's own scoped-resource idiom
//! ([`crate::log::CommandSpanScope`], [`crate::clone::CloneManager`]).
//!
//! A lifecycle-gated wrapper exposing all five pipelines behind explicit
//! `constructed → active → disposed` states (spec.md §4.10). The Python
//! original enforces the state machine at runtime (`_require_active` raises
//! `NotClonedError`) because nothing stops a caller from stashing a
//! generator and reading it after `__exit__` has run. In Rust, every
//! pipeline accessor below borrows `&self` for the lifetime of its returned
//! iterator, so a leaked iterator cannot outlive the facade, and calling
//! [`RepoFacade::dispose`] while one is alive is rejected at compile time —
//! a strictly stronger guarantee than the spec's runtime check, achieved
//! for free from the borrow checker rather than hand-rolled. The explicit
//! `RepoState` enum is kept anyway (rather than a typestate generic) because
//! `clone()`/`dispose()` must remain callable imperatively, matching the
//! Python API's `clone()`/`dispose()` pair as an alternative to `with`.

use crate::clone::CloneManager;
use crate::error::GitQuarryError;
use crate::git::GitDriver;
use crate::model::Branch;
use crate::model::Commit;
use crate::model::Diff;
use crate::model::FileMod;
use crate::model::Tag;
use crate::pipelines::commit::extract_commits;
use crate::pipelines::diff::extract_diffs;
use crate::pipelines::filemod::extract_filemods;
use crate::pipelines::refs::extract_branches;
use crate::pipelines::refs::extract_tags;

/// One fully-cloned, still-active repository.
struct ActiveRepo {
    // Kept alive only for its `Drop`; never read directly.
    #[allow(dead_code)]
    clone: CloneManager,
    driver: GitDriver,
}

enum RepoState {
    Constructed,
    Active(ActiveRepo),
    Disposed,
}

/// Wrapper around a Git repository: the main entry point for mining with
/// `git-quarry`.
pub struct RepoFacade {
    source: String,
    blobs: bool,
    minimum_git_version: (u32, u32, u32),
    metadata_chunk_size: usize,
    diff_chunk_size: usize,
    state: RepoState,
}

impl RepoFacade {
    /// Constructs a facade for `source` without cloning anything yet.
    ///
    /// `source` may be a remote URL or a local path; if it does not parse
    /// as a URL, it is resolved to a `file://` URI pointing at its
    /// canonicalized location, mirroring the Python original's
    /// `validators.url(source)` check.
    ///
    /// `blobs = false` requests a bare, blob-filtered clone ("metadata
    /// only"); [`Self::filemods`] and [`Self::diffs`] are then unavailable.
    pub fn new(source: &str, blobs: bool) -> Self {
        Self::with_minimum_git_version(source, blobs, crate::git::MINIMUM_GIT_VERSION)
    }

    /// Like [`Self::new`], overriding the minimum accepted `git` version
    /// (see [`crate::config::GitQuarryConfig::minimum_git_version_tuple`]).
    pub fn with_minimum_git_version(
        source: &str,
        blobs: bool,
        minimum_git_version: (u32, u32, u32),
    ) -> Self {
        Self {
            source: resolve_source(source),
            blobs,
            minimum_git_version,
            metadata_chunk_size: crate::config::METADATA_CHUNK_SIZE,
            diff_chunk_size: crate::config::DIFF_CHUNK_SIZE,
            state: RepoState::Constructed,
        }
    }

    /// Like [`Self::with_minimum_git_version`], additionally overriding the
    /// [`crate::stream::StreamSplitter`] chunk sizes used by the metadata
    /// and `-p` diff pipelines (see [`crate::config::GitQuarryConfig`]).
    pub fn with_config(source: &str, blobs: bool, config: &crate::config::GitQuarryConfig) -> Self {
        Self {
            metadata_chunk_size: config.metadata_chunk_size,
            diff_chunk_size: config.diff_chunk_size,
            ..Self::with_minimum_git_version(source, blobs, config.minimum_git_version_tuple())
        }
    }

    /// Location the repository was (or will be) cloned from: either the
    /// original URL or a `file://` URI for a local path.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn blobs(&self) -> bool {
        self.blobs
    }

    /// Materializes the temporary clone, entering the `active` state.
    /// Idempotent: calling `clone()` again while already active is a no-op.
    ///
    /// An alternative to scoped usage; call [`Self::dispose`] to release
    /// resources when done with the repository.
    pub fn clone_repo(&mut self) -> crate::error::Result<&mut Self> {
        if matches!(self.state, RepoState::Active(_)) {
            return Ok(self);
        }
        let clone = CloneManager::new(&self.source, !self.blobs, self.minimum_git_version)?;
        let driver = GitDriver::new(clone.path(), self.minimum_git_version)?;
        self.state = RepoState::Active(ActiveRepo { clone, driver });
        Ok(self)
    }

    /// Releases the temporary clone. Only needed when [`Self::clone_repo`]
    /// was used directly rather than relying on `Drop`.
    pub fn dispose(&mut self) {
        if let RepoState::Active(active) = std::mem::replace(&mut self.state, RepoState::Disposed)
        {
            active.clone.dispose();
        }
    }

    fn driver(&self) -> crate::error::Result<&GitDriver> {
        match &self.state {
            RepoState::Active(active) => Ok(&active.driver),
            RepoState::Constructed | RepoState::Disposed => Err(GitQuarryError::NotCloned),
        }
    }

    fn require_blobs(&self) -> crate::error::Result<()> {
        if self.blobs {
            Ok(())
        } else {
            Err(GitQuarryError::Filter {
                filter_name: "blobs".to_string(),
            })
        }
    }

    /// Branches of the repository. Requires `active`.
    pub fn branches(&self) -> crate::error::Result<Vec<Branch>> {
        extract_branches(self.driver()?)
    }

    /// Tag names of the repository. Requires `active`.
    pub fn tags(&self) -> crate::error::Result<Vec<Tag>> {
        extract_tags(self.driver()?)
    }

    /// Commit history of the repository. Requires `active`. Shortstat
    /// fields are populated iff this facade was constructed with
    /// `blobs = true`.
    pub fn commits(&self) -> crate::error::Result<impl Iterator<Item = Commit> + '_> {
        extract_commits(self.driver()?, self.blobs, self.metadata_chunk_size)
    }

    /// File change metadata for every commit. Requires `active` and
    /// `blobs = true`.
    pub fn filemods(&self) -> crate::error::Result<impl Iterator<Item = FileMod> + '_> {
        self.require_blobs()?;
        extract_filemods(self.driver()?, self.metadata_chunk_size)
    }

    /// Line-level diff hunks for every commit. Requires `active` and
    /// `blobs = true`.
    pub fn diffs(&self) -> crate::error::Result<impl Iterator<Item = Diff> + '_> {
        self.require_blobs()?;
        extract_diffs(self.driver()?, self.diff_chunk_size)
    }
}

impl Drop for RepoFacade {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Resolves `source` to a URL, converting a local path to a `file://` URI
/// when it doesn't already parse as one.
fn resolve_source(source: &str) -> String {
    let trimmed = source.trim();
    if url::Url::parse(trimmed).is_ok() {
        return trimmed.to_string();
    }
    let path = std::path::Path::new(trimmed);
    let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    url::Url::from_file_path(&absolute)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_url_is_kept_unchanged() {
        assert_eq!(
            resolve_source("https://example.com/repo.git"),
            "https://example.com/repo.git"
        );
    }

    #[test]
    fn local_path_is_resolved_to_a_file_uri() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_source(dir.path().to_str().unwrap());
        assert!(resolved.starts_with("file://"));
    }

    #[test]
    fn data_access_before_cloning_is_a_lifecycle_error() {
        let repo = RepoFacade::new("https://example.invalid/repo.git", true);
        assert!(matches!(repo.branches(), Err(GitQuarryError::NotCloned)));
    }

    #[test]
    fn filemods_without_blobs_is_a_filter_error() {
        let mut repo = RepoFacade::new("https://example.invalid/repo.git", false);
        // Force into a pseudo-active state isn't possible without a real
        // clone; the blobs check runs before the active check, so this is
        // still exercised correctly even from `constructed`.
        assert!(matches!(
            repo.filemods(),
            Err(GitQuarryError::Filter { .. })
        ));
        let _ = repo.dispose();
    }

    #[test]
    fn with_config_threads_chunk_sizes_and_minimum_version() {
        let mut config = crate::config::GitQuarryConfig::default();
        config.metadata_chunk_size = 123;
        config.diff_chunk_size = 456;
        config.minimum_git_version = Some("2.40.0".to_string());

        let repo = RepoFacade::with_config("https://example.invalid/repo.git", true, &config);
        assert_eq!(repo.metadata_chunk_size, 123);
        assert_eq!(repo.diff_chunk_size, 456);
        assert_eq!(repo.minimum_git_version, (2, 40, 0));
    }
}
