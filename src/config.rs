//! Ambient configuration: tunables that the spec leaves as fixed
//! constants but that a deployed crate benefits from overriding without
//! recompiling — the minimum supported Git version, stream chunk sizes,
//! and the temp-directory prefix used by [`crate::clone`] and
//! [`crate::cleanup`].
//!
//! Grounded on the teacher's layered `config.rs`/`config_loader.rs`
//! (serde + toml, with environment overrides), scaled down: this crate
//! has no submodule/remote-mapping configuration to express, so there is
//! a single flat struct rather than the teacher's `ConfigMap` layering.

use serde::Deserialize;
use serde::Serialize;

/// Tag prepended to every temporary directory and spool file this crate
/// creates, so the residual-cleanup sweep can find them later.
pub const PACKAGE_TAG: &str = "git-quarry";

/// Chunk size used by [`crate::stream::StreamSplitter`] for commit
/// metadata streams (name-status, numstat, the commit pretty-format).
pub const METADATA_CHUNK_SIZE: usize = 10_000;

/// Chunk size used for `-p` diff streams, where a single hunk can exceed
/// 1 MB.
pub const DIFF_CHUNK_SIZE: usize = 10_000_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitQuarryConfig {
    /// Overrides [`crate::git::MINIMUM_GIT_VERSION`], as `"major.minor.patch"`.
    pub minimum_git_version: Option<String>,
    pub metadata_chunk_size: usize,
    pub diff_chunk_size: usize,
}

impl Default for GitQuarryConfig {
    fn default() -> Self {
        Self {
            minimum_git_version: None,
            metadata_chunk_size: METADATA_CHUNK_SIZE,
            diff_chunk_size: DIFF_CHUNK_SIZE,
        }
    }
}

impl GitQuarryConfig {
    /// Loads configuration from `path` (TOML), falling back to defaults
    /// for any field the file omits, then applies environment overrides.
    pub fn load(path: Option<&std::path::Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|err| anyhow::anyhow!("failed to read {}: {err}", path.display()))?;
                toml::from_str(&text)
                    .map_err(|err| anyhow::anyhow!("failed to parse {}: {err}", path.display()))?
            }
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(version) = std::env::var("GIT_QUARRY_MINIMUM_GIT_VERSION") {
            self.minimum_git_version = Some(version);
        }
    }

    /// Parses [`Self::minimum_git_version`] into the `(major, minor, patch)`
    /// triple [`crate::git::GitDriver::new`] expects, falling back to the
    /// crate's built-in minimum when unset or malformed.
    pub fn minimum_git_version_tuple(&self) -> (u32, u32, u32) {
        self.minimum_git_version
            .as_deref()
            .and_then(parse_version_tuple)
            .unwrap_or(crate::git::MINIMUM_GIT_VERSION)
    }
}

fn parse_version_tuple(s: &str) -> Option<(u32, u32, u32)> {
    let mut parts = s.trim().split('.');
    let major: u32 = parts.next()?.parse().ok()?;
    let minor: u32 = parts.next()?.parse().ok()?;
    let patch: u32 = parts.next().unwrap_or("0").parse().unwrap_or(0);
    Some((major, minor, patch))
}
