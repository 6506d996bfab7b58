//! Wraps invocation of the `git` binary, grounded on the teacher's
//! `src/git.rs` process-spawning shape and `src/log.rs`'s
//! [`crate::log::CommandSpanExt`] tracing wrapper, combined with the
//! spool-file streaming behavior `diffhouse.git.cli.GitCLI.run` specifies
//! (stdout is written to a scratch file so the caller gets a `Read`
//! without holding the whole output in memory).

use crate::error::GitQuarryError;
use crate::log::CommandSpanExt as _;
use std::io::Read;
use std::io::Seek;
use std::io::Write as _;
use std::path::Path;
use std::path::PathBuf;
use std::process::Stdio;

/// Earliest Git release this crate was verified against: old enough to
/// support `clone --filter=blob:none`, `log --all -p -U0` streaming and
/// `ls-remote --refs`. Overridable via [`crate::config::GitQuarryConfig`]
/// for CI environments pinned to an older Git.
pub const MINIMUM_GIT_VERSION: (u32, u32, u32) = (2, 34, 0);

/// Version below which `ls-remote --branches` is not a recognized alias
/// and `--heads` must be used instead.
const BRANCHES_ALIAS_MINIMUM: (u32, u32, u32) = (2, 46, 0);

pub enum RefKind {
    Branches,
    Tags,
}

/// Drives `git` inside one working directory.
pub struct GitDriver {
    cwd: PathBuf,
    version: (u32, u32, u32),
}

impl GitDriver {
    /// Opens a driver rooted at `cwd`, probing and caching the installed
    /// Git version.
    ///
    /// # Errors
    /// [`GitQuarryError::Environment`] if `cwd` does not exist, is not a
    /// directory, `git` is missing from `PATH`, or its version is below
    /// [`MINIMUM_GIT_VERSION`].
    pub fn new(cwd: impl Into<PathBuf>, minimum_version: (u32, u32, u32)) -> crate::error::Result<Self> {
        let cwd = cwd.into();
        if !cwd.exists() {
            return Err(GitQuarryError::Environment(format!(
                "directory {} does not exist",
                cwd.display()
            )));
        }
        if !cwd.is_dir() {
            return Err(GitQuarryError::Environment(format!(
                "path {} is not a directory",
                cwd.display()
            )));
        }
        let version = probe_version(&cwd)?;
        if version < minimum_version {
            return Err(GitQuarryError::Environment(format!(
                "git version {}.{}.{} or higher required, found {}.{}.{}",
                minimum_version.0,
                minimum_version.1,
                minimum_version.2,
                version.0,
                version.1,
                version.2
            )));
        }
        Ok(Self { cwd, version })
    }

    pub fn version(&self) -> (u32, u32, u32) {
        self.version
    }

    /// Spawns `git` with `args`, streaming stdout into a spool file and
    /// returning a reader over it rewound to the start. stderr is
    /// captured to memory; a non-zero exit becomes
    /// [`GitQuarryError::Git`].
    pub fn run(&self, args: &[&str]) -> crate::error::Result<std::fs::File> {
        let mut command = std::process::Command::new("git");
        command
            .args(args)
            .current_dir(&self.cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.trace_command("run").spawn().map_err(|err| {
            GitQuarryError::Environment(format!("git is not installed or not in PATH: {err}"))
        })?;

        let mut spool = tempfile::tempfile()
            .map_err(|err| GitQuarryError::Parser(format!("failed to create spool file: {err}")))?;
        let mut stdout = child.stdout.take().expect("stdout was piped");
        std::io::copy(&mut stdout, &mut spool)
            .map_err(|err| GitQuarryError::Parser(format!("failed to stream git stdout: {err}")))?;

        let mut stderr_buf = Vec::new();
        if let Some(mut stderr) = child.stderr.take() {
            let _ = stderr.read_to_end(&mut stderr_buf);
        }

        let status = child
            .wait()
            .map_err(|err| GitQuarryError::Parser(format!("failed to wait for git: {err}")))?;
        if !status.success() {
            return Err(GitQuarryError::Git {
                stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
            });
        }

        spool
            .flush()
            .map_err(|err| GitQuarryError::Parser(format!("failed to flush spool file: {err}")))?;
        spool
            .rewind()
            .map_err(|err| GitQuarryError::Parser(format!("failed to rewind spool file: {err}")))?;
        Ok(spool)
    }

    /// Reads small command output (e.g. `ls-remote`) directly to a
    /// string, without a spool file.
    fn run_to_string(&self, args: &[&str]) -> crate::error::Result<String> {
        let mut file = self.run(args)?;
        let mut out = String::new();
        file.read_to_string(&mut out)
            .map_err(|err| GitQuarryError::Parser(format!("invalid UTF-8 from git: {err}")))?;
        Ok(out)
    }

    /// `git ls-remote --refs --branches` (or `--heads` pre-2.46), or
    /// `--tags`.
    pub fn ls_remote(&self, kind: RefKind) -> crate::error::Result<String> {
        let flag = match kind {
            RefKind::Branches if self.version >= BRANCHES_ALIAS_MINIMUM => "--branches",
            RefKind::Branches => "--heads",
            RefKind::Tags => "--tags",
        };
        self.run_to_string(&["ls-remote", "--refs", flag])
    }
}

fn probe_version(cwd: &Path) -> crate::error::Result<(u32, u32, u32)> {
    let output = std::process::Command::new("git")
        .arg("--version")
        .current_dir(cwd)
        .output()
        .map_err(|err| {
            GitQuarryError::Environment(format!("git is not installed or not in PATH: {err}"))
        })?;
    if !output.status.success() {
        return Err(GitQuarryError::Environment(
            "git --version exited non-zero".to_string(),
        ));
    }
    let text = String::from_utf8_lossy(&output.stdout);
    parse_version(&text).ok_or_else(|| {
        GitQuarryError::Environment(format!("could not parse `git --version` output: {text}"))
    })
}

fn parse_version(text: &str) -> Option<(u32, u32, u32)> {
    let prefix = "git version ";
    let rest = text.trim().strip_prefix(prefix)?;
    let version_str = rest.split_whitespace().next()?;
    let mut parts = version_str.split('.');
    let major: u32 = parts.next()?.parse().ok()?;
    let minor: u32 = parts.next()?.parse().ok()?;
    let patch: u32 = parts.next().unwrap_or("0").parse().unwrap_or(0);
    Some((major, minor, patch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_version_string() {
        assert_eq!(parse_version("git version 2.43.0"), Some((2, 43, 0)));
    }

    #[test]
    fn parses_version_with_vendor_suffix() {
        assert_eq!(
            parse_version("git version 2.39.3 (Apple Git-145)"),
            Some((2, 39, 3))
        );
    }

    #[test]
    fn rejects_malformed_output() {
        assert_eq!(parse_version("not git at all"), None);
    }
}
