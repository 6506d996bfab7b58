use std::ffi::OsStr;
use std::ffi::OsString;
use std::ops::Deref;

#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
const NULL_DEVICE: &str = "/dev/null";

/// Like [`git_quarry::git::GitDriver::run`] but also sets environment
/// variables for deterministic testing.
pub fn git_command_for_testing(repo: impl AsRef<std::ffi::OsStr>) -> assert_cmd::Command {
    // Inspired by gix-testtools v0.16.1 configure_command().
    let mut command = assert_cmd::Command::new("git");
    command.args([std::ffi::OsStr::new("-C"), repo.as_ref()]);
    apply_git_env(&mut command);
    command
}

/// The `git-quarry` binary under test, with the same deterministic git
/// environment as [`git_command_for_testing`].
pub fn cargo_bin_git_quarry_for_testing() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("git-quarry").unwrap()
}

fn apply_git_env(command: &mut assert_cmd::Command) {
    // Inspired by gix-testtools v0.16.1 configure_command().
    command
        .env_remove("GIT_DIR")
        .env_remove("GIT_INDEX_FILE")
        .env_remove("GIT_OBJECT_DIRECTORY")
        .env_remove("GIT_ALTERNATE_OBJECT_DIRECTORIES")
        .env_remove("GIT_WORK_TREE")
        .env_remove("GIT_COMMON_DIR")
        .env_remove("GIT_ASKPASS")
        .env_remove("SSH_ASKPASS")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", NULL_DEVICE)
        .env("GIT_TERMINAL_PROMPT", "false")
        .env("GIT_AUTHOR_NAME", "A Name")
        .env("GIT_AUTHOR_EMAIL", "a@no.example")
        .env("GIT_AUTHOR_DATE", "2023-01-02 03:04:05 +0100")
        .env("GIT_COMMITTER_NAME", "C Name")
        .env("GIT_COMMITTER_EMAIL", "c@no.example")
        .env("GIT_COMMITTER_DATE", "2023-06-07 08:09:10 +0100")
        .env("GIT_CONFIG_COUNT", "0");
}

pub enum MaybePermanentTempDir {
    Keep(std::path::PathBuf),
    Discard(tempfile::TempDir),
}

impl MaybePermanentTempDir {
    /// Creates a new temporary directory, that may be kept permanently.
    ///
    /// The thread name is used because rust test sets the thread name to the
    /// test name, so why not use that for test purpose.
    ///
    /// See also [`maybe_keep_tempdir`].
    pub fn create() -> Self {
        let prefix = if let Some(name) = std::thread::current().name() {
            &format!("git_quarry-{}", name.replace("::", "-"))
        } else {
            "git_quarry"
        };
        let tempdir = tempfile::TempDir::with_prefix(prefix)
            .expect("successful temporary directory creation");
        maybe_keep_tempdir(tempdir)
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            MaybePermanentTempDir::Keep(path) => path,
            MaybePermanentTempDir::Discard(tempdir) => tempdir.path(),
        }
    }
}

impl Deref for MaybePermanentTempDir {
    type Target = std::path::Path;

    fn deref(&self) -> &Self::Target {
        self.path()
    }
}

impl AsRef<std::path::Path> for MaybePermanentTempDir {
    fn as_ref(&self) -> &std::path::Path {
        self.path()
    }
}

impl AsRef<OsStr> for MaybePermanentTempDir {
    fn as_ref(&self) -> &OsStr {
        self.path().as_os_str()
    }
}

impl From<tempfile::TempDir> for MaybePermanentTempDir {
    /// Persist a temporary directory to disk if the environment variable
    /// `GIT_QUARRY_KEEP_TEMP_DIR` is set to `1`,
    ///
    /// # Examples
    ///
    /// See the unit tests.
    fn from(tempdir: tempfile::TempDir) -> Self {
        let keep_var = std::env::var_os("GIT_QUARRY_KEEP_TEMP_DIR");
        maybe_keep_tempdir_impl(tempdir, keep_var)
    }
}

/// Persist a temporary directory to disk if the environment variable
/// `GIT_QUARRY_KEEP_TEMP_DIR` is set to `1`.
///
/// To find the temporary directory, run one test at a time or make it fail and find
/// the path on stderr.
///
/// # Examples
///
/// See the unit tests.
pub fn maybe_keep_tempdir(tempdir: tempfile::TempDir) -> MaybePermanentTempDir {
    MaybePermanentTempDir::from(tempdir)
}

pub(crate) fn maybe_keep_tempdir_impl(
    tempdir: tempfile::TempDir,
    keep_var: Option<OsString>,
) -> MaybePermanentTempDir {
    if keep_var == Some("1".into()) {
        let tempdir = tempdir.keep();
        eprintln!("Keeping temporary directory: {}", tempdir.display());
        MaybePermanentTempDir::Keep(tempdir)
    } else {
        MaybePermanentTempDir::Discard(tempdir)
    }
}

/// A scratch git repository with a known history, built by shelling out to
/// `git` the same way a human would. Used by the integration suite to
/// exercise the boundary behaviors spec.md §8 calls out: a root commit, a
/// rename-with-edit, a merge, a binary file, an empty commit, and a commit
/// message with an embedded blank-line-free newline.
pub struct ScratchRepo {
    dir: MaybePermanentTempDir,
}

impl ScratchRepo {
    /// `git init`s a fresh repository in a new temporary directory.
    pub fn init() -> Self {
        let dir = MaybePermanentTempDir::create();
        git_command_for_testing(dir.path())
            .args(["init", "--initial-branch=main"])
            .assert()
            .success();
        Self { dir }
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    fn git(&self) -> assert_cmd::Command {
        git_command_for_testing(self.path())
    }

    /// Writes `contents` to `relative_path`, creating parent directories as
    /// needed.
    pub fn write_file(&self, relative_path: &str, contents: impl AsRef<[u8]>) -> &Self {
        let full_path = self.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, contents).unwrap();
        self
    }

    /// `git add <relative_path>`.
    pub fn add(&self, relative_path: &str) -> &Self {
        self.git().args(["add", relative_path]).assert().success();
        self
    }

    /// `git add -A`.
    pub fn add_all(&self) -> &Self {
        self.git().args(["add", "-A"]).assert().success();
        self
    }

    /// `git commit -m <message>`, returning the new commit's full hash.
    pub fn commit(&self, message: &str) -> String {
        self.git()
            .args(["commit", "--allow-empty", "-m", message])
            .assert()
            .success();
        self.head_hash()
    }

    /// `git checkout -b <name>`.
    pub fn new_branch(&self, name: &str) -> &Self {
        self.git()
            .args(["checkout", "-b", name])
            .assert()
            .success();
        self
    }

    /// `git checkout <name>`.
    pub fn checkout(&self, name: &str) -> &Self {
        self.git().args(["checkout", name]).assert().success();
        self
    }

    /// `git merge --no-ff <name>`, producing a true merge commit.
    pub fn merge(&self, name: &str, message: &str) -> String {
        self.git()
            .args(["merge", "--no-ff", "-m", message, name])
            .assert()
            .success();
        self.head_hash()
    }

    /// `git mv <from> <to>`.
    pub fn rename(&self, from: &str, to: &str) -> &Self {
        self.git().args(["mv", from, to]).assert().success();
        self
    }

    /// `git tag <name>`.
    pub fn tag(&self, name: &str) -> &Self {
        self.git().args(["tag", name]).assert().success();
        self
    }

    pub fn head_hash(&self) -> String {
        let output = self
            .git()
            .args(["rev-parse", "HEAD"])
            .output()
            .expect("git rev-parse to run");
        String::from_utf8(output.stdout)
            .expect("valid UTF-8 hash")
            .trim()
            .to_string()
    }
}
