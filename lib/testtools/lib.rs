//! Shared test fixtures for `git-quarry`'s integration suite: a
//! deterministic `git` invocation wrapper and a scratch-repository builder
//! (see [`ScratchRepo`]), grounded on the teacher's workspace-local
//! `testtools` crate.

mod log;
mod test_util;

pub use log::LogAccumulator;
pub use test_util::MaybePermanentTempDir;
pub use test_util::ScratchRepo;
pub use test_util::cargo_bin_git_quarry_for_testing;
pub use test_util::git_command_for_testing;
pub use test_util::maybe_keep_tempdir;
