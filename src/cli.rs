//! Command line argument definitions, grounded on the teacher's `cli.rs`
//! (clap derive `Subcommand` enum, `LogLevelArg` verbosity flags), trimmed
//! down to the one subcommand per pipeline this crate exposes plus the
//! shared `--shallow` flag. NDJSON to stdout is the thinnest
//! possible binding over the five pipelines; the dataframe/warehouse
//! adapters spec.md calls "downstream" stay out of scope.

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use itertools::Itertools as _;

const ABOUT: &str = "Mines a git repository into typed, streamable records: \
commits, file modifications, diffs and refs.";

#[derive(Parser, Debug)]
#[command(name = "git-quarry", about = ABOUT)]
pub struct Cli {
    #[clap(flatten)]
    pub log_level: LogLevelArg,

    /// Path to an optional TOML configuration file overriding chunk sizes
    /// and the minimum accepted `git` version.
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

#[derive(Args, Debug)]
#[group(multiple = false)]
pub struct LogLevelArg {
    /// Use `-v` for debug or `-vv` for trace log messages.
    #[arg(long, short = 'v', global = true, default_value = "0", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use `-q` to hide info, `-qq` to hide warnings, `-qqq` to also hide
    /// errors.
    #[arg(long, short = 'q', global = true, default_value = "0", action = clap::ArgAction::Count)]
    quiet: u8,
}

impl LogLevelArg {
    pub fn value(&self) -> anyhow::Result<log::LevelFilter> {
        let levels = log::LevelFilter::iter().collect_vec();
        let mut level_i16 = levels
            .iter()
            .find_position(|level| *level == &DEFAULT_LOG_LEVEL)
            .expect("default log level must be valid")
            .0 as i16;
        level_i16 += self.verbose as i16;
        level_i16 -= self.quiet as i16;
        if level_i16 < 0 {
            anyhow::bail!(
                "too quiet log level, {} below {}",
                -level_i16,
                levels.first().unwrap().as_str()
            );
        } else if level_i16 as usize >= levels.len() {
            anyhow::bail!(
                "too verbose log level, {} above {}",
                level_i16 as usize - levels.len() + 1,
                levels.last().unwrap().as_str()
            );
        } else {
            Ok(levels[level_i16 as usize])
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream commit history as newline-delimited JSON.
    Commits(Source),
    /// Stream per-file modification records as newline-delimited JSON.
    Filemods(Source),
    /// Stream per-hunk diff records as newline-delimited JSON.
    Diffs(Source),
    /// List branch names as newline-delimited JSON.
    Branches(Source),
    /// List tag names as newline-delimited JSON.
    Tags(Source),
}

/// Arguments shared by every subcommand: the repository to mine and the
/// `blobs` filter.
#[derive(Args, Debug, Clone)]
pub struct Source {
    /// A remote URL or local path to a git repository.
    pub repository: String,

    /// Clone metadata only, without file contents. Disables `filemods`,
    /// `diffs`, and commit shortstat fields (`files_changed`,
    /// `lines_added`, `lines_deleted`).
    #[arg(long)]
    pub shallow: bool,
}
