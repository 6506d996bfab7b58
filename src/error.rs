//! The four error kinds from the extraction pipeline's failure model.
//!
//! A single malformed record (a `ParserWarning` in spec terms) is not
//! represented here: it is logged and skipped in place by the pipeline
//! that encountered it, never propagated as an `Err`.

/// Typed errors raised by the core extraction engine.
#[derive(thiserror::Error, Debug)]
pub enum GitQuarryError {
    /// `git` is missing from `PATH`, or its version is below
    /// [`crate::git::MINIMUM_GIT_VERSION`].
    #[error("git environment error: {0}")]
    Environment(String),

    /// The `git` subprocess exited non-zero.
    #[error("git command failed:\n{stderr}")]
    Git { stderr: String },

    /// Data was requested from a [`crate::repo::RepoFacade`] that has not
    /// been entered, or whose clone has already been disposed.
    #[error(
        "the repository is not cloned locally; enter the facade's scope or call clone() first"
    )]
    NotCloned,

    /// Data was requested that requires `blobs = true`, but the facade was
    /// constructed with `blobs = false`.
    #[error("requested data is incompatible with the current '{filter_name}' filter")]
    Filter { filter_name: String },

    /// A streamed iterator failed for a reason other than the two above,
    /// most commonly because its backing clone was disposed mid-iteration.
    #[error("failed to parse repository data: {0}")]
    Parser(String),
}

pub type Result<T> = std::result::Result<T, GitQuarryError>;
