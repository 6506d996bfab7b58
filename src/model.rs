//! The five record types produced by the extraction pipelines, grounded
//! on `diffhouse.entities.*`. All are plain value types: stateless after
//! construction, directly serializable as a flat mapping of named fields
//! to primitive values (via `serde::Serialize`, for the NDJSON CLI
//! binding and any future dataframe adapter).

use chrono::NaiveDateTime;
use serde::Serialize;

/// A commit from the repository history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commit {
    /// Full 40-hex SHA-1 of the commit.
    pub commit_hash: String,
    /// Ordered parent hashes; empty for a root commit.
    pub parents: Vec<String>,
    /// `true` iff `parents.len() > 1`.
    pub is_merge: bool,
    /// The first ref this commit was reached through, with the
    /// `refs/(remotes/origin|tags|heads)/` prefix stripped.
    pub source: String,
    /// Whether the commit is reachable from the default branch.
    pub in_main: bool,
    pub author_name: String,
    pub author_email: String,
    pub committer_name: String,
    pub committer_email: String,
    /// Naive UTC wall time.
    pub author_date: NaiveDateTime,
    pub committer_date: NaiveDateTime,
    /// Naive wall time in the committing machine's zone.
    pub author_date_local: NaiveDateTime,
    pub committer_date_local: NaiveDateTime,
    pub message_subject: String,
    pub message_body: String,
    /// `None` unless shortstat parsing was enabled.
    pub files_changed: Option<u32>,
    pub lines_added: Option<u32>,
    pub lines_deleted: Option<u32>,
}

/// A single-letter Git status code for a changed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Added,
    Deleted,
    Modified,
    Renamed,
    Copied,
    TypeChanged,
    Unmerged,
}

impl ChangeType {
    /// Parses the first byte of Git's name-status token, e.g. the `R` in
    /// `R100`.
    pub fn from_status_byte(b: u8) -> Option<Self> {
        match b {
            b'A' => Some(Self::Added),
            b'D' => Some(Self::Deleted),
            b'M' => Some(Self::Modified),
            b'R' => Some(Self::Renamed),
            b'C' => Some(Self::Copied),
            b'T' => Some(Self::TypeChanged),
            b'U' => Some(Self::Unmerged),
            _ => None,
        }
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Added => b'A',
            Self::Deleted => b'D',
            Self::Modified => b'M',
            Self::Renamed => b'R',
            Self::Copied => b'C',
            Self::TypeChanged => b'T',
            Self::Unmerged => b'U',
        }
    }
}

/// Serializes as the single-letter status code (`"A"`, `"D"`, `"M"`, `"R"`,
/// `"C"`, `"T"`, `"U"`), matching `diffhouse.entities.filemod`'s `asdict()`
/// output rather than the Rust variant name.
impl Serialize for ChangeType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let byte = [self.as_byte()];
        serializer.serialize_str(std::str::from_utf8(&byte).unwrap())
    }
}

/// One (commit, file-path-pair) modification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileMod {
    pub commit_hash: String,
    pub path_a: String,
    pub path_b: String,
    /// `HashKey(commit_hash, path_a, path_b)`, 16 lowercase hex digits.
    pub filemod_id: String,
    pub change_type: ChangeType,
    /// `0..=100`; always `100` unless `change_type` is `Renamed` or
    /// `Copied`.
    pub similarity: u32,
    /// `0` for binary files.
    pub lines_added: u32,
    pub lines_deleted: u32,
}

/// One hunk of a unified diff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diff {
    pub commit_hash: String,
    pub path_a: String,
    pub path_b: String,
    /// Same derivation as [`FileMod::filemod_id`]; the join key between
    /// the two record kinds.
    pub filemod_id: String,
    pub start_a: u32,
    pub length_a: u32,
    pub start_b: u32,
    pub length_b: u32,
    pub lines_added: u32,
    pub lines_deleted: u32,
    /// Text of each added line, leading `+` stripped.
    pub additions: Vec<String>,
    /// Text of each deleted line, leading `-` stripped.
    pub deletions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
}
