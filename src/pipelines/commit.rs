//! Commit metadata extraction, grounded on
//! `diffhouse.pipelines.commit_pipeline`.

use super::warn_skipped;
use super::RECORD_SEPARATOR;
use super::UNIT_SEPARATOR;
use crate::git::GitDriver;
use crate::model::Commit;
use crate::stream::StreamSplitter;
use crate::timestamp::parse_git_timestamp;
use std::collections::HashSet;
use std::fs::File;
use std::sync::LazyLock;

/// Order mirrors the teacher's `PRETTY_LOG_FORMAT_SPECIFIERS`: one entry
/// per `%`-specifier fed to `git log --pretty=format:`.
const PRETTY_SPECIFIERS: [&str; 10] = [
    "%H", "%an", "%ae", "%ad", "%cn", "%ce", "%cd", "%B", "%P", "%S",
];

static SOURCE_PREFIX_RGX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^refs/(?:remotes/origin|tags|heads)/").unwrap());
static FILES_CHANGED_RGX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(\d+) file").unwrap());
static INSERTIONS_RGX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(\d+) insertion").unwrap());
static DELETIONS_RGX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(\d+) deletion").unwrap());

/// Streams every commit reachable from any ref (`--all`), each tagged with
/// whether it is also reachable from the repository's current `HEAD` —
/// its "main" line, in spec terms.
pub fn extract_commits(
    driver: &GitDriver,
    shortstats: bool,
    metadata_chunk_size: usize,
) -> crate::error::Result<impl Iterator<Item = Commit>> {
    log::info!("Extracting commits");

    log::debug!("Indexing commits on main branch");
    let main = hashes_on_main(driver, metadata_chunk_size)?;

    log::debug!("Logging commits");
    let pretty_arg = format!("--pretty=format:{}", pretty_pattern());
    let mut args: Vec<&str> = vec!["log", &pretty_arg, "--date=iso", "--all"];
    if shortstats {
        args.push("--shortstat");
    }
    let file = driver.run(&args)?;

    log::debug!("Parsing commits");
    let records = StreamSplitter::new(file, RECORD_SEPARATOR, metadata_chunk_size);
    Ok(parse_commits(records, shortstats).map(move |commit| Commit {
        in_main: main.contains(&commit.commit_hash),
        ..commit
    }))
}

fn hashes_on_main(
    driver: &GitDriver,
    metadata_chunk_size: usize,
) -> crate::error::Result<HashSet<String>> {
    let file = driver.run(&["log", "--pretty=format:%H"])?;
    let hashes = StreamSplitter::new(file, b'\n', metadata_chunk_size)
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    Ok(hashes)
}

fn pretty_pattern() -> String {
    let field_sep = UNIT_SEPARATOR as char;
    let specifiers = PRETTY_SPECIFIERS.join(&field_sep.to_string());
    format!("{}{specifiers}{field_sep}", RECORD_SEPARATOR as char)
}

fn parse_commits(
    records: StreamSplitter<File>,
    shortstats: bool,
) -> impl Iterator<Item = Commit> {
    let field_sep = UNIT_SEPARATOR as char;
    records.skip(1).filter_map(move |record| {
        match parse_one_commit(&record, shortstats, field_sep) {
            Ok(commit) => Some(commit),
            Err(reason) => {
                warn_skipped("commit", &record, reason);
                None
            }
        }
    })
}

fn parse_one_commit(record: &str, shortstats: bool, field_sep: char) -> Result<Commit, String> {
    let values: Vec<&str> = record.split(field_sep).collect();
    if values.len() != PRETTY_SPECIFIERS.len() + 1 {
        return Err(format!(
            "expected {} fields, found {}",
            PRETTY_SPECIFIERS.len() + 1,
            values.len()
        ));
    }
    let commit_hash = values[0].to_string();
    let author_name = values[1].to_string();
    let author_email = values[2].to_string();
    let author_date_raw = values[3];
    let committer_name = values[4].to_string();
    let committer_email = values[5].to_string();
    let committer_date_raw = values[6];
    let message = values[7];
    let parents_raw = values[8];
    let source_raw = values[9];
    let shortstat = values[10];

    let source = SOURCE_PREFIX_RGX.replace(source_raw, "").into_owned();

    let committer = parse_git_timestamp(committer_date_raw)
        .ok_or_else(|| format!("unparsable committer date {committer_date_raw:?}"))?;
    let author = parse_git_timestamp(author_date_raw)
        .ok_or_else(|| format!("unparsable author date {author_date_raw:?}"))?;

    let (files_changed, lines_added, lines_deleted) = if shortstats {
        (
            Some(capture_u32(&FILES_CHANGED_RGX, shortstat).unwrap_or(0)),
            Some(capture_u32(&INSERTIONS_RGX, shortstat).unwrap_or(0)),
            Some(capture_u32(&DELETIONS_RGX, shortstat).unwrap_or(0)),
        )
    } else {
        (None, None, None)
    };

    let parents: Vec<String> = if parents_raw.is_empty() {
        Vec::new()
    } else {
        parents_raw.split(' ').map(String::from).collect()
    };
    let is_merge = parents.len() > 1;

    let mut message_parts = message.splitn(2, "\n\n");
    let message_subject = message_parts.next().unwrap_or("").trim().to_string();
    let message_body = message_parts.next().unwrap_or("").trim().to_string();

    Ok(Commit {
        commit_hash,
        parents,
        is_merge,
        source,
        in_main: false,
        author_name,
        author_email,
        committer_name,
        committer_email,
        author_date: author.utc,
        committer_date: committer.utc,
        author_date_local: author.local,
        committer_date_local: committer.local,
        message_subject,
        message_body,
        files_changed,
        lines_added,
        lines_deleted,
    })
}

fn capture_u32(rgx: &regex::Regex, text: &str) -> Option<u32> {
    rgx.captures(text)?.get(1)?.as_str().parse().ok()
}
