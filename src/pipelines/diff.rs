//! Unified-diff extraction, grounded on
//! `diffhouse.pipelines.diff_pipeline`. Runs `git log -p -U0`, so every
//! hunk carries the minimum context (zero lines) needed to know exactly
//! which lines changed.

use super::warn_skipped;
use super::RECORD_SEPARATOR;
use crate::git::GitDriver;
use crate::hashkey::filemod_id;
use crate::model::Diff;
use crate::stream::StreamSplitter;
use std::sync::LazyLock;

static FILE_SEP_RGX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?m)^diff --git").unwrap());
static FILEPATHS_RGX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r#""?a/(.+)"? "?b/(.+)"?"#).unwrap());
static HUNK_HEADER_RGX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?m)^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap()
});

/// Streams one [`Diff`] per hunk, across every commit reachable from any
/// ref.
pub fn extract_diffs(
    driver: &GitDriver,
    diff_chunk_size: usize,
) -> crate::error::Result<impl Iterator<Item = Diff>> {
    log::info!("Extracting diffs");
    log::debug!("Logging diffs");

    let file = driver.run(&["log", "-p", "-U0", "--pretty=format:\u{1e}%H", "--all"])?;

    log::debug!("Parsing diffs");
    let records = StreamSplitter::new(file, RECORD_SEPARATOR, diff_chunk_size);
    Ok(records.skip(1).flat_map(|record| {
        match parse_one_commit_diffs(&record) {
            Ok(diffs) => diffs,
            Err(reason) => {
                warn_skipped("diff", &record, reason);
                Vec::new()
            }
        }
    }))
}

fn parse_one_commit_diffs(record: &str) -> Result<Vec<Diff>, String> {
    let Some((commit_hash, body)) = record.split_once('\n') else {
        // empty commit: no files touched, nothing to parse.
        return Ok(Vec::new());
    };

    let mut diffs = Vec::new();
    for file_chunk in FILE_SEP_RGX.split(body).skip(1) {
        diffs.extend(parse_file_diff(commit_hash, file_chunk)?);
    }
    Ok(diffs)
}

fn parse_file_diff(commit_hash: &str, text: &str) -> Result<Vec<Diff>, String> {
    let header_line = text.lines().next().ok_or("empty file diff chunk")?;
    let caps = FILEPATHS_RGX
        .captures(header_line)
        .ok_or("missing a/ b/ paths in diff header")?;
    let path_a = caps.get(1).unwrap().as_str().to_string();
    let path_b = caps.get(2).unwrap().as_str().to_string();
    let filemod_id = filemod_id(commit_hash, &path_a, &path_b);

    let hunk_matches: Vec<regex::Captures> = HUNK_HEADER_RGX.captures_iter(text).collect();
    let mut diffs = Vec::with_capacity(hunk_matches.len());

    for (i, cap) in hunk_matches.iter().enumerate() {
        let whole = cap.get(0).unwrap();
        let start_a: u32 = cap[1].parse().map_err(|_| "bad hunk start_a")?;
        let length_a: u32 = cap
            .get(2)
            .map_or(Ok(1), |m| m.as_str().parse())
            .map_err(|_| "bad hunk length_a")?;
        let start_b: u32 = cap[3].parse().map_err(|_| "bad hunk start_b")?;
        let length_b: u32 = cap
            .get(4)
            .map_or(Ok(1), |m| m.as_str().parse())
            .map_err(|_| "bad hunk length_b")?;

        let content_start = whole.end();
        let content_end = hunk_matches
            .get(i + 1)
            .map(|next| next.get(0).unwrap().start())
            .unwrap_or(text.len());
        let hunk_text = &text[content_start..content_end];
        // The hunk header line may carry trailing function-context text
        // (e.g. `@@ ... @@ fn foo() {`); the actual +/- lines start after it.
        let body = hunk_text.split_once('\n').map(|(_, rest)| rest).unwrap_or("");

        let mut additions = Vec::new();
        let mut deletions = Vec::new();
        for line in body.lines() {
            if let Some(rest) = line.strip_prefix('+') {
                additions.push(rest.to_string());
            } else if let Some(rest) = line.strip_prefix('-') {
                deletions.push(rest.to_string());
            }
        }

        diffs.push(Diff {
            commit_hash: commit_hash.to_string(),
            path_a: path_a.clone(),
            path_b: path_b.clone(),
            filemod_id: filemod_id.clone(),
            start_a,
            length_a,
            start_b,
            length_b,
            lines_added: additions.len() as u32,
            lines_deleted: deletions.len() as u32,
            additions,
            deletions,
        });
    }
    Ok(diffs)
}
