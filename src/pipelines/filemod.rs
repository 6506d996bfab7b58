//! File-modification extraction, grounded on
//! `diffhouse.pipelines.file_mod_pipeline`.
//!
//! Two independent `git log` passes — `--numstat` for line counts and
//! `--name-status` for change types and renames — joined in memory on the
//! [`crate::hashkey::filemod_id`] key, exactly as the teacher's join does
//! it with a plain dict index.

use super::warn_skipped;
use super::RECORD_SEPARATOR;
use crate::git::GitDriver;
use crate::hashkey::filemod_id;
use crate::model::ChangeType;
use crate::model::FileMod;
use crate::stream::StreamSplitter;
use std::collections::HashMap;
use std::fs::File;
use std::sync::LazyLock;

static PATH_A_RGX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\{(.*) => .*\}").unwrap());
static PATH_B_RGX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\{.* => (.*)\}").unwrap());

struct NumstatEntry {
    lines_added: u32,
    lines_deleted: u32,
}

/// Streams one [`FileMod`] per changed file, across every commit reachable
/// from any ref.
pub fn extract_filemods(
    driver: &GitDriver,
    metadata_chunk_size: usize,
) -> crate::error::Result<impl Iterator<Item = FileMod>> {
    log::info!("Extracting file modifications");

    log::debug!("Logging numstats");
    let numstat_file = driver.run(&[
        "log",
        "--pretty=format:\u{1e}%H",
        "--numstat",
        "--all",
    ])?;
    log::debug!("Parsing numstats");
    let index: HashMap<String, NumstatEntry> = parse_numstats(StreamSplitter::new(
        numstat_file,
        RECORD_SEPARATOR,
        metadata_chunk_size,
    ))
    .collect();
    log::debug!("Parsed {} numstat records", index.len());

    log::debug!("Logging name-statuses");
    let name_status_file = driver.run(&[
        "log",
        "--pretty=format:\u{1e}%H",
        "--name-status",
        "--all",
    ])?;

    log::debug!("Joining name-statuses with numstats");
    let records = parse_name_statuses(StreamSplitter::new(
        name_status_file,
        RECORD_SEPARATOR,
        metadata_chunk_size,
    ));
    Ok(records.filter_map(move |name_status| {
        let numstat = index.get(&name_status.filemod_id)?;
        Some(FileMod {
            commit_hash: name_status.commit_hash,
            path_a: name_status.path_a,
            path_b: name_status.path_b,
            filemod_id: name_status.filemod_id,
            change_type: name_status.change_type,
            similarity: name_status.similarity,
            lines_added: numstat.lines_added,
            lines_deleted: numstat.lines_deleted,
        })
    }))
}

fn parse_name_statuses(records: StreamSplitter<File>) -> impl Iterator<Item = FileMod> {
    records
        .skip(1)
        .flat_map(|record| match parse_one_name_status_commit(&record) {
            Ok(mods) => mods,
            Err(reason) => {
                warn_skipped("file modification", &record, reason);
                Vec::new()
            }
        })
}

fn parse_one_name_status_commit(record: &str) -> Result<Vec<FileMod>, String> {
    let mut lines = record.trim().lines();
    let commit_hash = lines.next().ok_or("missing commit hash line")?.to_string();

    let mut mods = Vec::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let mut items = line.split('\t');
        let status = items.next().ok_or("missing status token")?;
        let status_byte = status.as_bytes().first().copied().ok_or("empty status token")?;
        let change_type = ChangeType::from_status_byte(status_byte)
            .ok_or_else(|| format!("unknown status code {status:?}"))?;

        let (similarity, path_a, path_b) = if matches!(change_type, ChangeType::Renamed | ChangeType::Copied) {
            let similarity: u32 = status[1..].parse().map_err(|_| "bad similarity score")?;
            let path_a = items.next().ok_or("missing rename source path")?.to_string();
            let path_b = items.next().ok_or("missing rename destination path")?.to_string();
            (similarity, path_a, path_b)
        } else {
            let path = items.next().ok_or("missing path")?.to_string();
            (100, path.clone(), path)
        };

        mods.push(FileMod {
            filemod_id: filemod_id(&commit_hash, &path_a, &path_b),
            commit_hash: commit_hash.clone(),
            path_a,
            path_b,
            change_type,
            similarity,
            // filled in by the numstat join in `extract_filemods`.
            lines_added: 0,
            lines_deleted: 0,
        });
    }
    Ok(mods)
}

fn parse_numstats(records: StreamSplitter<File>) -> impl Iterator<Item = (String, NumstatEntry)> {
    records
        .skip(1)
        .flat_map(|record| match parse_one_numstat_commit(&record) {
            Ok(entries) => entries,
            Err(reason) => {
                warn_skipped("file modification", &record, reason);
                Vec::new()
            }
        })
}

fn parse_one_numstat_commit(record: &str) -> Result<Vec<(String, NumstatEntry)>, String> {
    let mut lines = record.lines();
    let commit_hash = lines.next().ok_or("missing commit hash line")?;

    let mut entries = Vec::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let mut items = line.split('\t');
        let added = items.next().ok_or("missing added count")?;
        let deleted = items.next().ok_or("missing deleted count")?;
        let file_expr = items.next().ok_or("missing path expression")?;

        let lines_added = if added == "-" { 0 } else { added.parse().map_err(|_| "bad added count")? };
        let lines_deleted = if deleted == "-" { 0 } else { deleted.parse().map_err(|_| "bad deleted count")? };

        let (path_a, path_b) = split_numstat_path(file_expr);

        entries.push((
            filemod_id(commit_hash, &path_a, &path_b),
            NumstatEntry { lines_added, lines_deleted },
        ));
    }
    Ok(entries)
}

/// Splits a numstat path expression into its before/after halves. Plain
/// renames read `a => b`; renames confined to one path segment use git's
/// brace shorthand, e.g. `dir/{old => new}/file.rs`.
fn split_numstat_path(file_expr: &str) -> (String, String) {
    if file_expr.contains('{') {
        let path_a = PATH_A_RGX.replace(file_expr, "$1").replace("//", "/");
        let path_b = PATH_B_RGX.replace(file_expr, "$1").replace("//", "/");
        (path_a, path_b)
    } else if let Some((a, b)) = file_expr.split_once(" => ") {
        (a.to_string(), b.to_string())
    } else {
        (file_expr.to_string(), file_expr.to_string())
    }
}
