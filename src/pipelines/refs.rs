//! Branch and tag listing, grounded on `diffhouse.pipelines.branch_pipeline`
//! and `diffhouse.pipelines.tag_pipeline`. Both read from `git ls-remote`
//! rather than `git branch`/`git tag`, so they work the same way against a
//! bare, metadata-only clone as against a full one.

use crate::git::GitDriver;
use crate::git::RefKind;
use crate::model::Branch;
use crate::model::Tag;
use std::sync::LazyLock;

static BRANCH_REF_RGX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"refs/heads/(.+)").unwrap());
static TAG_REF_RGX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"refs/tags/(.+)").unwrap());

/// Lists every branch in the remote/clone.
pub fn extract_branches(driver: &GitDriver) -> crate::error::Result<Vec<Branch>> {
    let log = driver.ls_remote(RefKind::Branches)?;
    Ok(parse_refs(&log, &BRANCH_REF_RGX)
        .into_iter()
        .map(|name| Branch { name })
        .collect())
}

/// Lists every tag in the remote/clone.
pub fn extract_tags(driver: &GitDriver) -> crate::error::Result<Vec<Tag>> {
    let log = driver.ls_remote(RefKind::Tags)?;
    Ok(parse_refs(&log, &TAG_REF_RGX)
        .into_iter()
        .map(|name| Tag { name })
        .collect())
}

/// `git ls-remote --refs` prints `<hash>\t<ref>` per line; this extracts
/// the ref's name past the given prefix pattern.
fn parse_refs(log: &str, rgx: &regex::Regex) -> Vec<String> {
    log.lines()
        .filter_map(|line| rgx.captures(line))
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_branch_names_from_ls_remote_output() {
        let log = "aaaa\trefs/heads/main\nbbbb\trefs/heads/feature/x\n";
        let names = parse_refs(log, &BRANCH_REF_RGX);
        assert_eq!(names, vec!["main", "feature/x"]);
    }

    #[test]
    fn parses_tag_names_from_ls_remote_output() {
        let log = "aaaa\trefs/tags/v1.0.0\nbbbb\trefs/tags/v2.0.0\n";
        let names = parse_refs(log, &TAG_REF_RGX);
        assert_eq!(names, vec!["v1.0.0", "v2.0.0"]);
    }

    #[test]
    fn ignores_unrelated_refs() {
        let log = "aaaa\trefs/heads/main\nbbbb\tHEAD\n";
        let names = parse_refs(log, &BRANCH_REF_RGX);
        assert_eq!(names, vec!["main"]);
    }
}
