use crate::fixtures::active_facade;
use crate::fixtures::history_with_every_boundary_case;

#[test]
fn hunk_additions_and_deletions_match_their_line_counts() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    for diff in facade.diffs().unwrap() {
        assert_eq!(diff.additions.len() as u32, diff.lines_added);
        assert_eq!(diff.deletions.len() as u32, diff.lines_deleted);
    }
}

#[test]
fn binary_file_produces_no_diff_hunks() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    assert!(
        facade
            .diffs()
            .unwrap()
            .all(|d| d.path_a != "image.png" && d.path_b != "image.png")
    );
}

#[test]
fn rename_with_edit_has_at_least_one_diff_sharing_the_filemod_id() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    let filemods: Vec<_> = facade.filemods().unwrap().collect();
    let renamed = filemods
        .iter()
        .find(|f| f.path_b == "new_name.txt")
        .expect("rename filemod present");

    let facade = active_facade(&repo, true);
    let matching: Vec<_> = facade
        .diffs()
        .unwrap()
        .filter(|d| d.filemod_id == renamed.filemod_id)
        .collect();
    assert!(!matching.is_empty());
    let added: u32 = matching.iter().map(|d| d.lines_added).sum();
    let deleted: u32 = matching.iter().map(|d| d.lines_deleted).sum();
    assert_eq!(added, renamed.lines_added);
    assert_eq!(deleted, renamed.lines_deleted);
}

#[test]
fn diffs_on_a_shallow_facade_fail_with_a_filter_error() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, false);
    assert!(matches!(
        facade.diffs(),
        Err(git_quarry::error::GitQuarryError::Filter { .. })
    ));
}
