use crate::fixtures::active_facade;
use crate::fixtures::history_with_every_boundary_case;
use git_quarry::model::ChangeType;

#[test]
fn non_rename_filemods_have_equal_paths_and_full_similarity() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    for filemod in facade.filemods().unwrap() {
        if !matches!(filemod.change_type, ChangeType::Renamed | ChangeType::Copied) {
            assert_eq!(filemod.path_a, filemod.path_b);
            assert_eq!(filemod.similarity, 100);
        }
    }
}

#[test]
fn binary_file_has_zero_line_counts() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    let filemods: Vec<_> = facade.filemods().unwrap().collect();

    let binary = filemods
        .iter()
        .find(|f| f.path_a == "image.png")
        .expect("binary filemod present");
    assert_eq!(binary.lines_added, 0);
    assert_eq!(binary.lines_deleted, 0);
    assert_eq!(binary.change_type, ChangeType::Added);
}

#[test]
fn rename_with_edit_has_distinct_paths_and_nonzero_line_counts() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    let filemods: Vec<_> = facade.filemods().unwrap().collect();

    let renamed = filemods
        .iter()
        .find(|f| f.path_b == "new_name.txt")
        .expect("rename filemod present");
    assert_eq!(renamed.change_type, ChangeType::Renamed);
    assert_ne!(renamed.path_a, renamed.path_b);
    assert!(renamed.lines_added + renamed.lines_deleted > 0);
}

#[test]
fn filemod_id_is_deterministic_for_the_same_commit_and_paths() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    let filemods: Vec<_> = facade.filemods().unwrap().collect();
    for filemod in &filemods {
        let expected = git_quarry::hashkey::filemod_id(
            &filemod.commit_hash,
            &filemod.path_a,
            &filemod.path_b,
        );
        assert_eq!(filemod.filemod_id, expected);
    }
}

#[test]
fn empty_commit_yields_no_filemods() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    let commits: Vec<_> = facade.commits().unwrap().collect();
    let empty_hash = commits
        .iter()
        .find(|c| c.message_subject == "an empty commit")
        .expect("empty commit present")
        .commit_hash
        .clone();

    let facade = active_facade(&repo, true);
    assert!(
        facade
            .filemods()
            .unwrap()
            .all(|f| f.commit_hash != empty_hash)
    );
}

#[test]
fn filemods_on_a_shallow_facade_fail_with_a_filter_error() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, false);
    assert!(matches!(
        facade.filemods(),
        Err(git_quarry::error::GitQuarryError::Filter { .. })
    ));
}

#[test]
fn serialized_change_type_is_the_single_letter_status_code_not_the_variant_name() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    let filemods: Vec<_> = facade.filemods().unwrap().collect();

    let renamed = filemods
        .iter()
        .find(|f| f.change_type == ChangeType::Renamed)
        .expect("rename filemod present");
    let value = serde_json::to_value(renamed).unwrap();
    assert_eq!(value["change_type"], serde_json::json!("R"));

    let added = filemods
        .iter()
        .find(|f| f.change_type == ChangeType::Added)
        .expect("added filemod present");
    let value = serde_json::to_value(added).unwrap();
    assert_eq!(value["change_type"], serde_json::json!("A"));
}
