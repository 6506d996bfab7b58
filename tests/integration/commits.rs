use crate::fixtures::active_facade;
use crate::fixtures::history_with_every_boundary_case;

#[test]
fn root_commit_has_no_parents_and_is_still_emitted() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    let commits: Vec<_> = facade.commits().unwrap().collect();

    let root = commits
        .iter()
        .find(|c| c.message_subject == "root commit")
        .expect("root commit present");
    assert!(root.parents.is_empty());
    assert!(!root.is_merge);
}

#[test]
fn merge_commit_has_two_parents_and_is_flagged() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    let commits: Vec<_> = facade.commits().unwrap().collect();

    let merge = commits
        .iter()
        .find(|c| c.message_subject == "merge topic into main")
        .expect("merge commit present");
    assert_eq!(merge.parents.len(), 2);
    assert!(merge.is_merge);
    for parent in &merge.parents {
        assert_eq!(parent.len(), 40);
    }
}

#[test]
fn every_parent_hash_is_a_full_forty_character_sha() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    for commit in facade.commits().unwrap() {
        assert!(commit.is_merge == (commit.parents.len() > 1));
        for parent in &commit.parents {
            assert_eq!(parent.len(), 40);
        }
        assert_eq!(commit.commit_hash.len(), 40);
    }
}

#[test]
fn empty_commit_is_emitted_with_zero_shortstat_counts() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    let commits: Vec<_> = facade.commits().unwrap().collect();

    let empty = commits
        .iter()
        .find(|c| c.message_subject == "an empty commit")
        .expect("empty commit present");
    assert_eq!(empty.files_changed, Some(0));
    assert_eq!(empty.lines_added, Some(0));
    assert_eq!(empty.lines_deleted, Some(0));
}

#[test]
fn shallow_facade_reports_no_shortstat() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, false);
    for commit in facade.commits().unwrap() {
        assert_eq!(commit.files_changed, None);
        assert_eq!(commit.lines_added, None);
        assert_eq!(commit.lines_deleted, None);
    }
}

#[test]
fn commit_message_with_an_embedded_newline_preserves_it() {
    let repo = history_with_every_boundary_case();
    repo.write_file("notes.txt", "more notes\n");
    repo.add_all();
    repo.commit("subject line\n\nbody line one\nbody line two");

    let facade = active_facade(&repo, true);
    let commits: Vec<_> = facade.commits().unwrap().collect();
    let commit = commits
        .iter()
        .find(|c| c.message_subject == "subject line")
        .expect("commit present");
    pretty_assertions::assert_eq!(commit.message_body, "body line one\nbody line two");
}

#[test]
fn deterministic_author_and_committer_identity_round_trips() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    for commit in facade.commits().unwrap() {
        assert_eq!(commit.author_name, "A Name");
        assert_eq!(commit.author_email, "a@no.example");
        assert_eq!(commit.committer_name, "C Name");
        assert_eq!(commit.committer_email, "c@no.example");
    }
}
