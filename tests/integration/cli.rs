use crate::fixtures::history_with_every_boundary_case;
use git_quarry_testtools::cargo_bin_git_quarry_for_testing;
use predicates::prelude::*;

#[test]
fn commits_subcommand_prints_one_ndjson_line_per_commit() {
    let repo = history_with_every_boundary_case();
    let output = cargo_bin_git_quarry_for_testing()
        .args(["commits", repo.path().to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert!(!lines.is_empty());
    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value.get("commit_hash").is_some());
    }
}

#[test]
fn branches_subcommand_lists_main() {
    let repo = history_with_every_boundary_case();
    cargo_bin_git_quarry_for_testing()
        .args(["branches", repo.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"main\""));
}

#[test]
fn filemods_on_a_shallow_clone_fails_with_a_nonzero_exit() {
    let repo = history_with_every_boundary_case();
    cargo_bin_git_quarry_for_testing()
        .args(["filemods", "--shallow", repo.path().to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn an_invalid_verbosity_combination_exits_before_touching_the_network() {
    let repo = history_with_every_boundary_case();
    cargo_bin_git_quarry_for_testing()
        .args(["-qqqq", "commits", repo.path().to_str().unwrap()])
        .assert()
        .code(2);
}
