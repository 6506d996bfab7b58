use crate::fixtures::history_with_every_boundary_case;
use git_quarry::error::GitQuarryError;
use git_quarry::repo::RepoFacade;

#[test]
fn clone_repo_is_idempotent() {
    let repo = history_with_every_boundary_case();
    let mut facade = RepoFacade::new(repo.path().to_str().unwrap(), true);
    facade.clone_repo().unwrap();
    facade.clone_repo().unwrap();
    assert_eq!(facade.branches().unwrap().len() > 0, true);
}

#[test]
fn data_access_after_dispose_is_a_lifecycle_error() {
    let repo = history_with_every_boundary_case();
    let mut facade = RepoFacade::new(repo.path().to_str().unwrap(), true);
    facade.clone_repo().unwrap();
    facade.dispose();
    assert!(matches!(facade.branches(), Err(GitQuarryError::NotCloned)));
}

#[test]
fn a_local_path_source_is_resolved_to_a_file_uri() {
    let repo = history_with_every_boundary_case();
    let facade = RepoFacade::new(repo.path().to_str().unwrap(), true);
    assert!(facade.source().starts_with("file://"));
}
