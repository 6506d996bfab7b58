//! Shared history builders for the integration suite, layered on top of
//! `git_quarry_testtools::ScratchRepo`.

use git_quarry::repo::RepoFacade;
use git_quarry_testtools::ScratchRepo;

/// Opens an active facade cloned from `repo`. `blobs` controls whether the
/// clone keeps file contents.
pub fn active_facade(repo: &ScratchRepo, blobs: bool) -> RepoFacade {
    let mut facade = RepoFacade::new(repo.path().to_str().unwrap(), blobs);
    facade.clone_repo().expect("clone to succeed");
    facade
}

/// A repo with a root commit, a plain edit, a rename-with-edit, a binary
/// file, an empty commit, and a merge. Exercises every boundary behavior
/// called out for the extraction pipelines.
pub fn history_with_every_boundary_case() -> ScratchRepo {
    let repo = ScratchRepo::init();

    repo.write_file("README.md", "hello\n");
    repo.add_all();
    repo.commit("root commit");

    repo.write_file("README.md", "hello\nworld\n");
    repo.add_all();
    repo.commit("edit the readme");

    repo.write_file("image.png", [0u8, 1, 2, 255, 254, 0, 10, 13]);
    repo.add_all();
    repo.commit("add a binary file");

    repo.write_file("old_name.txt", "a\nb\nc\nd\ne\nf\ng\nh\n");
    repo.add_all();
    repo.commit("add file to rename");
    repo.rename("old_name.txt", "new_name.txt");
    repo.write_file("new_name.txt", "a\nb\nc\nd\ne\nf\ng\nh\nmore text\n");
    repo.add_all();
    repo.commit("rename with an edit");

    repo.commit("an empty commit");

    repo.new_branch("topic");
    repo.write_file("topic.txt", "topic content\n");
    repo.add_all();
    repo.commit("topic commit");
    repo.checkout("main");
    repo.merge("topic", "merge topic into main");

    repo
}
