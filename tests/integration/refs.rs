use crate::fixtures::active_facade;
use crate::fixtures::history_with_every_boundary_case;

#[test]
fn branches_contain_main_and_topic() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, true);
    let names: Vec<_> = facade
        .branches()
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert!(names.contains(&"main".to_string()));
    assert!(names.contains(&"topic".to_string()));
}

#[test]
fn branches_are_available_on_a_blob_filtered_clone() {
    let repo = history_with_every_boundary_case();
    let facade = active_facade(&repo, false);
    let names: Vec<_> = facade
        .branches()
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert!(names.contains(&"main".to_string()));
}

#[test]
fn tags_list_every_tag() {
    let repo = history_with_every_boundary_case();
    repo.tag("v1.0.0");
    let facade = active_facade(&repo, true);
    let names: Vec<_> = facade.tags().unwrap().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["v1.0.0".to_string()]);
}
