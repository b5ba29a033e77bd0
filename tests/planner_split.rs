use std::error::Error;
use std::fs;
use std::path::PathBuf;

use testwatch::watch::{plan_targets, same_path, WatchTarget};

type TestResult = Result<(), Box<dyn Error>>;

fn target(path: PathBuf, recursive: bool) -> WatchTarget {
    WatchTarget { path, recursive }
}

#[test]
fn empty_ignore_watches_every_root_recursively() -> TestResult {
    let root = tempfile::tempdir()?;
    fs::create_dir(root.path().join("child"))?;

    let targets = plan_targets(&[root.path().to_path_buf()], &[])?;
    assert_eq!(targets, vec![target(root.path().to_path_buf(), true)]);
    Ok(())
}

#[test]
fn ignoring_every_child_leaves_one_non_recursive_target() -> TestResult {
    let root = tempfile::tempdir()?;
    let a = root.path().join("a");
    let b = root.path().join("b");
    fs::create_dir(&a)?;
    fs::create_dir(&b)?;

    let targets = plan_targets(&[root.path().to_path_buf()], &[a, b])?;
    assert_eq!(targets, vec![target(root.path().to_path_buf(), false)]);
    Ok(())
}

#[test]
fn partial_ignore_splits_the_root() -> TestResult {
    let root = tempfile::tempdir()?;
    let included = root.path().join("included");
    let excluded = root.path().join("excluded");
    fs::create_dir(&included)?;
    fs::create_dir(&excluded)?;

    let targets = plan_targets(&[root.path().to_path_buf()], &[excluded])?;
    assert_eq!(
        targets,
        vec![
            target(root.path().to_path_buf(), false),
            target(included, true),
        ]
    );
    Ok(())
}

#[test]
fn ignore_entries_relative_to_the_root_match() -> TestResult {
    let root = tempfile::tempdir()?;
    fs::create_dir(root.path().join("kept"))?;
    fs::create_dir(root.path().join("skipped"))?;

    let targets = plan_targets(&[root.path().to_path_buf()], &[PathBuf::from("skipped")])?;
    assert_eq!(
        targets,
        vec![
            target(root.path().to_path_buf(), false),
            target(root.path().join("kept"), true),
        ]
    );
    Ok(())
}

// Ignore matching is one level deep only; entries nested further down are
// not matched and the whole root stays recursive.
#[test]
fn deeply_nested_ignore_entries_are_not_matched() -> TestResult {
    let root = tempfile::tempdir()?;
    let tree = root.path().join("tree");
    let subtree = tree.join("subtree");
    fs::create_dir_all(&subtree)?;

    let targets = plan_targets(&[root.path().to_path_buf()], &[subtree])?;
    assert_eq!(targets, vec![target(root.path().to_path_buf(), true)]);
    Ok(())
}

#[test]
fn duplicate_roots_are_deduplicated() -> TestResult {
    let root = tempfile::tempdir()?;

    let roots = vec![root.path().to_path_buf(), root.path().to_path_buf()];
    let targets = plan_targets(&roots, &[])?;
    assert_eq!(targets.len(), 1);
    Ok(())
}

#[test]
fn missing_root_is_an_error_when_ignores_force_a_listing() {
    let missing = PathBuf::from("/no/such/testwatch-root");
    let result = plan_targets(&[missing], &[PathBuf::from("sub")]);
    assert!(result.is_err());
}

#[test]
fn same_path_normalizes_dot_components() -> TestResult {
    let root = tempfile::tempdir()?;
    let plain = root.path().join("a").join("b");
    let dotted = root.path().join("a").join(".").join("b");
    let parented = root.path().join("a").join("..").join("a").join("b");

    assert!(same_path(&plain, &dotted));
    assert!(same_path(&plain, &parented));
    assert!(!same_path(&plain, &root.path().join("a")));
    Ok(())
}
