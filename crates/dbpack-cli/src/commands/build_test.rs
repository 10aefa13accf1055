use super::*;
use std::path::Path;
use tempfile::tempdir;

fn global(root: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: root.to_path_buf(),
        config: None,
    }
}

fn args(targets: &[&str], all: bool) -> BuildArgs {
    BuildArgs {
        targets: targets.iter().map(|t| t.to_string()).collect(),
        all,
        list: false,
    }
}

fn exit_code(result: Result<()>) -> Option<i32> {
    result
        .err()
        .and_then(|e| e.downcast_ref::<ExitCode>().map(|c| c.0))
}

fn seed(root: &Path) {
    std::fs::create_dir_all(root.join("data/shop/tables")).unwrap();
    std::fs::write(root.join("data/shop/tables/users.csv"), "id\n1\n").unwrap();
    std::fs::create_dir_all(root.join("data/catalog/files/logos")).unwrap();
    std::fs::write(root.join("data/catalog/files/tables.config"), "logos\n").unwrap();
    std::fs::write(root.join("data/catalog/files/logos/x.png"), b"png").unwrap();
}

#[test]
fn test_build_named_target() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    seed(root);

    execute(&args(&["shop"], false), &global(root)).unwrap();

    assert!(root.join("build/shop.db3").is_file());
    assert!(!root.join("build/catalog.db3").exists());
}

#[test]
fn test_build_all() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    seed(root);

    execute(&args(&[], true), &global(root)).unwrap();

    assert!(root.join("build/shop.db3").is_file());
    assert!(root.join("build/catalog.db3").is_file());
}

#[test]
fn test_build_rejects_unknown_target() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    seed(root);

    let result = execute(&args(&["shop", "ghost"], false), &global(root));
    assert_eq!(exit_code(result), Some(1));
    // Validation happens before anything is built
    assert!(!root.join("build/shop.db3").exists());
}

#[test]
fn test_build_without_selection_exits_1() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    seed(root);

    let result = execute(&args(&[], false), &global(root));
    assert_eq!(exit_code(result), Some(1));
}

#[test]
fn test_build_list_builds_nothing() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    seed(root);

    let list = BuildArgs {
        targets: Vec::new(),
        all: false,
        list: true,
    };
    execute(&list, &global(root)).unwrap();
    assert!(!root.join("build").exists());
}

#[test]
fn test_build_schema_failure_exits_1() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    seed(root);
    std::fs::write(root.join("data/shop/schema.sql"), "CREATE TABLE (").unwrap();

    let result = execute(&args(&[], true), &global(root));
    assert_eq!(exit_code(result), Some(1));
    // The other target is still built
    assert!(root.join("build/catalog.db3").is_file());
}

#[test]
fn test_build_honours_config_paths() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    std::fs::create_dir_all(root.join("src/shop/tables")).unwrap();
    std::fs::write(root.join("src/shop/tables/users.csv"), "id\n1\n").unwrap();
    std::fs::write(
        root.join("dbpack.yml"),
        "data_path: src\nbuild_path: out\nartifact_extension: sqlite\n",
    )
    .unwrap();

    execute(&args(&["shop"], false), &global(root)).unwrap();
    assert!(root.join("out/shop.sqlite").is_file());
}
