//! End-to-end tests running the dbpack binary against the sample project

use dbpack_db::{Database, SqliteBackend};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_project")
}

fn copy_dir(src: &Path, dst: &Path) {
    std::fs::create_dir_all(dst).unwrap();
    for entry in std::fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), target).unwrap();
        }
    }
}

/// A scratch copy of the sample project
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    copy_dir(&fixture(), dir.path());
    dir
}

fn dbpack(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dbpack"))
        .arg("--project-dir")
        .arg(root)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_build_list() {
    let dir = project();
    let output = dbpack(dir.path(), &["build", "--list"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Available database targets:\n  - catalog\n  - shop\n"
    );
}

#[test]
fn test_build_all() {
    let dir = project();
    let output = dbpack(dir.path(), &["build", "--all"]);
    assert!(output.status.success(), "{}", stdout(&output));

    let out = stdout(&output);
    assert!(out.contains("✓ Schema loaded successfully"));
    assert!(out.contains("Processing 2 specified table(s) from tables.config..."));
    assert!(out.contains("✓ Loaded table 'users' from users.csv"));
    assert!(out.contains("✓ Loaded config from app.config"));
    assert!(out.contains("✓ Executed views.sql"));
    assert!(out.contains("✓ Created table 'logos' with 2 file(s)"));
    assert!(out.contains("✓ Loaded products.csv (no tables.config found, using all CSV files)"));
    assert!(out.contains("Completed: 2/2 database(s) built successfully"));

    let db = SqliteBackend::open_existing(&dir.path().join("build/shop.db3")).unwrap();
    assert_eq!(
        db.list_tables().unwrap(),
        vec!["config", "logos", "orders", "users"]
    );
    assert_eq!(db.row_count("users").unwrap(), 3);
    let config = db.query_table("config").unwrap();
    let app_name = config
        .rows
        .iter()
        .find(|row| row[0].to_text() == "app_name")
        .map(|row| row[1].to_text());
    assert_eq!(app_name.as_deref(), Some("Shop Demo"));
}

#[test]
fn test_build_invalid_target() {
    let dir = project();
    let output = dbpack(dir.path(), &["build", "shop", "ghost"]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Error: Invalid targets: ghost"));
    assert!(out.contains("Available targets: catalog, shop"));
    assert!(output.stderr.is_empty());
}

#[test]
fn test_build_without_arguments_prints_help() {
    let dir = project();
    let output = dbpack(dir.path(), &["build"]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Usage:"));
    assert!(out.contains("Use --all to build all targets or specify target names."));
}

#[test]
fn test_export_and_sync_round_trip() {
    let dir = project();
    let root = dir.path();
    assert!(dbpack(root, &["build", "--all"]).status.success());

    let output = dbpack(root, &["export", "shop", "--json", "--info"]);
    assert!(output.status.success(), "{}", stdout(&output));
    let out = stdout(&output);
    assert!(out.contains("  Table: users"));
    assert!(out.contains("    - id: TEXT (PRIMARY KEY)"));
    assert!(out.contains("    - name: TEXT NOT NULL"));
    assert!(out.contains("Exported 3 rows from 'users' to users.csv"));
    assert!(out.contains("Exported 2 file(s) from table 'logos' to logos/"));

    let export = root.join("build/export/shop");
    assert!(export.join("tables/users.json").is_file());
    assert_eq!(
        std::fs::read(export.join("files/logos/logo.svg")).unwrap(),
        std::fs::read(root.join("data/shop/files/logos/logo.svg")).unwrap()
    );

    let output = dbpack(root, &["export", "--list"]);
    assert!(stdout(&output).contains("  - shop ("));

    let output = dbpack(root, &["sync"]);
    assert!(output.status.success(), "{}", stdout(&output));
    assert!(stdout(&output).contains("Completed: 2/2 database(s) synced successfully"));
    let users = std::fs::read_to_string(root.join("data/shop/tables/users.csv")).unwrap();
    assert_eq!(
        users,
        "id,name,email\r\n1,Alice,alice@example.com\r\n2,Bob,\r\n3,\"Chen, Li\",chen@example.com\r\n"
    );

    // The synced tree still builds
    assert!(dbpack(root, &["build", "--all"]).status.success());
}

#[test]
fn test_gen_config() {
    let dir = project();
    let root = dir.path();
    let output = dbpack(root, &["gen-config"]);
    assert!(output.status.success());

    let list = std::fs::read_to_string(root.join("data/catalog/tables/tables.config")).unwrap();
    assert!(list.starts_with("# Tables configuration\n"));
    assert!(list.ends_with("\nproducts\n"));
    let shop = std::fs::read_to_string(root.join("data/shop/tables/tables.config")).unwrap();
    assert!(shop.ends_with("\norders\nscratch\nusers\n"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = project();
    let output = dbpack(dir.path(), &["--config", "nope.yml", "build", "--list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load project"));
}
