use super::*;
use dbpack_db::{Database, SqliteBackend};
use std::path::Path;
use tempfile::tempdir;

fn global(root: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: root.to_path_buf(),
        config: None,
    }
}

#[test]
fn test_sync_exports_every_artifact() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    std::fs::create_dir_all(root.join("build")).unwrap();
    for name in ["shop", "catalog"] {
        let db = SqliteBackend::create_fresh(&root.join(format!("build/{name}.db3"))).unwrap();
        db.execute_batch("CREATE TABLE t (x); INSERT INTO t VALUES ('1');")
            .unwrap();
    }

    execute(&SyncArgs {}, &global(root)).unwrap();

    for name in ["shop", "catalog"] {
        let csv = root.join(format!("data/{name}/tables/t.csv"));
        assert_eq!(std::fs::read_to_string(csv).unwrap(), "x\r\n1\r\n");
        assert!(root.join(format!("data/{name}/files")).is_dir());
    }
}

#[test]
fn test_sync_without_build_dir_is_ok() {
    let temp_dir = tempdir().unwrap();
    execute(&SyncArgs {}, &global(temp_dir.path())).unwrap();
    assert!(!temp_dir.path().join("data").exists());
}

#[test]
fn test_sync_with_no_artifacts_is_ok() {
    let temp_dir = tempdir().unwrap();
    std::fs::create_dir_all(temp_dir.path().join("build")).unwrap();
    execute(&SyncArgs {}, &global(temp_dir.path())).unwrap();
    assert!(!temp_dir.path().join("data").exists());
}
