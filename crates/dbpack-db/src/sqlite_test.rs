use super::*;

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn row(values: &[Option<&str>]) -> Vec<Option<String>> {
    values.iter().map(|v| v.map(String::from)).collect()
}

fn entry(key: &str, value: &str) -> ConfigEntry {
    ConfigEntry {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[test]
fn test_in_memory() {
    let db = SqliteBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "sqlite");
    assert!(db.list_tables().unwrap().is_empty());
}

#[test]
fn test_create_fresh_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.db3");
    {
        let db = SqliteBackend::open(&path).unwrap();
        db.execute_batch("CREATE TABLE stale (a TEXT);").unwrap();
    }

    let db = SqliteBackend::create_fresh(&path).unwrap();
    assert!(!db.relation_exists("stale").unwrap());
}

#[test]
fn test_open_existing_requires_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = SqliteBackend::open_existing(&dir.path().join("missing.db3"));
    assert!(matches!(result, Err(DbError::ConnectionError(_))));
    assert!(!dir.path().join("missing.db3").exists());
}

#[test]
fn test_text_table_and_upsert() {
    let db = SqliteBackend::in_memory().unwrap();
    let columns = cols(&["id", "name"]);
    db.create_text_table("users", &columns).unwrap();

    let written = db
        .upsert_rows(
            "users",
            &columns,
            &[row(&[Some("1"), Some("Alice")]), row(&[Some("2"), None])],
        )
        .unwrap();
    assert_eq!(written, 2);
    assert_eq!(db.row_count("users").unwrap(), 2);

    let info = db.table_info("users").unwrap();
    assert_eq!(info.len(), 2);
    assert!(info.iter().all(|c| c.decl_type == "TEXT" && !c.not_null));

    let data = db.query_table("users").unwrap();
    assert_eq!(data.columns, columns);
    assert_eq!(data.rows[1][1], CellValue::Null);
}

#[test]
fn test_upsert_replaces_on_declared_primary_key() {
    let db = SqliteBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE users (id TEXT PRIMARY KEY, name TEXT);")
        .unwrap();
    let columns = cols(&["id", "name"]);
    // Schema-declared table wins over the implicit CREATE IF NOT EXISTS
    db.create_text_table("users", &columns).unwrap();

    db.upsert_rows("users", &columns, &[row(&[Some("1"), Some("old")])])
        .unwrap();
    db.upsert_rows("users", &columns, &[row(&[Some("1"), Some("new")])])
        .unwrap();

    let data = db.query_table("users").unwrap();
    assert_eq!(data.row_count(), 1);
    assert_eq!(data.rows[0][1], CellValue::Text("new".to_string()));
}

#[test]
fn test_upsert_rolls_back_on_bad_row() {
    let db = SqliteBackend::in_memory().unwrap();
    let columns = cols(&["a", "b"]);
    db.create_text_table("t", &columns).unwrap();

    let err = db
        .upsert_rows(
            "t",
            &columns,
            &[row(&[Some("1"), Some("2")]), row(&[Some("only one")])],
        )
        .unwrap_err();
    assert!(matches!(err, DbError::RowShape { row: 2, found: 1, expected: 2 }));
    assert_eq!(db.row_count("t").unwrap(), 0);
}

#[test]
fn test_config_upsert_by_key() {
    let db = SqliteBackend::in_memory().unwrap();
    db.ensure_config_table().unwrap();
    db.ensure_config_table().unwrap();

    db.upsert_config(&[entry("a", "1"), entry("b", "2")]).unwrap();
    db.upsert_config(&[entry("a", "3")]).unwrap();

    let value: String = db
        .conn
        .query_row("SELECT value FROM config WHERE key = 'a'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(value, "3");
    assert_eq!(db.row_count(CONFIG_TABLE).unwrap(), 2);

    let updated: Option<String> = db
        .conn
        .query_row("SELECT updated_at FROM config WHERE key = 'b'", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert!(updated.is_some());
}

#[test]
fn test_file_table_round_trip() {
    let db = SqliteBackend::in_memory().unwrap();
    db.ensure_file_table("logos").unwrap();
    let files = vec![
        ("x.png".to_string(), vec![0x89, b'P', b'N', b'G']),
        ("y.png".to_string(), Vec::new()),
    ];
    assert_eq!(db.insert_files("logos", &files).unwrap(), 2);

    let info = db.table_info("logos").unwrap();
    let shape = FileTableShape::detect(&info).unwrap();
    assert_eq!(shape.id_column, "ID");

    let rows = db.query_file_rows("logos", &shape).unwrap();
    assert_eq!(
        rows,
        vec![
            FileRow {
                code: Some("x.png".to_string()),
                payload: Some(vec![0x89, b'P', b'N', b'G']),
            },
            FileRow {
                code: Some("y.png".to_string()),
                payload: Some(Vec::new()),
            },
        ]
    );
}

#[test]
fn test_list_tables_hides_internal_tables() {
    let db = SqliteBackend::in_memory().unwrap();
    db.ensure_file_table("logos").unwrap();
    db.insert_files("logos", &[("a".to_string(), vec![1])])
        .unwrap();
    db.execute_batch("CREATE TABLE alpha (x); CREATE VIEW v AS SELECT 1;")
        .unwrap();

    // AUTOINCREMENT created sqlite_sequence behind the scenes
    assert!(db.relation_exists("sqlite_sequence").unwrap());
    assert_eq!(db.list_tables().unwrap(), vec!["alpha", "logos"]);
}

#[test]
fn test_table_info_reports_metadata() {
    let db = SqliteBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT NOT NULL DEFAULT 'x', n);")
        .unwrap();

    let info = db.table_info("t").unwrap();
    assert!(info[0].primary_key);
    assert_eq!(info[0].decl_type, "INTEGER");
    assert!(info[1].not_null);
    assert_eq!(info[1].default_value.as_deref(), Some("'x'"));
    assert_eq!(info[2].decl_type, "");
    assert!(!info[2].primary_key);
}

#[test]
fn test_missing_table_errors() {
    let db = SqliteBackend::in_memory().unwrap();
    assert!(matches!(db.table_info("nope"), Err(DbError::TableNotFound(_))));
    assert!(matches!(db.query_table("nope"), Err(DbError::TableNotFound(_))));
}

#[test]
fn test_query_table_keeps_storage_classes() {
    let db = SqliteBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE m (i, r, t, b, n); INSERT INTO m VALUES (7, 2.0, 'txt', x'6869', NULL);",
    )
    .unwrap();

    let data = db.query_table("m").unwrap();
    assert_eq!(
        data.rows[0],
        vec![
            CellValue::Integer(7),
            CellValue::Real(2.0),
            CellValue::Text("txt".to_string()),
            CellValue::Blob(b"hi".to_vec()),
            CellValue::Null,
        ]
    );
    let text: Vec<String> = data.rows[0].iter().map(CellValue::to_text).collect();
    assert_eq!(text, vec!["7", "2.0", "txt", "hi", ""]);
}

#[test]
fn test_execute_batch_error_surfaces() {
    let db = SqliteBackend::in_memory().unwrap();
    let err = db.execute_batch("CREATE TABLE (broken").unwrap_err();
    assert!(err.to_string().starts_with("[D002]"));
}
