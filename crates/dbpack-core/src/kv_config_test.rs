use super::*;
use tempfile::TempDir;

fn entry(key: &str, value: &str) -> ConfigEntry {
    ConfigEntry {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[test]
fn test_equals_separator() {
    assert_eq!(
        parse_config_line("database.name=Arch.db3"),
        Some(entry("database.name", "Arch.db3"))
    );
}

#[test]
fn test_colon_separator() {
    assert_eq!(
        parse_config_line("database.version: 1.0.0"),
        Some(entry("database.version", "1.0.0"))
    );
}

#[test]
fn test_double_quotes_stripped_and_trimmed() {
    assert_eq!(
        parse_config_line("name = \"My Value\""),
        Some(entry("name", "My Value"))
    );
}

#[test]
fn test_single_quotes_stripped() {
    assert_eq!(
        parse_config_line("greeting='hi there'"),
        Some(entry("greeting", "hi there"))
    );
}

#[test]
fn test_only_one_quote_layer_removed() {
    assert_eq!(
        parse_config_line("nested=\"'inner'\""),
        Some(entry("nested", "'inner'"))
    );
}

#[test]
fn test_mismatched_quotes_kept() {
    assert_eq!(
        parse_config_line("odd=\"half'"),
        Some(entry("odd", "\"half'"))
    );
}

#[test]
fn test_equals_wins_over_earlier_colon() {
    assert_eq!(
        parse_config_line("url: http://host=1"),
        Some(entry("url: http://host", "1"))
    );
}

#[test]
fn test_colon_used_only_without_equals() {
    assert_eq!(
        parse_config_line("endpoint: http://host:8080"),
        Some(entry("endpoint", "http://host:8080"))
    );
}

#[test]
fn test_lines_without_entries_are_skipped() {
    assert_eq!(parse_config_line(""), None);
    assert_eq!(parse_config_line("   "), None);
    assert_eq!(parse_config_line("# comment=1"), None);
    assert_eq!(parse_config_line("no separator here"), None);
    assert_eq!(parse_config_line("=value"), None);
    assert_eq!(parse_config_line("key="), None);
    assert_eq!(parse_config_line("key=\"\""), None);
    assert_eq!(parse_config_line("key=\""), None);
}

#[test]
fn test_invalid_line_does_not_affect_neighbours() {
    let file = KvConfigFile::parse(
        "app.config",
        "a=1\nthis line is junk\nb: 2\n# c=3\n",
    );
    assert_eq!(file.entries, vec![entry("a", "1"), entry("b", "2")]);
}

#[test]
fn test_load_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.config");
    std::fs::write(&path, "arch.enabled=true\narch.style: modern\n").unwrap();

    let file = KvConfigFile::load(&path).unwrap();
    assert_eq!(file.path, path);
    assert_eq!(
        file.entries,
        vec![entry("arch.enabled", "true"), entry("arch.style", "modern")]
    );
}

#[test]
fn test_load_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let err = KvConfigFile::load(&dir.path().join("missing.config")).unwrap_err();
    assert!(matches!(err, CoreError::ControlFileRead { .. }));
}
