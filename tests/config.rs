use depmap::config::{Config, DEFAULT_SERVICE_ENUM, DEFAULT_SERVICE_LOOKUP};
use depmap::error::ConfigError;
use std::fs;
use std::path::PathBuf;

#[test]
fn empty_config_uses_defaults() {
    let config = Config::from_toml_str("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.patterns.service_lookup, DEFAULT_SERVICE_LOOKUP);
    assert_eq!(config.patterns.service_enum, DEFAULT_SERVICE_ENUM);
    assert_eq!(config.audit.extension, "gs");
    assert_eq!(config.audit.large_function_lines, 100);
}

#[test]
fn parses_files_patterns_and_audit_sections() {
    let config = Config::from_toml_str(
        r#"
files = ["src/b.gs", "src/a.gs"]

[patterns]
service_lookup = "resolve"

[audit]
source_dir = "lib"
skip_dirs = ["0_bootstrap"]
"#,
    )
    .unwrap();

    assert_eq!(
        config.files,
        vec![PathBuf::from("src/b.gs"), PathBuf::from("src/a.gs")]
    );
    assert_eq!(config.patterns.service_lookup, "resolve");
    assert_eq!(config.patterns.service_enum, DEFAULT_SERVICE_ENUM);
    assert_eq!(config.audit.source_dir, PathBuf::from("lib"));
    assert_eq!(config.audit.skip_dirs, vec!["0_bootstrap".to_string()]);
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(Config::from_toml_str("filez = []").is_err());
}

#[test]
fn relative_root_is_resolved_against_config_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("depmap.toml");
    fs::write(&path, "root = \"project\"\nfiles = [\"a.gs\"]\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.root, dir.path().join("project"));
}

#[test]
fn missing_config_file_is_a_read_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = Config::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn overrides_append_files_and_drop_duplicates_in_order() {
    let config = Config::from_toml_str("files = [\"a.gs\", \"b.gs\"]")
        .unwrap()
        .with_overrides(
            Some(PathBuf::from("/work")),
            vec![PathBuf::from("c.gs"), PathBuf::from("a.gs")],
        );

    assert_eq!(config.root, PathBuf::from("/work"));
    assert_eq!(
        config.ordered_files().unwrap(),
        vec![
            PathBuf::from("a.gs"),
            PathBuf::from("b.gs"),
            PathBuf::from("c.gs")
        ]
    );
}

#[test]
fn no_files_is_an_error() {
    let err = Config::default().ordered_files().unwrap_err();
    assert!(matches!(err, ConfigError::NoFiles));
}
