use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;
use tracker_fs::{ConfigStore, Error};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestConfig {
    name: String,
    count: i32,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "name = \"test\"\ncount = 42").unwrap();

    let config: TestConfig = ConfigStore::new().load(&path).unwrap();
    assert_eq!(config, TestConfig { name: "test".into(), count: 42 });
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");
    fs::write(&path, r#"{"name": "test", "count": 42}"#).unwrap();

    let config: TestConfig = ConfigStore::new().load(&path).unwrap();
    assert_eq!(config.count, 42);
}

#[test]
fn test_save_then_load_creates_parent_dirs() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("dir").join("config.toml");
    let store = ConfigStore::new();

    let config = TestConfig { name: "saved".into(), count: 7 };
    store.save(&path, &config).unwrap();

    let loaded: TestConfig = store.load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.ini");
    fs::write(&path, "name=test").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(&path);
    assert!(matches!(result, Err(Error::UnsupportedFormat { extension }) if extension == "ini"));
}

#[test]
fn test_parse_error_names_format() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "name = ").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(&path);
    match result {
        Err(Error::ConfigParse { format, .. }) => assert_eq!(format, "TOML"),
        other => panic!("expected ConfigParse, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.toml");

    let result: Result<TestConfig, _> = ConfigStore::new().load(&path);
    assert!(matches!(result, Err(Error::Io { .. })));
}
