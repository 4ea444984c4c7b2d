//! Tests for server configuration loading.

use live_tictactoe::{DEFAULT_QUEUE_CAPACITY, ServerConfig};
use std::io::Write;

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 8080);
    assert_eq!(*config.viewer_queue_capacity(), DEFAULT_QUEUE_CAPACITY);
    assert_eq!(config.bind_addr(), "127.0.0.1:8080");
}

#[test]
fn test_partial_toml_fills_defaults() {
    let config = ServerConfig::from_toml("port = 9000").unwrap();
    assert_eq!(*config.port(), 9000);
    assert_eq!(config.host(), "127.0.0.1");
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "host = \"0.0.0.0\"\nport = 3000\nviewer_queue_capacity = 4").unwrap();

    let config = ServerConfig::from_file(file.path()).unwrap();
    assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    assert_eq!(*config.viewer_queue_capacity(), 4);
}

#[test]
fn test_missing_file_is_an_error() {
    let err = ServerConfig::from_file("/definitely/not/here.toml").unwrap_err();
    assert_eq!(err.origin, "/definitely/not/here.toml");
    assert!(err.message.contains("cannot read file"));
    assert!(err.to_string().starts_with("server config /definitely/not/here.toml:"));
}

#[test]
fn test_invalid_values_rejected() {
    let bad_type = ServerConfig::from_toml("port = \"eighty\"").unwrap_err();
    assert_eq!(bad_type.origin, "<inline>");
    assert_eq!(bad_type.key, None);

    let zero = ServerConfig::from_toml("viewer_queue_capacity = 0").unwrap_err();
    assert_eq!(zero.key, Some("viewer_queue_capacity"));
    assert_eq!(zero.message, "viewer_queue_capacity: must be at least 1");
}

#[test]
fn test_file_errors_name_the_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "viewer_queue_capacity = 0").unwrap();

    let err = ServerConfig::from_file(file.path()).unwrap_err();
    assert_eq!(err.origin, file.path().display().to_string());
    assert_eq!(err.key, Some("viewer_queue_capacity"));
}

#[test]
fn test_cli_overrides() {
    let config = ServerConfig::default().with_overrides(Some("localhost".into()), Some(1234));
    assert_eq!(config.bind_addr(), "localhost:1234");

    let untouched = ServerConfig::default().with_overrides(None, None);
    assert_eq!(untouched, ServerConfig::default());
}
