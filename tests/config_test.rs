//! Tests for layered server configuration.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use word_duel::{ENV_LEXICON, ENV_PORT, ServerConfig, build_engine};

fn toml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).expect("Failed to write config");
    file
}

#[test]
fn test_defaults() {
    let config = ServerConfig::load(None).expect("Defaults failed");
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 3000);
    assert_eq!(config.lexicon_path(), Path::new("words_alpha.txt"));
    assert!(!config.rules().require_word_chain);
}

#[test]
fn test_file_fills_missing_fields_with_defaults() {
    let file = toml_file("port = 8080\n\n[rules]\nrequire_word_chain = true\n");
    let config = ServerConfig::load(Some(file.path())).expect("Load failed");
    assert_eq!(*config.port(), 8080);
    assert_eq!(config.host(), "127.0.0.1");
    assert!(config.rules().require_word_chain);
}

#[test]
fn test_bad_toml_is_an_error() {
    let file = toml_file("port = \"not a number\"");
    let err = ServerConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_env_overrides_file_and_flags_override_env() {
    let file = toml_file("port = 8080\nhost = \"0.0.0.0\"\n");
    let env: HashMap<&str, &str> = [(ENV_PORT, "9000"), (ENV_LEXICON, "/tmp/words.txt")].into();

    let config = ServerConfig::load(Some(file.path()))
        .unwrap()
        .apply_env_from(|key| env.get(key).map(|v| v.to_string()))
        .unwrap();
    assert_eq!(*config.port(), 9000);
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(config.lexicon_path(), Path::new("/tmp/words.txt"));

    let config = config.with_overrides(None, Some(7000), Some(PathBuf::from("words.txt")), true);
    assert_eq!(*config.port(), 7000);
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(config.lexicon_path(), Path::new("words.txt"));
    assert!(config.rules().require_word_chain);
}

#[test]
fn test_invalid_env_port() {
    let err = ServerConfig::default()
        .apply_env_from(|key| (key == ENV_PORT).then(|| "eighty".to_string()))
        .unwrap_err();
    assert!(err.message.contains(ENV_PORT));
}

#[test]
fn test_build_engine_loads_lexicon() {
    let words = toml_file("apple\ngrape\n");
    let config = ServerConfig::default().with_overrides(
        None,
        None,
        Some(words.path().to_path_buf()),
        false,
    );
    let engine = build_engine(&config).expect("Engine build failed");
    assert_eq!(engine.lexicon().len(), 2);

    let missing = ServerConfig::default().with_overrides(
        None,
        None,
        Some(PathBuf::from("/no/such/words.txt")),
        false,
    );
    assert!(build_engine(&missing).is_err());
}
