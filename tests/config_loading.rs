// tests/config_loading.rs

use std::io::Write;
use tempfile::NamedTempFile;
use rf::config::{ConfigFile, ExecutorSection, load_and_validate, resolve_config};
use rf::errors::RfError;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn empty_file_gives_defaults() {
    let file = config_file("");
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.executor, ExecutorSection::default());
    assert_eq!(cfg.executor.program, "make");
    assert_eq!(cfg.executor.args, vec!["-f", "-"]);
    assert!(!cfg.discovery.recursive);
    assert!(!cfg.discovery.check_cycles);
}

#[test]
fn sections_are_read() {
    let file = config_file(
        r#"
[executor]
program = "remake"
args = ["-j4", "-f", "-"]

[discovery]
recursive = true
check_cycles = true
"#,
    );
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.executor.program, "remake");
    assert_eq!(cfg.executor.args, vec!["-j4", "-f", "-"]);
    assert!(cfg.discovery.recursive);
    assert!(cfg.discovery.check_cycles);
}

#[test]
fn empty_program_returns_config_error() {
    let file = config_file(
        r#"
[executor]
program = "  "
"#,
    );

    match load_and_validate(file.path()) {
        Err(RfError::ConfigError(msg)) => assert!(msg.contains("program")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_keys_are_rejected() {
    let file = config_file(
        r#"
[discovery]
recursve = true
"#,
    );

    match load_and_validate(file.path()) {
        Err(RfError::TomlError(e)) => assert!(e.to_string().contains("recursve")),
        Err(e) => panic!("Expected TomlError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn implicit_config_is_picked_up_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("rf.toml"),
        "[discovery]\nrecursive = true\n",
    )
    .unwrap();

    let cfg = resolve_config(None, dir.path()).unwrap();
    assert!(cfg.discovery.recursive);
}

#[test]
fn no_config_anywhere_means_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg: ConfigFile = resolve_config(None, dir.path()).unwrap();
    assert_eq!(cfg.executor, ExecutorSection::default());
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    assert!(matches!(
        resolve_config(Some(&missing), dir.path()),
        Err(RfError::IoError(_))
    ));
}
