use std::fs;

use migrator_engine::{
    checkpoint_path, clear_checkpoint, load_resumable, read_lines, write_checkpoint, write_lines,
    StoreError,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn init_logging() {
    migrator_logging::initialize_for_tests();
}

fn lines(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn write_then_read_round_trips() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("channels.txt");
    let content = lines(&["https://x.com/a", "", "https://x.com/b"]);

    write_lines(&path, &content).unwrap();
    assert_eq!(read_lines(&path).unwrap(), content);
}

#[test]
fn write_lines_joins_without_trailing_newline() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("channels.txt");

    write_lines(&path, &lines(&["a", "b"])).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb");
}

#[test]
fn read_lines_rejects_missing_file() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.txt");

    match read_lines(&path) {
        Err(StoreError::NotFound(reported)) => assert_eq!(reported, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn write_lines_fails_on_unwritable_location() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing_dir").join("channels.txt");

    assert!(matches!(
        write_lines(&path, &lines(&["a"])),
        Err(StoreError::Io(_))
    ));
}

#[test]
fn checkpoint_path_appends_tmp_suffix() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("channels.txt");
    assert_eq!(checkpoint_path(&path), temp.path().join("channels.txt.tmp"));
}

#[test]
fn load_resumable_prefers_checkpoint_over_original() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("channels.txt");
    write_lines(&path, &lines(&["a", "b", "c"])).unwrap();
    write_checkpoint(&path, &lines(&["b", "c"])).unwrap();

    let loaded = load_resumable(&path).unwrap();
    assert!(loaded.resumed);
    assert_eq!(loaded.lines, lines(&["b", "c"]));
}

#[test]
fn load_resumable_falls_back_to_original() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("channels.txt");
    write_lines(&path, &lines(&["a", "b", "c"])).unwrap();

    let loaded = load_resumable(&path).unwrap();
    assert!(!loaded.resumed);
    assert_eq!(loaded.lines, lines(&["a", "b", "c"]));
}

#[test]
fn clear_checkpoint_removes_file_and_tolerates_absence() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("channels.txt");
    write_checkpoint(&path, &lines(&["a"])).unwrap();
    assert!(checkpoint_path(&path).exists());

    clear_checkpoint(&path).unwrap();
    assert!(!checkpoint_path(&path).exists());

    // No checkpoint present is not an error.
    clear_checkpoint(&path).unwrap();
}
