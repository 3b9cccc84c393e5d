use assert_fs::prelude::*;
use combine_fs::{Error, NormalizedPath, io};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_read_text_returns_file_contents() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("api.yaml");
    fs::write(&file_path, "openapi: 3.0.0\n").unwrap();

    let content = io::read_text(&NormalizedPath::new(&file_path)).unwrap();
    assert_eq!(content, "openapi: 3.0.0\n");
}

#[test]
fn test_read_text_missing_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("does_not_exist.yaml"));

    let err = io::read_text(&path).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.path().ends_with("does_not_exist.yaml"));
    assert!(err.to_string().contains("does_not_exist.yaml"));
}

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("combined.yaml"));

    io::write_atomic(&path, b"---\na: 1\n").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "---\na: 1\n");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("combined.yaml");
    target.write_str("original").unwrap();

    io::write_text(&NormalizedPath::new(target.path()), "updated").unwrap();

    target.assert("updated");
}

#[test]
fn test_write_text_creates_parent_directories() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("out/nested/combined.yaml");

    io::write_text(&NormalizedPath::new(target.path()), "---\nb: 2\n").unwrap();

    target.assert(predicate::path::exists());
    target.assert(predicate::str::contains("b: 2"));
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("combined.yaml"));

    io::write_text(&path, "content").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "found temp files: {:?}", leftovers);
}

#[test]
fn test_failed_write_removes_temp_file() {
    let temp = TempDir::new().unwrap();
    // A non-empty directory cannot be replaced by a file
    let target = temp.path().join("combined.yaml");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep.txt"), "x").unwrap();

    let err = io::write_text(&NormalizedPath::new(&target), "---\na: 1\n").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["combined.yaml".to_string()]);
    assert!(target.join("keep.txt").exists());
}
