use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;
use tagger_fs::{NormalizedPath, io};
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("main.tf"));

    io::write_atomic(&path, b"resource \"aws_s3_bucket\" \"b\" {}\n").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "resource \"aws_s3_bucket\" \"b\" {}\n");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("template.yaml");
    file.write_str("original").unwrap();

    io::write_atomic(&NormalizedPath::new(file.path()), b"updated").unwrap();

    file.assert("updated");
}

#[test]
fn test_write_text_keeps_crlf_bytes() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("template.json");

    io::write_text(&NormalizedPath::new(file.path()), "{\r\n}\r\n").unwrap();

    file.assert(predicate::str::contains("\r\n"));
    assert_eq!(fs::read(file.path()).unwrap(), b"{\r\n}\r\n");
}

#[test]
fn test_read_text_existing_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("stack.yml");
    file.write_str("a: 1\r\nb: 2").unwrap();

    let content = io::read_text(&NormalizedPath::new(file.path())).unwrap();
    assert_eq!(content, "a: 1\r\nb: 2");
}

#[test]
fn test_read_text_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/file.yaml");
    let result = io::read_text(&path);
    assert!(result.is_err());
    assert!(!result.unwrap_err().is_decode_error());
}
