//! Integration tests for reading files last line first.

mod common;

use std::fs;

use common::{create_temp_dir, path_str};
use fskit::config::{Config, ReaderConfig};
use fskit::entity::FileEntity;
use fskit::reader::ReverseLineReader;
use fskit::Error;

fn write_file(contents: &[u8]) -> (tempfile::TempDir, String) {
    let dir = create_temp_dir();
    let path = dir.path().join("input.txt");
    fs::write(&path, contents).unwrap();
    (dir, path_str(&path))
}

fn read_all(path: &str, newline: &str, chunk_size: usize) -> Vec<String> {
    ReverseLineReader::open(path, newline, chunk_size)
        .unwrap()
        .collect::<fskit::Result<Vec<_>>>()
        .unwrap()
}

#[test]
fn test_lines_come_back_last_first() {
    let (_dir, path) = write_file(b"first\nsecond\nthird");
    assert_eq!(read_all(&path, "\n", 8192), ["third", "second", "first"]);
}

#[test]
fn test_trailing_delimiter_yields_empty_first_line() {
    let (_dir, path) = write_file(b"one\ntwo\n");
    assert_eq!(read_all(&path, "\n", 8192), ["", "two", "one"]);
}

#[test]
fn test_empty_file_yields_nothing() {
    let (_dir, path) = write_file(b"");
    assert!(read_all(&path, "\n", 16).is_empty());
}

#[test]
fn test_every_chunk_size_reproduces_file() {
    let contents = "alpha\r\nbeta\r\n\r\ngamma delta\r\nepsilon\r\n";
    let (_dir, path) = write_file(contents.as_bytes());

    for chunk_size in 1..=contents.len() + 3 {
        let mut lines = read_all(&path, "\r\n", chunk_size);
        lines.reverse();
        assert_eq!(lines.join("\r\n"), contents, "chunk size {chunk_size}");
    }
}

#[test]
fn test_multibyte_delimiter_split_across_chunks() {
    let (_dir, path) = write_file(b"a---bb---ccc");
    for chunk_size in 1..=5 {
        assert_eq!(read_all(&path, "---", chunk_size), ["ccc", "bb", "a"]);
    }
}

#[test]
fn test_line_numbers_and_rewind() {
    let (_dir, path) = write_file(b"x\ny\nz");
    let mut reader = ReverseLineReader::open(&path, "\n", 2).unwrap();
    assert_eq!(reader.line_number(), None);

    assert_eq!(reader.next().unwrap().unwrap(), "z");
    assert_eq!(reader.line_number(), Some(0));
    assert_eq!(reader.next().unwrap().unwrap(), "y");
    assert_eq!(reader.line_number(), Some(1));

    reader.rewind();
    assert_eq!(reader.line_number(), None);
    assert_eq!(reader.next().unwrap().unwrap(), "z");
}

#[test]
fn test_reader_from_config() {
    let (_dir, path) = write_file(b"a|b|c");
    let config = Config {
        reader: Some(ReaderConfig {
            chunk_size: Some(2),
            newline: Some("|".to_string()),
        }),
        ..Default::default()
    };
    let lines: Vec<String> = ReverseLineReader::from_config(&path, &config)
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(lines, ["c", "b", "a"]);
}

#[test]
fn test_reader_from_file_entity() {
    let (_dir, path) = write_file(b"1\n2\n3\n4");
    let last_two: Vec<String> = FileEntity::new(path)
        .reverse_lines("\n", 3)
        .unwrap()
        .take(2)
        .map(Result::unwrap)
        .collect();
    assert_eq!(last_two, ["4", "3"]);
}

#[test]
fn test_invalid_arguments() {
    let (_dir, path) = write_file(b"x");
    assert!(matches!(
        ReverseLineReader::open(&path, "", 10),
        Err(Error::Validation { .. })
    ));
    assert!(matches!(
        ReverseLineReader::open(&path, "\n", 0),
        Err(Error::Validation { .. })
    ));
    assert!(ReverseLineReader::open("/no/such/file", "\n", 10)
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_invalid_utf8_is_reported_per_line() {
    let (_dir, path) = write_file(b"ok\n\xff\xfe\nlast");
    let results: Vec<_> = ReverseLineReader::open(&path, "\n", 4).unwrap().collect();
    assert_eq!(results[0].as_ref().unwrap(), "last");
    assert!(matches!(results[1], Err(Error::InvalidEncoding { .. })));
}

#[test]
fn test_large_file_bounded_chunks() {
    let lines: Vec<String> = (0..5000).map(|i| format!("line number {i}")).collect();
    let (_dir, path) = write_file(lines.join("\n").as_bytes());

    let read = read_all(&path, "\n", 1000);
    assert_eq!(read.len(), 5000);
    assert_eq!(read[0], "line number 4999");
    assert_eq!(read[4999], "line number 0");
}
