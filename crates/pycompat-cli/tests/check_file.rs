//! Integration tests for file-based checking.

use pycompat_cli::check_file;
use pycompat_core::{Error, Version};
use std::io::Write;

fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_check_file_reports_issues() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        &dir,
        "walrus.py",
        "if (n := 10) > 5:\n    print(n)\n",
    );

    let target = Version::parse("3.7").unwrap();
    let issues = check_file(&path, &target).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].feature_id, "named-expression");
    assert_eq!(issues[0].line, 1);
}

#[test]
fn test_check_file_clean_at_supporting_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        &dir,
        "walrus.py",
        "if (n := 10) > 5:\n    print(n)\n",
    );

    let target = Version::parse("3.8").unwrap();
    let issues = check_file(&path, &target).unwrap();
    assert!(issues.is_empty());
}

#[test]
fn test_missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.py");

    let target = Version::parse("3.7").unwrap();
    let error = check_file(&path, &target).unwrap_err();
    assert!(matches!(error, Error::SourceRead { .. }));
}

#[test]
fn test_unparsable_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "broken.py", "def broken(:\n");

    let target = Version::parse("3.7").unwrap();
    let error = check_file(&path, &target).unwrap_err();
    assert!(matches!(error, Error::SourceParse { .. }));
}

#[test]
fn test_malformed_target_fails_before_analysis() {
    let error = Version::parse("abc").unwrap_err();
    assert!(matches!(error, Error::MalformedVersion { .. }));
}
