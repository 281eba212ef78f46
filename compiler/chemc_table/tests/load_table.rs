use std::io::Write;

use chemc_table::{ElementTable, TableError};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn definitions_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = definitions_file("Mg 12\nH 1\nO 8\n");
    let table = ElementTable::load(file.path()).unwrap();

    let listed: Vec<_> = table
        .iter()
        .map(|e| (e.symbol().to_string(), e.atomic_number()))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("H".to_string(), 1),
            ("O".to_string(), 8),
            ("Mg".to_string(), 12),
        ]
    );
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("periodicTable.txt");

    let err = ElementTable::load(&path).unwrap_err();
    match &err {
        TableError::NotFound { path: reported, .. } => assert_eq!(reported, &path),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("periodicTable.txt"));
}

#[test]
fn test_malformed_file_builds_no_table() {
    let file = definitions_file("H 1\nHe 2\nLi three\n");
    let err = ElementTable::load(file.path()).unwrap_err();
    assert!(matches!(err, TableError::Malformed { line: 3, .. }));
}

#[test]
fn test_standard_table_matches_definitions_file() {
    let standard = ElementTable::standard();
    let text: String = standard.iter().map(|e| format!("{e}\n")).collect();
    let file = definitions_file(&text);
    let loaded = ElementTable::load(file.path()).unwrap();

    assert_eq!(loaded.len(), standard.len());
    for element in &standard {
        assert_eq!(loaded.lookup(element.symbol()), Some(element.atomic_number()));
    }
}
