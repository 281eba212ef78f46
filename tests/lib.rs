//! Shared fixtures for the end-to-end tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Definitions for the elements the fixtures use.
pub const SMALL_TABLE: &str = "H 1\nHe 2\nC 6\nN 7\nO 8\nNa 11\nMg 12\nS 16\nCl 17\nK 19\nCa 20\n";

/// A scratch directory holding a table file and a formula file.
pub struct Fixture {
    dir: TempDir,
    pub table: PathBuf,
    pub formulas: PathBuf,
}

impl Fixture {
    pub fn new(table: &str, formulas: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let table_path = dir.path().join("elements.txt");
        let formulas_path = dir.path().join("formulas.txt");
        fs::write(&table_path, table).expect("write table");
        fs::write(&formulas_path, formulas).expect("write formulas");
        Self {
            dir,
            table: table_path,
            formulas: formulas_path,
        }
    }

    /// Path for a file inside the fixture directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("read output")
    }
}
