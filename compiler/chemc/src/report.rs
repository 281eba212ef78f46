use chemc_eval::{Balance, BalanceReporter};
use serde::Serialize;
use std::io;

/// One line that failed the balance check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnbalancedLine {
    pub line: usize,
    /// Column of the unmatched `)`, absent when groups were left open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Groups still open at the end of the line
    pub unclosed: usize,
}

/// Machine-readable result of `chemc verify --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub file: String,
    pub balanced: bool,
    pub unbalanced_lines: Vec<UnbalancedLine>,
}

impl ValidationReport {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            balanced: true,
            unbalanced_lines: Vec::new(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl BalanceReporter for ValidationReport {
    fn unbalanced(&mut self, line_number: usize, balance: &Balance) -> io::Result<()> {
        let (column, unclosed) = match *balance {
            Balance::UnmatchedClose { column } => (Some(column), 0),
            Balance::Unclosed { open } => (None, open),
            Balance::Balanced => return Ok(()),
        };
        self.unbalanced_lines.push(UnbalancedLine {
            line: line_number,
            column,
            unclosed,
        });
        Ok(())
    }

    fn finished(&mut self, all_balanced: bool) -> io::Result<()> {
        self.balanced = all_balanced;
        Ok(())
    }
}
