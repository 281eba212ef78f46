//! Parenthesis balance checks.
//!
//! Only `(` and `)` are looked at; every other character is ignored. The
//! silent and verbose modes run the same scan and differ only in the
//! [`BalanceReporter`] they hand it.

use std::io::{self, Write};

/// Outcome of scanning one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Balance {
    Balanced,
    /// A `)` at this 1-based column had nothing to close
    UnmatchedClose { column: usize },
    /// The line ended with this many groups still open
    Unclosed { open: usize },
}

impl Balance {
    pub fn is_balanced(&self) -> bool {
        matches!(self, Balance::Balanced)
    }
}

/// Scan `line`, stopping at the first unmatched `)`.
pub fn check_balance(line: &str) -> Balance {
    let mut open = 0usize;
    for (index, c) in line.chars().enumerate() {
        match c {
            '(' => open += 1,
            ')' if open == 0 => return Balance::UnmatchedClose { column: index + 1 },
            ')' => open -= 1,
            _ => {}
        }
    }
    if open == 0 {
        Balance::Balanced
    } else {
        Balance::Unclosed { open }
    }
}

pub fn is_balanced(line: &str) -> bool {
    check_balance(line).is_balanced()
}

/// Receives the results of a multi-line balance scan.
pub trait BalanceReporter {
    /// Called for each failing line, `line_number` is 1-based.
    fn unbalanced(&mut self, _line_number: usize, _balance: &Balance) -> io::Result<()> {
        Ok(())
    }

    /// Called once after the last line.
    fn finished(&mut self, _all_balanced: bool) -> io::Result<()> {
        Ok(())
    }
}

/// Reports nothing; only the aggregate result matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl BalanceReporter for Silent {}

/// Writes one line per failing formula, or a summary when all pass.
#[derive(Debug)]
pub struct Verbose<W: Write> {
    out: W,
}

impl<W: Write> Verbose<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> BalanceReporter for Verbose<W> {
    fn unbalanced(&mut self, line_number: usize, _balance: &Balance) -> io::Result<()> {
        writeln!(self.out, "Parentheses NOT balanced in line: {line_number}")
    }

    fn finished(&mut self, all_balanced: bool) -> io::Result<()> {
        if all_balanced {
            writeln!(self.out, "Parentheses are balanced for all chemical formulas")?;
        }
        self.out.flush()
    }
}

/// Check every line and report failures; returns whether all were balanced.
///
/// The scan always covers the whole input, even after a failure.
pub fn validate_lines<I, S, R>(lines: I, reporter: &mut R) -> io::Result<bool>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: BalanceReporter + ?Sized,
{
    let mut all_balanced = true;
    for (index, line) in lines.into_iter().enumerate() {
        let balance = check_balance(line.as_ref());
        if !balance.is_balanced() {
            log::debug!("line {} is unbalanced: {balance:?}", index + 1);
            all_balanced = false;
            reporter.unbalanced(index + 1, &balance)?;
        }
    }
    reporter.finished(all_balanced)?;
    Ok(all_balanced)
}
