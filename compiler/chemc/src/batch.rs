//! Line-at-a-time batch processing of formula files.
//!
//! Every mode reads the formula file up front, stopping at the first blank
//! or unreadable line. Expansion and summation then run each formula through
//! one [`Evaluator`] and write one result line per formula.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use chemc_eval::{
    validate_lines, BalanceReporter, EvalConfig, EvalError, EvalResult, Evaluator, Silent,
};
use chemc_table::ElementTable;
use log::{debug, info, warn};

use crate::error::{BatchError, BatchResult};

/// What to do when a formula fails to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first failing formula
    #[default]
    Abort,
    /// Record the failure, write nothing for that line and go on
    Skip,
}

/// Settings for one batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub eval: EvalConfig,
    pub on_error: ErrorPolicy,
}

/// A formula that failed under [`ErrorPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFailure {
    /// 1-based line in the formula file
    pub line_number: usize,
    pub formula: String,
    pub error: EvalError,
}

/// Outcome of a batch run that was not aborted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Formulas read from the input
    pub processed: usize,
    /// Result lines written
    pub written: usize,
    pub failures: Vec<LineFailure>,
}

impl BatchSummary {
    /// Whether every formula produced a result.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Read the formulas of `path`, one per line.
///
/// Reading stops without error at the first blank line or at a line that
/// is not valid UTF-8.
pub fn read_formulas(path: &Path) -> BatchResult<Vec<String>> {
    let file = File::open(path).map_err(|source| BatchError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut formulas = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(
                    "stopped reading '{}' at line {}: {err}",
                    path.display(),
                    formulas.len() + 1
                );
                break;
            }
        };
        let formula = line.trim_end_matches('\r');
        if formula.trim().is_empty() {
            break;
        }
        formulas.push(formula.to_string());
    }

    debug!("read {} formulas from '{}'", formulas.len(), path.display());
    Ok(formulas)
}

/// Evaluate each formula with `compute` and write one line per result.
///
/// Under [`ErrorPolicy::Abort`] the first failure is returned as
/// [`BatchError::Formula`]; lines written before it stay written.
pub fn process<W, F>(
    formulas: &[String],
    evaluator: &Evaluator<'_>,
    policy: ErrorPolicy,
    out: &mut W,
    compute: F,
) -> BatchResult<BatchSummary>
where
    W: Write,
    F: Fn(&Evaluator<'_>, &str) -> EvalResult<String>,
{
    let mut summary = BatchSummary::default();
    for (index, formula) in formulas.iter().enumerate() {
        let line_number = index + 1;
        summary.processed += 1;
        match compute(evaluator, formula) {
            Ok(result) => {
                writeln!(out, "{result}")?;
                summary.written += 1;
            }
            Err(error) if policy == ErrorPolicy::Skip => {
                warn!("skipping line {line_number}: {error}");
                summary.failures.push(LineFailure {
                    line_number,
                    formula: formula.clone(),
                    error,
                });
            }
            Err(source) => {
                return Err(BatchError::Formula {
                    line_number,
                    formula: formula.clone(),
                    source,
                })
            }
        }
    }
    Ok(summary)
}

/// Write the flattened form of every formula in `formulas` to `output`.
pub fn expand_file(
    table: &ElementTable,
    formulas: &Path,
    output: &Path,
    options: &BatchOptions,
) -> BatchResult<BatchSummary> {
    info!("expanding formulas in '{}'", formulas.display());
    run_to_file(table, formulas, output, options, |evaluator, line| {
        Ok(evaluator.expand(line)?.render())
    })
}

/// Write the proton sum of every formula in `formulas` to `output`.
pub fn sum_file(
    table: &ElementTable,
    formulas: &Path,
    output: &Path,
    options: &BatchOptions,
) -> BatchResult<BatchSummary> {
    info!("summing proton numbers of formulas in '{}'", formulas.display());
    run_to_file(table, formulas, output, options, |evaluator, line| {
        evaluator.sum(line).map(|protons| protons.to_string())
    })
}

/// Whether every formula in `path` has balanced parentheses.
pub fn check_file(path: &Path) -> BatchResult<bool> {
    verify_file(path, &mut Silent)
}

/// Check every formula in `path`, reporting failures to `reporter`.
pub fn verify_file<R>(path: &Path, reporter: &mut R) -> BatchResult<bool>
where
    R: BalanceReporter + ?Sized,
{
    let formulas = read_formulas(path)?;
    let balanced = validate_lines(&formulas, reporter)?;
    info!(
        "'{}': {}",
        path.display(),
        if balanced { "balanced" } else { "not balanced" }
    );
    Ok(balanced)
}

fn run_to_file<F>(
    table: &ElementTable,
    formulas_path: &Path,
    output: &Path,
    options: &BatchOptions,
    compute: F,
) -> BatchResult<BatchSummary>
where
    F: Fn(&Evaluator<'_>, &str) -> EvalResult<String>,
{
    let formulas = read_formulas(formulas_path)?;

    // Skipping lets the evaluator reject unbalanced lines one by one.
    if options.on_error == ErrorPolicy::Abort && !validate_lines(&formulas, &mut Silent)? {
        return Err(BatchError::Unbalanced {
            path: formulas_path.to_path_buf(),
        });
    }

    let output_error = |source: std::io::Error| BatchError::Output {
        path: output.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(output).map_err(output_error)?);
    let evaluator = Evaluator::with_config(table, options.eval);

    let result = process(&formulas, &evaluator, options.on_error, &mut out, compute);
    out.flush().map_err(output_error)?;
    let summary = result.map_err(|err| match err {
        BatchError::Write(source) => output_error(source),
        other => other,
    })?;

    info!(
        "wrote {} of {} results to '{}'",
        summary.written,
        summary.processed,
        output.display()
    );
    Ok(summary)
}
