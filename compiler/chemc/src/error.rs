use std::io;
use std::path::PathBuf;

use chemc_eval::EvalError;
use chemc_table::TableError;
use thiserror::Error;

/// Result type for batch runs
pub type BatchResult<T> = Result<T, BatchError>;

/// Errors that stop a batch run
#[derive(Debug, Error)]
pub enum BatchError {
    /// The formula file could not be opened
    #[error("could not open '{}': {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The element table could not be built
    #[error(transparent)]
    Table(#[from] TableError),

    /// A formula failed under the abort policy
    #[error("line {line_number}: {source}")]
    Formula {
        line_number: usize,
        formula: String,
        #[source]
        source: EvalError,
    },

    /// The balance gate rejected the formula file
    #[error("parentheses are not balanced in '{}'", path.display())]
    Unbalanced { path: PathBuf },

    /// The output file could not be created or written
    #[error("could not write '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to an unnamed sink failed
    #[error("write failed: {0}")]
    Write(#[from] io::Error),
}

impl BatchError {
    /// Process exit status for this error: 1 for bad formulas, 2 for
    /// unusable inputs or outputs.
    pub fn exit_code(&self) -> i32 {
        match self {
            BatchError::Formula { .. } | BatchError::Unbalanced { .. } => 1,
            BatchError::SourceUnavailable { .. }
            | BatchError::Table(_)
            | BatchError::Output { .. }
            | BatchError::Write(_) => 2,
        }
    }
}
