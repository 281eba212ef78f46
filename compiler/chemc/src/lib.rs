//! Batch front end for the chemc formula tools.
//!
//! Reads formula files line by line and writes flattened formulas, proton
//! sums or parenthesis reports. The `chemc` binary is a thin clap wrapper
//! around [`batch`].

pub mod batch;
pub mod error;
pub mod report;

pub use batch::{
    check_file, expand_file, process, read_formulas, sum_file, verify_file, BatchOptions,
    BatchSummary, ErrorPolicy, LineFailure,
};
pub use error::{BatchError, BatchResult};
pub use report::{UnbalancedLine, ValidationReport};
