//! Chemical formula evaluation.
//!
//! Formulas such as `K4(ON(SO3)2)2` are lexed, walked over a token stack and
//! resolved into an [`Expansion`]: the ordered sequence of atom occurrences
//! the formula denotes. From an expansion the crate derives the flattened
//! formula text ([`render`]) and the sum of atomic numbers
//! ([`sum_atomic_numbers`]). Parenthesis balance is checked separately by
//! [`balance`], which does not need an element table.
//!
//! ```
//! use chemc_eval::Evaluator;
//! use chemc_table::ElementTable;
//!
//! let table = ElementTable::standard();
//! let evaluator = Evaluator::new(&table);
//! assert_eq!(evaluator.expand("Mg(OH)2").unwrap().render(), "MgOHOH");
//! assert_eq!(evaluator.sum("Mg(OH)2").unwrap(), 30);
//! ```

pub mod balance;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod evaluator;
pub mod expansion;
pub mod stack;
pub mod summation;
pub mod token_stream;

pub use balance::{
    check_balance, is_balanced, validate_lines, Balance, BalanceReporter, Silent, Verbose,
};
pub use config::EvalConfig;
pub use diagnostics::render_snippet;
pub use error::{ErrorKind, EvalError, EvalResult, GroupDefect};
pub use evaluator::{expand, Evaluator};
pub use expansion::{render, Atoms, Expansion, Group, Symbol, Term, Unit};
pub use stack::{StackError, StackToken, TokenStack};
pub use summation::sum_atomic_numbers;
pub use token_stream::TokenStream;
