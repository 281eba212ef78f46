//! Chemical formula lexical analyzer
//!
//! This crate turns a single formula line such as `K4(ON(SO3)2)2` into a
//! sequence of located tokens: element symbols, digit runs, parentheses and
//! the malformed runs the evaluator has to reject.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod lexer;
pub mod logos_token;
pub mod token;

// Re-export the main types for convenience
pub use lexer::Lexer;
pub use logos_token::{LexError, LogosToken};
pub use token::{Location, Token, TokenKind};
