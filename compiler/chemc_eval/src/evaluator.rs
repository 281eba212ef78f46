//! The stack-based formula evaluator.
//!
//! A line is lexed into tokens and walked left to right. Symbols are checked
//! against the element table and pushed as atoms, `(` pushes a group marker,
//! `)` folds everything above the innermost marker into one group, and a
//! digit run repeats whatever sits on top of the stack.

use chemc_lexer::{Lexer, Token, TokenKind};
use chemc_table::ElementTable;
use log::{debug, trace, warn};

use crate::config::EvalConfig;
use crate::error::{EvalError, EvalResult, GroupDefect};
use crate::expansion::{Expansion, Term};
use crate::stack::{StackError, StackToken, TokenStack};
use crate::summation::sum_atomic_numbers;
use crate::token_stream::TokenStream;

/// Evaluates formula lines against one element table.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'t> {
    table: &'t ElementTable,
    config: EvalConfig,
}

impl<'t> Evaluator<'t> {
    pub fn new(table: &'t ElementTable) -> Self {
        Self::with_config(table, EvalConfig::default())
    }

    pub fn with_config(table: &'t ElementTable, config: EvalConfig) -> Self {
        Self { table, config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn table(&self) -> &'t ElementTable {
        self.table
    }

    /// Expand one formula line into its resolved atom sequence.
    ///
    /// A trailing line terminator is ignored. Any error aborts the whole
    /// line; nothing partial is returned.
    pub fn expand(&self, line: &str) -> EvalResult<Expansion> {
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(max) = self.config.max_line_len {
            let len = line.chars().count();
            if len > max {
                return Err(EvalError::LineTooLong { len, max });
            }
        }

        let tokens: Vec<Token<'_>> = Lexer::new(line).collect();
        let mut stream = TokenStream::new(&tokens);
        let mut stack = TokenStack::new();
        let mut previous: Option<&Token<'_>> = None;
        debug!("evaluating '{line}' ({} tokens)", tokens.len());

        while let Some(token) = stream.next() {
            self.check_token_len(token)?;
            let column = token.location.column;

            match token.kind {
                TokenKind::Symbol => {
                    let element =
                        self.table
                            .get(token.lexeme)
                            .ok_or_else(|| EvalError::UnknownSymbol {
                                symbol: token.lexeme.to_string(),
                                column,
                            })?;
                    trace!("push atom {}", element.symbol());
                    stack.push(StackToken::Atom(Term::atom(element.shared_symbol().clone())));
                }
                TokenKind::Count(n) => {
                    trace!("repeat top x{n}");
                    stack
                        .repeat_top(n)
                        .map_err(|err| self.repeat_error(err, previous, column))?;
                }
                TokenKind::CountOverflow => {
                    return Err(EvalError::MultiplierOverflow {
                        digits: token.lexeme.to_string(),
                        column,
                    });
                }
                TokenKind::LeftParen => {
                    if let Some(max) = self.config.max_depth {
                        if stack.open_groups() >= max {
                            return Err(EvalError::NestingTooDeep { max, column });
                        }
                    }
                    stack.push(StackToken::GroupOpen);
                }
                TokenKind::RightParen => {
                    let multiplier = self.group_multiplier(token, &mut stream)?;
                    trace!("close group x{multiplier}");
                    stack
                        .close_group(multiplier)
                        .map_err(|err| self.stack_error(err, column))?;
                }
                TokenKind::Stray => {
                    return Err(EvalError::MalformedGroup {
                        defect: GroupDefect::StrayLowercase(token.lexeme.to_string()),
                        column,
                    });
                }
                TokenKind::Unrecognized => {
                    warn!("ignoring '{}' at column {column}", token.lexeme);
                }
            }
            previous = Some(token);
        }

        let end_column = line.chars().count() + 1;
        let terms = stack
            .into_terms()
            .map_err(|err| self.stack_error(err, end_column))?;
        let expansion = Expansion::from_terms(terms).ok_or_else(|| self.too_large())?;
        if let Some(limit) = self.config.max_atoms {
            if expansion.atom_count() > limit {
                return Err(EvalError::ExpansionTooLarge { limit });
            }
        }

        debug!("'{line}' expands to {} atoms", expansion.atom_count());
        Ok(expansion)
    }

    /// Expand one formula line and sum the atomic numbers of its atoms.
    pub fn sum(&self, line: &str) -> EvalResult<u64> {
        let expansion = self.expand(line)?;
        sum_atomic_numbers(&expansion, self.table)
    }

    /// The multiplier glued to a `)`, or 1 when none follows.
    fn group_multiplier(
        &self,
        close: &Token<'_>,
        stream: &mut TokenStream<'_, '_>,
    ) -> EvalResult<u32> {
        let Some(next) = stream.next_adjacent(close, |kind| {
            matches!(kind, TokenKind::Count(_) | TokenKind::CountOverflow)
        }) else {
            return Ok(1);
        };
        self.check_token_len(next)?;
        match next.kind {
            TokenKind::Count(n) => Ok(n),
            _ => Err(EvalError::MultiplierOverflow {
                digits: next.lexeme.to_string(),
                column: next.location.column,
            }),
        }
    }

    fn check_token_len(&self, token: &Token<'_>) -> EvalResult<()> {
        let Some(max) = self.config.max_token_len else {
            return Ok(());
        };
        let counted = matches!(
            token.kind,
            TokenKind::Symbol | TokenKind::Count(_) | TokenKind::CountOverflow | TokenKind::Stray
        );
        if counted && token.width() > max {
            return Err(EvalError::TokenTooLong {
                token: token.lexeme.to_string(),
                column: token.location.column,
                max,
            });
        }
        Ok(())
    }

    fn stack_error(&self, err: StackError, column: usize) -> EvalError {
        let defect = match err {
            StackError::Underflow => return EvalError::StackUnderflow { column },
            StackError::Overflow => return self.too_large(),
            StackError::NothingToRepeat => GroupDefect::NothingToRepeat,
            StackError::RepeatsGroupOpen => GroupDefect::RepeatsGroupOpen,
            StackError::Unclosed(n) => GroupDefect::Unclosed(n),
        };
        EvalError::MalformedGroup { defect, column }
    }

    /// A multiplier with nothing to repeat is blamed on a skipped character
    /// right before it, when there is one.
    fn repeat_error(
        &self,
        err: StackError,
        previous: Option<&Token<'_>>,
        column: usize,
    ) -> EvalError {
        match (err, previous) {
            (StackError::NothingToRepeat | StackError::RepeatsGroupOpen, Some(ignored))
                if ignored.kind == TokenKind::Unrecognized =>
            {
                EvalError::MalformedGroup {
                    defect: GroupDefect::FollowsIgnored(ignored.lexeme.to_string()),
                    column: ignored.location.column,
                }
            }
            (err, _) => self.stack_error(err, column),
        }
    }

    fn too_large(&self) -> EvalError {
        EvalError::ExpansionTooLarge {
            limit: self.config.max_atoms.unwrap_or(u64::MAX),
        }
    }
}

/// Expand `line` with the default limits.
pub fn expand(line: &str, table: &ElementTable) -> EvalResult<Expansion> {
    Evaluator::new(table).expand(line)
}
