//! The per-line token stack.

use std::sync::Arc;

use crate::expansion::{Group, Term, Unit};

/// One stack entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackToken {
    /// Marker pushed for `(`
    GroupOpen,
    /// A resolved atom or group body, with its repeat count
    Atom(Term),
}

/// Why a stack operation could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// A group was closed with no `GroupOpen` below it
    Underflow,
    /// A multiplier found the stack empty
    NothingToRepeat,
    /// A multiplier found a `GroupOpen` on top
    RepeatsGroupOpen,
    /// Groups were still open when the stack was finished
    Unclosed(usize),
    /// Repeat counts or atom totals overflowed `u64`
    Overflow,
}

/// Ordered, mutable sequence of formula tokens for one line.
///
/// Invariant: `open_groups` equals the number of `GroupOpen` entries held.
#[derive(Debug, Default)]
pub struct TokenStack {
    tokens: Vec<StackToken>,
    open_groups: usize,
}

impl TokenStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: StackToken) {
        if token == StackToken::GroupOpen {
            self.open_groups += 1;
        }
        self.tokens.push(token);
    }

    pub fn pop(&mut self) -> Option<StackToken> {
        let token = self.tokens.pop()?;
        if token == StackToken::GroupOpen {
            self.open_groups -= 1;
        }
        Some(token)
    }

    /// Number of groups opened and not yet closed.
    pub fn open_groups(&self) -> usize {
        self.open_groups
    }

    /// Close the innermost group: pop everything above its `GroupOpen`
    /// and push the collected content back `multiplier` times.
    pub fn close_group(&mut self, multiplier: u32) -> Result<(), StackError> {
        let mut content = Vec::new();
        loop {
            match self.pop() {
                None => return Err(StackError::Underflow),
                Some(StackToken::GroupOpen) => break,
                Some(StackToken::Atom(term)) => content.push(term),
            }
        }
        content.reverse();

        if multiplier > 0 {
            let group = Group::new(content).ok_or(StackError::Overflow)?;
            let unit = Unit::Group(Arc::new(group));
            self.push(StackToken::Atom(Term::new(unit, u64::from(multiplier))));
        }
        Ok(())
    }

    /// Pop the top entry once and push it back `multiplier` times.
    pub fn repeat_top(&mut self, multiplier: u32) -> Result<(), StackError> {
        let term = match self.tokens.last_mut() {
            None => return Err(StackError::NothingToRepeat),
            Some(StackToken::GroupOpen) => return Err(StackError::RepeatsGroupOpen),
            Some(StackToken::Atom(term)) => term,
        };

        // The top entry stands for `count` consecutive copies; one of them is replaced.
        let count = (term.count() - 1)
            .checked_add(u64::from(multiplier))
            .ok_or(StackError::Overflow)?;
        if count == 0 {
            self.tokens.pop();
        } else {
            term.set_count(count);
        }
        Ok(())
    }

    /// Consume the stack into its resolved terms, bottom to top.
    pub fn into_terms(self) -> Result<Vec<Term>, StackError> {
        if self.open_groups > 0 {
            return Err(StackError::Unclosed(self.open_groups));
        }
        Ok(self
            .tokens
            .into_iter()
            .filter_map(|token| match token {
                StackToken::Atom(term) => Some(term),
                StackToken::GroupOpen => None,
            })
            .collect())
    }
}
