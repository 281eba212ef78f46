use std::fmt;

use thiserror::Error;

/// Result type for formula evaluation
pub type EvalResult<T> = Result<T, EvalError>;

/// What is structurally wrong with a group or multiplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupDefect {
    /// Lowercase letters with no uppercase letter in front of them
    StrayLowercase(String),
    /// A multiplier at the start of the line or group with nothing to repeat
    NothingToRepeat,
    /// A multiplier directly after `(`
    RepeatsGroupOpen,
    /// The line ended with groups still open
    Unclosed(usize),
    /// A multiplier whose only predecessor is an ignored character
    FollowsIgnored(String),
}

impl fmt::Display for GroupDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupDefect::StrayLowercase(run) => write!(f, "stray lowercase '{run}'"),
            GroupDefect::NothingToRepeat => write!(f, "multiplier has nothing to repeat"),
            GroupDefect::RepeatsGroupOpen => write!(f, "multiplier directly follows '('"),
            GroupDefect::Unclosed(1) => write!(f, "1 group is never closed"),
            GroupDefect::Unclosed(n) => write!(f, "{n} groups are never closed"),
            GroupDefect::FollowsIgnored(c) => {
                write!(f, "multiplier follows ignored character '{c}'")
            }
        }
    }
}

/// Coarse classification of evaluation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownSymbol,
    MalformedGroup,
    StackUnderflow,
    /// A configured or arithmetic limit was exceeded
    LimitExceeded,
}

/// Errors that abort the evaluation of one formula line
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    /// A symbol the element table does not define
    #[error("unknown element symbol '{symbol}' at column {column}")]
    UnknownSymbol { symbol: String, column: usize },

    /// Structurally invalid formula syntax
    #[error("malformed formula at column {column}: {defect}")]
    MalformedGroup { defect: GroupDefect, column: usize },

    /// `)` with no open group to close
    #[error("unmatched ')' at column {column}")]
    StackUnderflow { column: usize },

    /// A multiplier that does not fit in 32 bits
    #[error("multiplier '{digits}' at column {column} is too large")]
    MultiplierOverflow { digits: String, column: usize },

    /// Line longer than the configured limit
    #[error("line has {len} characters, the limit is {max}")]
    LineTooLong { len: usize, max: usize },

    /// Symbol or digit run longer than the configured limit
    #[error("token '{token}' at column {column} is longer than {max} characters")]
    TokenTooLong {
        token: String,
        column: usize,
        max: usize,
    },

    /// Groups nested deeper than the configured limit
    #[error("groups nested deeper than {max} at column {column}")]
    NestingTooDeep { max: usize, column: usize },

    /// The expansion holds more atoms than allowed
    #[error("expansion exceeds {limit} atoms")]
    ExpansionTooLarge { limit: u64 },

    /// The proton sum does not fit in 64 bits
    #[error("proton sum overflows a 64-bit integer")]
    SumOverflow,
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::UnknownSymbol { .. } => ErrorKind::UnknownSymbol,
            EvalError::MalformedGroup { .. } => ErrorKind::MalformedGroup,
            EvalError::StackUnderflow { .. } => ErrorKind::StackUnderflow,
            EvalError::MultiplierOverflow { .. }
            | EvalError::LineTooLong { .. }
            | EvalError::TokenTooLong { .. }
            | EvalError::NestingTooDeep { .. }
            | EvalError::ExpansionTooLarge { .. }
            | EvalError::SumOverflow => ErrorKind::LimitExceeded,
        }
    }

    /// The 1-based column the error points at, when it has one.
    pub fn column(&self) -> Option<usize> {
        match self {
            EvalError::UnknownSymbol { column, .. }
            | EvalError::MalformedGroup { column, .. }
            | EvalError::StackUnderflow { column }
            | EvalError::MultiplierOverflow { column, .. }
            | EvalError::TokenTooLong { column, .. }
            | EvalError::NestingTooDeep { column, .. } => Some(*column),
            EvalError::LineTooLong { .. }
            | EvalError::ExpansionTooLarge { .. }
            | EvalError::SumOverflow => None,
        }
    }

    /// Number of characters the error spans, starting at [`column`](Self::column).
    pub fn width(&self) -> usize {
        match self {
            EvalError::UnknownSymbol { symbol, .. } => symbol.chars().count(),
            EvalError::MalformedGroup {
                defect: GroupDefect::StrayLowercase(run) | GroupDefect::FollowsIgnored(run),
                ..
            } => run.chars().count(),
            EvalError::MultiplierOverflow { digits, .. } => digits.len(),
            EvalError::TokenTooLong { token, .. } => token.chars().count(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        assert_eq!(
            EvalError::UnknownSymbol {
                symbol: "Xx".to_string(),
                column: 3
            }
            .to_string(),
            "unknown element symbol 'Xx' at column 3"
        );
        assert_eq!(
            EvalError::MalformedGroup {
                defect: GroupDefect::Unclosed(2),
                column: 9
            }
            .to_string(),
            "malformed formula at column 9: 2 groups are never closed"
        );
        assert_eq!(
            EvalError::StackUnderflow { column: 3 }.to_string(),
            "unmatched ')' at column 3"
        );
    }

    #[test]
    fn test_kind_and_span() {
        let err = EvalError::MalformedGroup {
            defect: GroupDefect::StrayLowercase("ab".to_string()),
            column: 4,
        };
        assert_eq!(err.kind(), ErrorKind::MalformedGroup);
        assert_eq!(err.column(), Some(4));
        assert_eq!(err.width(), 2);

        let err = EvalError::MalformedGroup {
            defect: GroupDefect::FollowsIgnored("+".to_string()),
            column: 1,
        };
        assert_eq!(
            err.to_string(),
            "malformed formula at column 1: multiplier follows ignored character '+'"
        );
        assert_eq!(err.width(), 1);

        let err = EvalError::ExpansionTooLarge { limit: 10 };
        assert_eq!(err.kind(), ErrorKind::LimitExceeded);
        assert_eq!(err.column(), None);
    }
}
