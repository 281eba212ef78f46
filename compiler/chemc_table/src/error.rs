use std::io;
use std::path::PathBuf;

/// Result type for table construction
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while building an [`ElementTable`](crate::ElementTable).
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The definitions file could not be opened or read
    #[error("could not open element definitions '{}': {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A definition pair is incomplete or its atomic number is not numeric
    #[error("malformed element definition on line {line}: {message}")]
    Malformed { line: usize, message: String },

    /// The same symbol was defined twice
    #[error("element symbol '{symbol}' is defined more than once")]
    DuplicateSymbol { symbol: String },
}

impl TableError {
    pub(crate) fn malformed<S: Into<String>>(line: usize, message: S) -> Self {
        TableError::Malformed {
            line,
            message: message.into(),
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
            TableError::malformed(3, "missing atomic number for 'He'").to_string(),
            "malformed element definition on line 3: missing atomic number for 'He'"
        );
        assert_eq!(
            TableError::DuplicateSymbol {
                symbol: "O".to_string()
            }
            .to_string(),
            "element symbol 'O' is defined more than once"
        );
    }
}
