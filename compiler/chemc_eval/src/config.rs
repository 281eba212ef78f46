/// Limits applied while evaluating a formula line.
///
/// `None` disables a limit. Buffers grow as needed, so the limits only exist
/// to reject pathological input with a clear error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// Longest accepted line, in characters
    pub max_line_len: Option<usize>,
    /// Longest accepted symbol or digit run, in characters
    pub max_token_len: Option<usize>,
    /// Deepest accepted group nesting
    pub max_depth: Option<usize>,
    /// Largest accepted number of atom occurrences in one expansion
    pub max_atoms: Option<u64>,
}

impl EvalConfig {
    /// A configuration with every limit disabled.
    pub fn unlimited() -> Self {
        Self {
            max_line_len: None,
            max_token_len: None,
            max_depth: None,
            max_atoms: None,
        }
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_line_len: None,
            max_token_len: None,
            max_depth: Some(256),
            max_atoms: Some(10_000_000),
        }
    }
}
