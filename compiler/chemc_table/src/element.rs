use std::fmt;
use std::sync::Arc;

/// One table entry: an element symbol and its atomic number.
///
/// The symbol is reference counted so evaluators can hand it out without
/// copying the string for every atom occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    symbol: Arc<str>,
    atomic_number: u32,
}

impl Element {
    pub fn new(symbol: impl Into<Arc<str>>, atomic_number: u32) -> Self {
        Self {
            symbol: symbol.into(),
            atomic_number,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The shared symbol handle stored in the table.
    pub fn shared_symbol(&self) -> &Arc<str> {
        &self.symbol
    }

    pub fn atomic_number(&self) -> u32 {
        self.atomic_number
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol, self.atomic_number)
    }
}

/// Whether `symbol` can be written in a formula: one ASCII uppercase letter
/// followed by zero or more ASCII lowercase letters.
pub fn is_formula_symbol(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => chars.all(|c| c.is_ascii_lowercase()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_symbol_shapes() {
        assert!(is_formula_symbol("H"));
        assert!(is_formula_symbol("Mg"));
        assert!(is_formula_symbol("Uue"));
        assert!(!is_formula_symbol(""));
        assert!(!is_formula_symbol("mg"));
        assert!(!is_formula_symbol("MG"));
        assert!(!is_formula_symbol("C1"));
    }

    #[test]
    fn test_element_display() {
        assert_eq!(Element::new("Fe", 26).to_string(), "Fe 26");
    }
}
