//! The element table and its definitions-file parser.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, warn};
use nom::branch::alt;
use nom::bytes::complete::take_till1;
use nom::character::complete::{multispace0, multispace1, u32 as decimal_u32};
use nom::combinator::{eof, peek};
use nom::error::Error as NomError;
use nom::sequence::terminated;
use nom::IResult;

use crate::element::{is_formula_symbol, Element};
use crate::error::{TableError, TableResult};

/// Immutable lookup from element symbol to atomic number.
///
/// Entries are kept sorted by ascending atomic number; lookups go through a
/// symbol index and are exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    elements: Vec<Element>,
    index: HashMap<Arc<str>, usize>,
}

impl ElementTable {
    /// Load a table from a definitions file.
    pub fn load<P: AsRef<Path>>(path: P) -> TableResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TableError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_definitions(&text)?;
        debug!(
            "loaded {} elements from '{}'",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse a table from definitions text: whitespace-separated
    /// `symbol atomic-number` pairs, line breaks optional.
    pub fn from_definitions(text: &str) -> TableResult<Self> {
        let elements = parse_definitions(text)?;
        Self::from_elements(elements)
    }

    /// Build a table from already constructed entries.
    pub fn from_elements<I>(elements: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = Element>,
    {
        let mut elements: Vec<Element> = elements.into_iter().collect();
        // Stable, so entries sharing a number keep their definition order.
        elements.sort_by_key(Element::atomic_number);

        let mut index = HashMap::with_capacity(elements.len());
        for (position, element) in elements.iter().enumerate() {
            if !is_formula_symbol(element.symbol()) {
                warn!(
                    "element symbol '{}' can never appear in a formula",
                    element.symbol()
                );
            }
            if index
                .insert(Arc::clone(element.shared_symbol()), position)
                .is_some()
            {
                return Err(TableError::DuplicateSymbol {
                    symbol: element.symbol().to_string(),
                });
            }
        }

        Ok(Self { elements, index })
    }

    /// The entry for `symbol`, if any.
    pub fn get(&self, symbol: &str) -> Option<&Element> {
        self.index.get(symbol).map(|&i| &self.elements[i])
    }

    /// The atomic number for `symbol`, if the table defines it.
    pub fn lookup(&self, symbol: &str) -> Option<u32> {
        self.get(symbol).map(Element::atomic_number)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// Entries in ascending atomic-number order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromStr for ElementTable {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_definitions(s)
    }
}

impl<'a> IntoIterator for &'a ElementTable {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A run of non-whitespace characters
fn word(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

/// A decimal atomic number that is a whole word
fn atomic_number(input: &str) -> IResult<&str, u32> {
    terminated(decimal_u32, peek(alt((multispace1, eof))))(input)
}

fn skip_whitespace(input: &str) -> &str {
    multispace0::<&str, NomError<&str>>(input)
        .map(|(rest, _)| rest)
        .unwrap_or(input)
}

/// 1-based line of `rest` within `text`, where `rest` is a suffix of `text`
fn line_of(text: &str, rest: &str) -> usize {
    let consumed = text.len() - rest.len();
    text[..consumed].matches('\n').count() + 1
}

fn parse_definitions(text: &str) -> TableResult<Vec<Element>> {
    let mut elements = Vec::new();
    let mut rest = skip_whitespace(text);

    while !rest.is_empty() {
        let (after_symbol, symbol) = word(rest)
            .map_err(|_| TableError::malformed(line_of(text, rest), "expected an element symbol"))?;

        let missing = || {
            TableError::malformed(
                line_of(text, after_symbol),
                format!("missing atomic number for '{symbol}'"),
            )
        };
        let (number_input, _) =
            multispace1::<&str, NomError<&str>>(after_symbol).map_err(|_| missing())?;
        if number_input.is_empty() {
            return Err(missing());
        }

        let (after_number, number) = atomic_number(number_input).map_err(|_| {
            let found = word(number_input).map(|(_, w)| w).unwrap_or(number_input);
            TableError::malformed(
                line_of(text, number_input),
                format!("'{found}' is not a valid atomic number for '{symbol}'"),
            )
        })?;

        elements.push(Element::new(symbol, number));
        rest = skip_whitespace(after_number);
    }

    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_pairs_across_lines() {
        let table = ElementTable::from_definitions("H 1\nO 8\nMg 12\n").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.lookup("Mg"), Some(12));
        assert_eq!(table.lookup("O"), Some(8));
        assert!(table.contains("H"));
        assert!(!table.contains("h"));
        assert_eq!(table.lookup("Na"), None);
    }

    #[test]
    fn test_pairs_may_share_a_line() {
        let table: ElementTable = "  Na 11 Cl\t17\r\n".parse().unwrap();
        assert_eq!(table.lookup("Na"), Some(11));
        assert_eq!(table.lookup("Cl"), Some(17));
    }

    #[test]
    fn test_sorted_by_atomic_number() {
        let table = ElementTable::from_definitions("O 8\nH 1\nC 6\n").unwrap();
        let symbols: Vec<_> = table.iter().map(Element::symbol).collect();
        assert_eq!(symbols, vec!["H", "C", "O"]);
    }

    #[test]
    fn test_empty_definitions() {
        let table = ElementTable::from_definitions(" \n\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_number() {
        let err = ElementTable::from_definitions("H 1\nHe").unwrap_err();
        match err {
            TableError::Malformed { line, message } => {
                assert_eq!(line, 2);
                assert_eq!(message, "missing atomic number for 'He'");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = ElementTable::from_definitions("H 1\nHe \n").unwrap_err();
        assert!(matches!(err, TableError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_non_numeric_number() {
        let err = ElementTable::from_definitions("H 1\nO eight\n").unwrap_err();
        match err {
            TableError::Malformed { line, message } => {
                assert_eq!(line, 2);
                assert_eq!(message, "'eight' is not a valid atomic number for 'O'");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(matches!(
            ElementTable::from_definitions("H 1x"),
            Err(TableError::Malformed { .. })
        ));
        assert!(matches!(
            ElementTable::from_definitions("H -1"),
            Err(TableError::Malformed { .. })
        ));
    }

    #[test]
    fn test_duplicate_symbol() {
        let err = ElementTable::from_definitions("H 1\nO 8\nH 2\n").unwrap_err();
        assert!(matches!(err, TableError::DuplicateSymbol { ref symbol } if symbol == "H"));
    }
}
