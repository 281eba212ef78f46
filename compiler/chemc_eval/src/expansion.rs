//! Resolved formula content.
//!
//! A multiplier never copies content. Each resolved unit (an atom or the
//! body of a closed group) is stored once and paired with a repeat count,
//! and the flat atom sequence is produced lazily by [`Expansion::atoms`].
//! Walking the sequence yields exactly what literal repetition of every
//! group would have produced, in left-to-right order.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// An element symbol shared with the element table.
pub type Symbol = Arc<str>;

/// A resolved piece of formula content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    Atom(Symbol),
    Group(Arc<Group>),
}

impl Unit {
    /// Atom occurrences in one copy of this unit.
    pub fn atoms(&self) -> u64 {
        match self {
            Unit::Atom(_) => 1,
            Unit::Group(group) => group.atoms,
        }
    }
}

/// The content of a closed group, in the order it was written.
#[derive(Debug, PartialEq, Eq)]
pub struct Group {
    terms: Vec<Term>,
    atoms: u64,
}

impl Group {
    /// Returns `None` when the atom count overflows `u64`.
    pub(crate) fn new(terms: Vec<Term>) -> Option<Self> {
        let atoms = count_atoms(&terms)?;
        Some(Self { terms, atoms })
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn atoms(&self) -> u64 {
        self.atoms
    }
}

// Deeply nested groups are released one level at a time.
impl Drop for Group {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.terms);
        while let Some(term) = pending.pop() {
            if let Unit::Group(group) = term.unit {
                if let Ok(mut group) = Arc::try_unwrap(group) {
                    pending.append(&mut group.terms);
                }
            }
        }
    }
}

/// A unit and the number of consecutive copies of it. The count is never 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    unit: Unit,
    count: u64,
}

impl Term {
    pub(crate) fn new(unit: Unit, count: u64) -> Self {
        debug_assert!(count > 0, "terms never hold zero copies");
        Self { unit, count }
    }

    pub(crate) fn atom(symbol: Symbol) -> Self {
        Self::new(Unit::Atom(symbol), 1)
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub(crate) fn set_count(&mut self, count: u64) {
        debug_assert!(count > 0, "terms never hold zero copies");
        self.count = count;
    }

    /// Atom occurrences across every copy, `None` on overflow.
    pub fn atoms(&self) -> Option<u64> {
        self.unit.atoms().checked_mul(self.count)
    }
}

fn count_atoms(terms: &[Term]) -> Option<u64> {
    terms
        .iter()
        .try_fold(0u64, |total, term| total.checked_add(term.atoms()?))
}

/// A fully resolved formula: no open groups remain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Expansion {
    terms: Vec<Term>,
    atoms: u64,
}

impl Expansion {
    /// Returns `None` when the atom count overflows `u64`.
    pub(crate) fn from_terms(terms: Vec<Term>) -> Option<Self> {
        let atoms = count_atoms(&terms)?;
        Some(Self { terms, atoms })
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Total number of atom occurrences.
    pub fn atom_count(&self) -> u64 {
        self.atoms
    }

    pub fn is_empty(&self) -> bool {
        self.atoms == 0
    }

    /// Every atom occurrence, left to right.
    pub fn atoms(&self) -> Atoms<'_> {
        Atoms {
            frames: vec![Frame::new(&self.terms)],
        }
    }

    /// Occurrences per element symbol.
    pub fn tally(&self) -> BTreeMap<Symbol, u64> {
        let mut counts = BTreeMap::new();
        let mut pending: Vec<(&[Term], u64)> = vec![(&self.terms, 1)];
        while let Some((terms, factor)) = pending.pop() {
            for term in terms {
                // Skipping empty units keeps every product below the total atom count.
                if term.unit.atoms() == 0 {
                    continue;
                }
                let copies = factor * term.count;
                match &term.unit {
                    Unit::Atom(symbol) => *counts.entry(Arc::clone(symbol)).or_insert(0) += copies,
                    Unit::Group(group) => pending.push((&group.terms, copies)),
                }
            }
        }
        counts
    }

    /// The flattened formula text, e.g. `MgOHOH` for `Mg(OH)2`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.atoms() {
            f.write_str(symbol)?;
        }
        Ok(())
    }
}

/// Render an expansion as flattened formula text.
pub fn render(expansion: &Expansion) -> String {
    expansion.render()
}

#[derive(Debug)]
struct Frame<'a> {
    terms: &'a [Term],
    index: usize,
    emitted: u64,
}

impl<'a> Frame<'a> {
    fn new(terms: &'a [Term]) -> Self {
        Self {
            terms,
            index: 0,
            emitted: 0,
        }
    }
}

/// Iterator over the atom occurrences of an [`Expansion`].
#[derive(Debug)]
pub struct Atoms<'a> {
    frames: Vec<Frame<'a>>,
}

impl<'a> Iterator for Atoms<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.frames.last_mut()?;
            let terms: &'a [Term] = frame.terms;
            let Some(term) = terms.get(frame.index) else {
                self.frames.pop();
                continue;
            };
            if frame.emitted == term.count || term.unit.atoms() == 0 {
                frame.index += 1;
                frame.emitted = 0;
                continue;
            }
            frame.emitted += 1;
            match &term.unit {
                Unit::Atom(symbol) => return Some(&**symbol),
                Unit::Group(group) => self.frames.push(Frame::new(&group.terms)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn atom(symbol: &str, count: u64) -> Term {
        Term::new(Unit::Atom(Symbol::from(symbol)), count)
    }

    fn group(terms: Vec<Term>, count: u64) -> Term {
        Term::new(Unit::Group(Arc::new(Group::new(terms).unwrap())), count)
    }

    #[test]
    fn test_render_and_tally() {
        // Mg(OH)2
        let expansion =
            Expansion::from_terms(vec![atom("Mg", 1), group(vec![atom("O", 1), atom("H", 1)], 2)])
                .unwrap();

        assert_eq!(expansion.render(), "MgOHOH");
        assert_eq!(expansion.atom_count(), 5);
        let tally: Vec<_> = expansion
            .tally()
            .into_iter()
            .map(|(s, n)| (s.to_string(), n))
            .collect();
        assert_eq!(
            tally,
            vec![
                ("H".to_string(), 2),
                ("Mg".to_string(), 1),
                ("O".to_string(), 2)
            ]
        );
    }

    #[test]
    fn test_nested_groups_multiply() {
        // ((H)2O)3
        let inner = group(vec![atom("H", 1)], 2);
        let outer = group(vec![inner, atom("O", 1)], 3);
        let expansion = Expansion::from_terms(vec![outer]).unwrap();

        assert_eq!(expansion.render(), "HHOHHOHHO");
        assert_eq!(expansion.atoms().count(), 9);
        assert_eq!(expansion.tally()[&Symbol::from("H")], 6);
    }

    #[test]
    fn test_empty_groups_are_skipped() {
        let empty = group(Vec::new(), u64::MAX);
        let expansion = Expansion::from_terms(vec![empty, atom("C", 1)]).unwrap();
        assert_eq!(expansion.render(), "C");
        assert_eq!(expansion.tally().len(), 1);
    }

    #[test]
    fn test_atom_count_overflow() {
        let huge = group(vec![atom("H", u64::MAX)], 1);
        assert!(Expansion::from_terms(vec![huge, atom("O", 1)]).is_none());
    }

    #[test]
    fn test_empty_expansion() {
        let expansion = Expansion::default();
        assert!(expansion.is_empty());
        assert_eq!(render(&expansion), "");
        assert!(expansion.tally().is_empty());
    }
}
