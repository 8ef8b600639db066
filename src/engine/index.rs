//! A bijection between (positive) literals and atoms.
//!
//! Atoms are assigned on first use, from 1, and the negation of a literal is mapped to the negation of the atom of the literal.
//!
//! ```rust
//! # use tweety::engine::index::LiteralIndex;
//! # use tweety::structures::literal::Literal;
//! let mut index = LiteralIndex::default();
//! let bird: Literal = "bird(x)".parse().unwrap();
//!
//! assert_eq!(index.register(&bird), Ok(1));
//! assert_eq!(index.register(&bird.negate()), Ok(1));
//!
//! assert_eq!(index.int_of(&bird), Some(1));
//! assert_eq!(index.int_of(&bird.negate()), Some(-1));
//! assert_eq!(index.literal_of(1), Some(&bird));
//! ```

use std::collections::HashMap;

use crate::{
    structures::{atom::Atom, clause::Clause, literal::CLiteral, literal::Literal},
    types::err::EngineError,
};

/// The literal index.
#[derive(Clone, Debug, Default)]
pub struct LiteralIndex {
    atoms: HashMap<Literal, Atom>,

    /// The positive literal of each atom, with the literal of atom `a` at index `a - 1`.
    literals: Vec<Literal>,
}

impl LiteralIndex {
    /// The atom of `literal`, registering the atom if required.
    pub fn register(&mut self, literal: &Literal) -> Result<Atom, EngineError> {
        if !literal.is_ground() {
            return Err(EngineError::NonGroundLiteral(literal.clone()));
        }
        let positive = literal.positive();
        if let Some(&atom) = self.atoms.get(&positive) {
            return Ok(atom);
        }
        let atom = self.literals.len() as Atom + 1;
        self.atoms.insert(positive.clone(), atom);
        self.literals.push(positive);
        Ok(atom)
    }

    /// Registers each literal of `clause`.
    pub fn register_clause(&mut self, clause: &Clause) -> Result<(), EngineError> {
        for literal in clause.literals() {
            self.register(literal)?;
        }
        Ok(())
    }

    /// The atom of `literal`, if registered.
    pub fn atom_of(&self, literal: &Literal) -> Option<Atom> {
        match literal.polarity() {
            true => self.atoms.get(literal).copied(),
            false => self.atoms.get(&literal.negate()).copied(),
        }
    }

    /// `literal` in the representation of the core, if registered.
    pub fn c_literal_of(&self, literal: &Literal) -> Option<CLiteral> {
        self.atom_of(literal)
            .map(|atom| CLiteral::new(atom, literal.polarity()))
    }

    /// `literal` as a signed integer, if registered.
    pub fn int_of(&self, literal: &Literal) -> Option<i32> {
        self.c_literal_of(literal).map(|literal| literal.as_int())
    }

    /// `clause` in the representation of the core.
    pub fn c_clause_of(&self, clause: &Clause) -> Result<Vec<CLiteral>, EngineError> {
        clause
            .literals()
            .map(|literal| {
                self.c_literal_of(literal)
                    .ok_or_else(|| EngineError::UnindexedLiteral(literal.clone()))
            })
            .collect()
    }

    /// The positive literal of `atom`, if `atom` has been assigned.
    pub fn literal_of(&self, atom: Atom) -> Option<&Literal> {
        (atom as usize)
            .checked_sub(1)
            .and_then(|index| self.literals.get(index))
    }

    /// The literal corresponding to a core literal, if the atom has been assigned.
    pub fn literal_of_c_literal(&self, literal: CLiteral) -> Option<Literal> {
        self.literal_of(literal.atom()).map(|positive| match literal.polarity() {
            true => positive.clone(),
            false => positive.negate(),
        })
    }

    /// A count of registered atoms.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_ground_rejected() {
        let mut index = LiteralIndex::default();
        let open: Literal = "flies(X)".parse().unwrap();
        assert_eq!(index.register(&open), Err(EngineError::NonGroundLiteral(open)));
        assert!(index.is_empty());
    }

    #[test]
    fn clauses() {
        let mut index = LiteralIndex::default();
        let clause: Clause = "!bird(x), flies(x)".parse().unwrap();
        index.register_clause(&clause).unwrap();
        assert_eq!(index.len(), 2);

        let ints = index
            .c_clause_of(&clause)
            .unwrap()
            .iter()
            .map(|l| l.as_int().abs())
            .collect::<Vec<_>>();
        assert_eq!(ints.len(), 2);
        assert!(ints.contains(&1) && ints.contains(&2));

        let other: Clause = "penguin(x)".parse().unwrap();
        assert!(matches!(
            index.c_clause_of(&other),
            Err(EngineError::UnindexedLiteral(_))
        ));
        assert_eq!(index.literal_of(0), None);
    }
}
