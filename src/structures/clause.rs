//! Clauses, as sets of literals interpreted as their disjunction.
//!
//! A clause is stored as an ordered set, so two clauses with the same literals are equal (and hash to the same value) regardless of the order in which the literals were given.
//!
//! The textual form of a clause is a comma separated list of literals, where commas inside the parentheses of a literal separate arguments.
//!
//! ```rust
//! # use tweety::structures::clause::Clause;
//! let clause: Clause = "!bird(x), flies(x)".parse().unwrap();
//! let same: Clause = "flies(x), !bird(x), flies(x)".parse().unwrap();
//!
//! assert_eq!(clause, same);
//! assert_eq!(clause.len(), 2);
//! assert!(!clause.is_tautology());
//!
//! let tautology: Clause = "p(a, b), !p(a, b)".parse().unwrap();
//! assert!(tautology.is_tautology());
//! ```

use std::{collections::BTreeSet, str::FromStr};

use crate::{structures::literal::Literal, types::err::ParseError};

/// A clause, as a set of literals.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Clause {
    literals: BTreeSet<Literal>,
}

impl Clause {
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Clause {
            literals: literals.into_iter().collect(),
        }
    }

    /// The clause containing only `literal`.
    pub fn unit(literal: Literal) -> Self {
        Clause {
            literals: BTreeSet::from([literal]),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn literal_set(&self) -> &BTreeSet<Literal> {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    /// True if the clause contains some literal and its negation.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|literal| !literal.polarity() && self.literals.contains(&literal.negate()))
    }

    /// True if every literal of the clause is ground.
    pub fn is_ground(&self) -> bool {
        self.literals.iter().all(Literal::is_ground)
    }

    /// The negation of each literal in the clause.
    ///
    /// Read as a conjunction, the negated literals are the negation of the clause.
    pub fn negated_literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().map(Literal::negate)
    }

    /// The clause without `literal`.
    pub fn without(&self, literal: &Literal) -> Self {
        let mut literals = self.literals.clone();
        literals.remove(literal);
        Clause { literals }
    }

    /// True if every literal of the clause is negated by `evidence`, and so the clause is false on any valuation extending the evidence.
    pub fn is_falsified_by(&self, evidence: &BTreeSet<Literal>) -> bool {
        self.literals
            .iter()
            .all(|literal| evidence.contains(&literal.negate()))
    }
}

impl AsRef<Clause> for Clause {
    fn as_ref(&self) -> &Clause {
        self
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Clause::new(iter)
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, literal) in self.literals.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{literal}")?;
        }
        Ok(())
    }
}

/// Splits `text` at each comma outside of parentheses.
pub(crate) fn split_top_level(text: &str) -> Result<Vec<&str>, ParseError> {
    let mut parts = Vec::default();
    let mut depth: usize = 0;
    let mut start = 0;

    for (index, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| ParseError::Parenthesis(text.to_string()))?
            }
            ',' if depth == 0 => {
                parts.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ParseError::Parenthesis(text.to_string()));
    }
    parts.push(&text[start..]);

    Ok(parts)
}

impl FromStr for Clause {
    type Err = ParseError;

    /// Parses a comma separated list of literals.
    /// Whitespace alone is read as the empty clause.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Clause::default());
        }
        split_top_level(s)?
            .into_iter()
            .map(str::parse::<Literal>)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_arguments() {
        let clause: Clause = "p(a, b), !q, r(c)".parse().unwrap();
        assert_eq!(clause.len(), 3);
        assert!(clause.contains(&"p(a, b)".parse().unwrap()));
        assert!(clause.contains(&"!q".parse().unwrap()));
        assert_eq!(clause.to_string(), "p(a, b), !q, r(c)");
    }

    #[test]
    fn empty_clause() {
        let clause: Clause = "  ".parse().unwrap();
        assert!(clause.is_empty());
        assert!(!clause.is_tautology());
        assert!(clause.is_falsified_by(&BTreeSet::default()));
    }

    #[test]
    fn falsified_by_evidence() {
        let clause: Clause = "!bird(x), flies(x)".parse().unwrap();
        let evidence: BTreeSet<Literal> = ["bird(x)", "!flies(x)"]
            .iter()
            .map(|l| l.parse().unwrap())
            .collect();
        assert!(clause.is_falsified_by(&evidence));

        let partial = BTreeSet::from(["bird(x)".parse::<Literal>().unwrap()]);
        assert!(!clause.is_falsified_by(&partial));
    }

    #[test]
    fn unbalanced() {
        assert!(matches!(
            "p(a), q(b))".parse::<Clause>(),
            Err(ParseError::Parenthesis(_))
        ));
    }
}
