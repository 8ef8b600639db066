//! Pairs of literal sets, each a candidate antecedent together with the literals it implies.
//!
//! A [Bound] is a lower set (an antecedent) and an upper set (the antecedent together with every literal it implies).
//! Any set between the lower and upper set of some bound implies the same literals as the lower set, and so need not be examined.
//! The [BoundStore] indexes bounds by the literals of their lower sets, so this containment may be checked without a scan of every bound.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::structures::literal::Literal;

/// A lower set of literals, and an upper set of literals containing the lower set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bound {
    pub lower: BTreeSet<Literal>,
    pub upper: BTreeSet<Literal>,
}

impl Bound {
    /// True if `set` is between the lower and upper set of the bound.
    pub fn contains(&self, set: &BTreeSet<Literal>) -> bool {
        self.lower.is_subset(set) && set.is_subset(&self.upper)
    }

    /// The literals of the upper set which are not in the lower set.
    pub fn implied(&self) -> impl Iterator<Item = &Literal> {
        self.upper.difference(&self.lower)
    }
}

/// A store of bounds.
#[derive(Debug, Default)]
pub struct BoundStore {
    bounds: Vec<Bound>,

    /// Indices of bounds, by the size of the lower set.
    by_length: BTreeMap<usize, Vec<usize>>,

    /// Indices of bounds, by each literal of the lower set.
    by_lower_literal: HashMap<Literal, Vec<usize>>,
}

impl BoundStore {
    pub fn store(&mut self, lower: BTreeSet<Literal>, upper: BTreeSet<Literal>) {
        let index = self.bounds.len();
        self.by_length.entry(lower.len()).or_default().push(index);
        for literal in &lower {
            self.by_lower_literal
                .entry(literal.clone())
                .or_default()
                .push(index);
        }
        self.bounds.push(Bound { lower, upper });
    }

    /// True if `set` is between the lower and upper set of some stored bound with a non-empty lower set.
    pub fn inside(&self, set: &BTreeSet<Literal>) -> bool {
        set.iter()
            .filter_map(|literal| self.by_lower_literal.get(literal))
            .flatten()
            .any(|&index| self.bounds[index].contains(set))
    }

    /// Bounds whose lower set has `length` literals.
    pub fn of_length(&self, length: usize) -> impl Iterator<Item = &Bound> {
        self.by_length
            .get(&length)
            .into_iter()
            .flatten()
            .map(|&index| &self.bounds[index])
    }

    /// Every stored bound.
    pub fn all(&self) -> impl Iterator<Item = &Bound> {
        self.bounds.iter()
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(literals: &[&str]) -> BTreeSet<Literal> {
        literals.iter().map(|l| l.parse().unwrap()).collect()
    }

    #[test]
    fn containment() {
        let mut store = BoundStore::default();
        store.store(set(&[]), set(&["!p"]));
        store.store(set(&["b"]), set(&["b", "f", "!p"]));

        assert!(store.inside(&set(&["b", "f"])));
        assert!(store.inside(&set(&["b", "!p", "f"])));
        assert!(!store.inside(&set(&["b", "p"])));
        assert!(!store.inside(&set(&["f"])));

        // Bounds with an empty lower set are not used for containment.
        assert!(!store.inside(&set(&["!p"])));

        assert_eq!(store.of_length(1).count(), 1);
        assert_eq!(store.of_length(2).count(), 0);
        assert_eq!(
            store.of_length(1).next().unwrap().implied().count(),
            2
        );
    }
}
