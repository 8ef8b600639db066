/*!
Theories whose clauses are weighted by an interval of necessities.

An interval theory is a pair of [possibilistic theories](PossibilisticTheory) over the same clauses, with the *lower* theory weighting each clause by the lower bound of its interval and the *upper* theory weighting each clause by the upper bound of its interval.

Evidence drowns a level of an interval theory if the level is drowned under every choice of necessities from the intervals.
So, the preferred level of the evidence is found in the upper theory, and every clause of the lower theory at or below the level immediately below the preferred level is dropped before the query is made.

```rust
# use std::collections::BTreeSet;
# use tweety::theory::interval::IntervalTheory;
# use tweety::structures::{clause::Clause, necessity::Necessity};
let n = |v: f64| Necessity::new(v).unwrap();
let theory = IntervalTheory::from_rules([
    ("a".parse::<Clause>().unwrap(), n(0.2), n(0.3)),
    ("b".parse::<Clause>().unwrap(), n(0.25), n(0.35)),
    ("c".parse::<Clause>().unwrap(), n(0.31), n(0.4)),
]);

let evidence = BTreeSet::from(["!a".parse().unwrap()]);
assert!(!theory.implies(&evidence, &"b".parse().unwrap()).unwrap());
assert!(theory.implies(&evidence, &"c".parse().unwrap()).unwrap());
```
*/

use crate::{
    engine::Witness,
    misc::log::targets,
    structures::{clause::Clause, necessity::Necessity},
    theory::{Evidence, PossibilisticTheory},
    types::err::ErrorKind,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntervalTheory {
    lower: PossibilisticTheory,
    upper: PossibilisticTheory,
}

impl IntervalTheory {
    /// A theory with each clause weighted by the paired interval, given as (lower, upper).
    pub fn from_rules(rules: impl IntoIterator<Item = (Clause, Necessity, Necessity)>) -> Self {
        let mut theory = IntervalTheory::default();
        for (clause, lower, upper) in rules {
            theory.add_rule(clause, lower, upper);
        }
        theory
    }

    pub fn add_rule(&mut self, clause: Clause, lower: Necessity, upper: Necessity) {
        self.lower.add_rule(clause.clone(), lower);
        self.upper.add_rule(clause, upper);
    }

    pub fn lower(&self) -> &PossibilisticTheory {
        &self.lower
    }

    pub fn upper(&self) -> &PossibilisticTheory {
        &self.upper
    }

    /// The lower theory without the levels drowned by `evidence`, or nothing if the evidence is inconsistent with the upper theory.
    fn undrowned(&self, evidence: &Evidence) -> Result<Option<PossibilisticTheory>, ErrorKind> {
        let Some((_, preferred)) = self.upper.solve(evidence)? else {
            return Ok(None);
        };

        let drowning_level = self
            .upper
            .weights()
            .take_while(|weight| *weight < preferred)
            .last()
            .unwrap_or(preferred);
        log::trace!(target: targets::THEORY, "Interval evidence drowns the lower theory at {drowning_level}");

        Ok(Some(self.lower.strict_subtheory(drowning_level)))
    }

    /// A model of the evidence at the preferred level of the undrowned lower theory, and the preferred level.
    pub fn solve(&self, evidence: &Evidence) -> Result<Option<(Witness, Necessity)>, ErrorKind> {
        match self.undrowned(evidence)? {
            Some(theory) => theory.solve(evidence),
            None => Ok(None),
        }
    }

    /// True if the undrowned lower theory [implies](PossibilisticTheory::implies) `consequent` given `evidence`.
    ///
    /// Nothing is implied by evidence inconsistent with the upper theory.
    pub fn implies(&self, evidence: &Evidence, consequent: &Clause) -> Result<bool, ErrorKind> {
        match self.undrowned(evidence)? {
            Some(theory) => theory.implies(evidence, consequent),
            None => Ok(false),
        }
    }
}

impl std::fmt::Display for IntervalTheory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Upper")?;
        write!(f, "{}", self.upper)?;
        writeln!(f, "Lower")?;
        write!(f, "{}", self.lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn n(value: f64) -> Necessity {
        Necessity::new(value).unwrap()
    }

    #[test]
    fn preferred_level_without_lower_level() {
        let theory = IntervalTheory::from_rules([
            ("a".parse().unwrap(), n(0.2), n(0.3)),
            ("!a, b".parse().unwrap(), n(0.5), n(0.6)),
        ]);

        let evidence = BTreeSet::from(["a".parse().unwrap()]);
        let (witness, level) = theory.solve(&evidence).unwrap().unwrap();
        assert_eq!(level, n(0.5));
        assert!(witness.contains(&"b".parse().unwrap()));
    }

    #[test]
    fn inconsistent_with_upper() {
        let mut theory = IntervalTheory::default();
        theory.add_rule("a".parse().unwrap(), n(0.2), n(0.3));
        theory.upper.add_hard_rule("!b".parse().unwrap());

        let evidence = BTreeSet::from(["b".parse().unwrap()]);
        assert!(theory.solve(&evidence).unwrap().is_none());
        assert!(!theory.implies(&evidence, &"a".parse().unwrap()).unwrap());
    }
}
