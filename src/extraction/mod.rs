/*!
Extraction of the default rules implied by a possibilistic theory.

A default `antecedent -> literal` is extracted when the theory [implies](crate::theory::PossibilisticTheory::implies) the literal given the antecedent.
Antecedents are examined by length, from the empty antecedent up to some maximum length.

# Bounds
For each antecedent examined, a [Bound] is stored pairing the antecedent with every literal the antecedent implies.
Antecedents of length k are built from the bounds of length k - 1, by extending the antecedent of a bound with some literal which is neither implied nor contradicted by the bound.
An extension already between the lower and upper set of some stored bound implies the same literals as the lower set of the bound, and is skipped.

# Redundancy
A default found at length k is kept only if the literal is not implied by the [rational closure](crate::closure) of the defaults found at shorter lengths (with any hard rules), after removing the clauses of the closure falsified by the antecedent.
So, a default is never reported when it follows from shorter defaults already known.

If the shorter defaults have no rational closure, an empty closure is used and every default found at the length is kept.
*/

pub mod bounds;
pub use bounds::{Bound, BoundStore};

use std::collections::BTreeSet;

use crate::{
    closure::rational_closure,
    misc::log::targets,
    structures::{clause::Clause, default_rule::DefaultRule, literal::Literal},
    theory::{Evidence, PossibilisticTheory},
    types::err::ErrorKind,
};

/// The defaults implied by `theory` with antecedents of at most `max_antecedent_length` literals.
pub fn extract_system_p_defaults(
    theory: &PossibilisticTheory,
    max_antecedent_length: usize,
) -> Result<BTreeSet<DefaultRule>, ErrorKind> {
    extract_system_p_defaults_with_hard_rules(theory, &BTreeSet::default(), max_antecedent_length)
}

/// As [extract_system_p_defaults], with `hard_rules` added to the closure of shorter defaults when checking for redundancy.
pub fn extract_system_p_defaults_with_hard_rules(
    theory: &PossibilisticTheory,
    hard_rules: &BTreeSet<Clause>,
    max_antecedent_length: usize,
) -> Result<BTreeSet<DefaultRule>, ErrorKind> {
    let universe = theory.propositional_atoms();
    let mut defaults = BTreeSet::default();
    let mut bounds = BoundStore::default();

    let empty = Evidence::default();
    let implied = implied_literals(&empty, theory, &universe)?;
    bounds.store(empty, implied);

    for bound in bounds.all() {
        for literal in bound.implied() {
            defaults.insert(default_of(bound, literal));
        }
    }
    log::debug!(target: targets::EXTRACTION, "{} defaults with an empty antecedent", defaults.len());

    for length in 1..=max_antecedent_length {
        let shorter_levels = match rational_closure(defaults.iter().cloned(), theory.config())? {
            Some(closure) => closure.to_level_list(),
            None => {
                log::warn!(target: targets::EXTRACTION, "Defaults shorter than {length} have no rational closure");
                Vec::default()
            }
        };

        store_candidates(theory, length, &mut bounds, &universe)?;

        let mut found = 0;
        for bound in bounds.of_length(length) {
            let mut shorter = PossibilisticTheory::from_stratification(shorter_levels.iter().cloned())
                .with_hard_rules(hard_rules.iter().cloned())
                .with_config(theory.config().clone());
            if let Some(cache) = theory.cache() {
                shorter = shorter.with_cache(cache.clone());
            }
            shorter.remove_rules_directly_falsified_by_evidence(&bound.lower);

            for literal in bound.implied() {
                if !shorter.implies_literal(&bound.lower, literal)? {
                    defaults.insert(default_of(bound, literal));
                    found += 1;
                }
            }
        }

        log::debug!(target: targets::EXTRACTION, "{found} defaults with an antecedent of length {length}, from {} bounds", bounds.of_length(length).count());
    }

    Ok(defaults)
}

fn default_of(bound: &Bound, literal: &Literal) -> DefaultRule {
    DefaultRule::new(
        Clause::new(bound.lower.iter().cloned()),
        Clause::unit(literal.clone()),
    )
}

/// Stores a bound for each antecedent of `length` literals which extends the lower set of some bound of length `length - 1`, and is not inside some stored bound.
fn store_candidates(
    theory: &PossibilisticTheory,
    length: usize,
    bounds: &mut BoundStore,
    universe: &BTreeSet<Literal>,
) -> Result<(), ErrorKind> {
    let previous = bounds
        .of_length(length.saturating_sub(1))
        .cloned()
        .collect::<Vec<_>>();

    for bound in previous {
        for candidate in candidates(&bound, universe) {
            if !bounds.inside(&candidate) {
                let mut upper = implied_literals(&candidate, theory, universe)?;
                upper.extend(candidate.iter().cloned());
                log::trace!(target: targets::EXTRACTION, "{} literals implied by an antecedent of {} literals", upper.len() - candidate.len(), candidate.len());
                bounds.store(candidate, upper);
            }
        }
    }
    Ok(())
}

/// For each atom of `universe` without a value in `evidence`, whichever of the atom or its negation is implied by `evidence`, if either.
pub fn implied_literals(
    evidence: &Evidence,
    theory: &PossibilisticTheory,
    universe: &BTreeSet<Literal>,
) -> Result<BTreeSet<Literal>, ErrorKind> {
    let mut implied = BTreeSet::default();
    for atom in universe {
        let negation = atom.negate();
        if evidence.contains(atom) || evidence.contains(&negation) {
            continue;
        }
        if theory.implies_literal(evidence, atom)? {
            implied.insert(atom.clone());
        } else if theory.implies_literal(evidence, &negation)? {
            implied.insert(negation);
        }
    }
    Ok(implied)
}

/// Extensions of the lower set of `bound` by one literal, where neither the literal is in the upper set nor its negation in the lower set.
fn candidates(bound: &Bound, universe: &BTreeSet<Literal>) -> BTreeSet<BTreeSet<Literal>> {
    let mut candidates = BTreeSet::default();
    for atom in universe {
        for literal in [atom.clone(), atom.negate()] {
            if !bound.upper.contains(&literal) && !bound.lower.contains(&literal.negate()) {
                let mut candidate = bound.lower.clone();
                candidate.insert(literal);
                candidates.insert(candidate);
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(literals: &[&str]) -> BTreeSet<Literal> {
        literals.iter().map(|l| l.parse().unwrap()).collect()
    }

    #[test]
    fn candidate_extensions() {
        let bound = Bound {
            lower: set(&["b"]),
            upper: set(&["b", "f"]),
        };
        let candidates = candidates(&bound, &set(&["b", "f", "p"]));
        assert_eq!(
            candidates,
            BTreeSet::from([set(&["b", "!f"]), set(&["b", "p"]), set(&["b", "!p"])])
        );
    }

    #[test]
    fn implied_by_evidence() {
        let theory = PossibilisticTheory::from_stratification(vec![vec![
            "!a, b".parse::<Clause>().unwrap(),
            "!b, !c".parse::<Clause>().unwrap(),
        ]]);
        let implied = implied_literals(&set(&["a"]), &theory, &theory.propositional_atoms()).unwrap();
        assert_eq!(implied, set(&["b", "!c"]));
    }

    #[test]
    fn zero_length() {
        let theory = PossibilisticTheory::from_stratification(vec![vec![
            "!a".parse::<Clause>().unwrap(),
            "!a, b".parse::<Clause>().unwrap(),
        ]]);
        let defaults = extract_system_p_defaults(&theory, 0).unwrap();
        assert_eq!(defaults, BTreeSet::from(["-> !a".parse().unwrap()]));
    }
}
