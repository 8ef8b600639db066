/*!
Transformations of a theory.

Most transformations preserve the consequences of a theory, though [collapse] trades consequences for a smaller theory by merging levels.

- [remove_drowned_levels] removes the levels drowned by empty evidence.
- [simplify_by_unit_propagation] removes from a clause each literal whose negation is a unit clause at the same level or above.
- [simplify_by_resolution] shortens a clause by self-subsuming resolution with a clause at the same level or above.
- [remove_implied_rules] removes each clause implied by the remainder of its level and the levels above.
- [simplify_by_sat] shortens a clause whenever the shorter clause is implied by the level of the clause and the levels above.

Each transformation keeps the hard rules of the theory.
Model counts, as used by [collapse_with_recomputed_weights] and [probability], are provided by some [ModelCounter].

```rust
# use std::collections::BTreeSet;
# use tweety::theory::{simplify, PossibilisticTheory};
# use tweety::structures::clause::Clause;
let level = |clauses: &[&str]| clauses.iter().map(|c| c.parse::<Clause>().unwrap()).collect::<BTreeSet<_>>();

let theory = PossibilisticTheory::from_stratification(vec![
    level(&["a, b"]),
    level(&["!a"]),
]);

let simplified = simplify::simplify_by_unit_propagation(&theory);
assert_eq!(simplified.to_level_list(), vec![level(&["b"]), level(&["!a"])]);
```
*/

use std::collections::{BTreeSet, HashSet};

use num_bigint::BigUint;

use crate::{
    counting::ModelCounter,
    misc::log::targets,
    structures::{clause::Clause, default_rule::DefaultRule, literal::Literal, necessity::Necessity},
    theory::{Evidence, PossibilisticTheory},
    types::err::ErrorKind,
};

/// A theory with the hard rules, cache, and configuration of `theory` and the given levels.
fn with_levels(
    theory: &PossibilisticTheory,
    levels: impl IntoIterator<Item = (Necessity, BTreeSet<Clause>)>,
) -> PossibilisticTheory {
    let mut fresh = PossibilisticTheory::new()
        .with_hard_rules(theory.hard_rules().iter().cloned())
        .with_config(theory.config().clone());
    if let Some(cache) = theory.cache() {
        fresh = fresh.with_cache(cache.clone());
    }
    for (necessity, level) in levels {
        fresh.add_all(level, necessity);
    }
    fresh
}

/// The theory without levels drowned by empty evidence.
///
/// If the hard rules are inconsistent, every level is drowned and an empty theory (without hard rules) is returned.
/// Applying the transformation to its own result has no effect.
pub fn remove_drowned_levels(theory: &PossibilisticTheory) -> Result<PossibilisticTheory, ErrorKind> {
    match theory.solve(&Evidence::default())? {
        None => {
            log::debug!(target: targets::THEORY, "Hard rules are inconsistent, so every level is drowned");
            Ok(PossibilisticTheory::new().with_config(theory.config().clone()))
        }
        Some((_, level)) if theory.min_necessity() == Some(level) => Ok(theory.clone()),
        Some((_, level)) => {
            log::debug!(target: targets::THEORY, "Levels below {level} are drowned");
            Ok(theory.subtheory(level))
        }
    }
}

pub fn simplify_by_unit_propagation(theory: &PossibilisticTheory) -> PossibilisticTheory {
    let weights = theory.weights().collect::<Vec<_>>();
    let mut levels = theory.to_level_list();

    let mut changed = true;
    while changed {
        changed = false;
        for index in 0..levels.len() {
            let negated_units = levels[index..]
                .iter()
                .flatten()
                .filter(|clause| clause.len() == 1)
                .flat_map(Clause::negated_literals)
                .collect::<HashSet<_>>();

            let level = std::mem::take(&mut levels[index]);
            levels[index] = level
                .into_iter()
                .map(|clause| {
                    if clause.literals().any(|literal| negated_units.contains(literal)) {
                        changed = true;
                        clause
                            .literals()
                            .filter(|literal| !negated_units.contains(literal))
                            .cloned()
                            .collect()
                    } else {
                        clause
                    }
                })
                .collect();
        }
    }

    with_levels(theory, weights.into_iter().zip(levels))
}

pub fn simplify_by_resolution(theory: &PossibilisticTheory) -> PossibilisticTheory {
    let weights = theory.weights().collect::<Vec<_>>();
    let mut levels = theory
        .to_level_list()
        .into_iter()
        .map(|level| level.into_iter().collect::<Vec<_>>())
        .collect::<Vec<_>>();

    for index in (0..levels.len()).rev() {
        let resolvers = levels[index].clone();
        for resolver in &resolvers {
            for literal in resolver.literals() {
                let negation = literal.negate();
                let rest = resolver.without(literal);

                for lower in levels[..=index].iter_mut() {
                    for clause in lower.iter_mut() {
                        if clause.contains(&negation)
                            && rest.literal_set().is_subset(clause.literal_set())
                        {
                            *clause = clause.without(&negation);
                        }
                    }
                }
            }
        }
    }

    let levels = levels.into_iter().map(BTreeSet::from_iter);
    with_levels(theory, weights.into_iter().zip(levels))
}

/// True if `clause` is implied by the clauses of `alpha_level` other than itself together with `strict_alpha_cut`.
///
/// Satisfiability is decided with the configuration and cache of `theory`.
pub fn is_implied(
    theory: &PossibilisticTheory,
    clause: &Clause,
    alpha_level: &BTreeSet<Clause>,
    strict_alpha_cut: &BTreeSet<Clause>,
) -> Result<bool, ErrorKind> {
    let mut remainder = alpha_level.clone();
    remainder.remove(clause);
    follows_from(theory, clause, &remainder, strict_alpha_cut)
}

/// True if `clause` is implied by `clauses` together with `strict_alpha_cut`.
fn follows_from(
    theory: &PossibilisticTheory,
    clause: &Clause,
    clauses: &BTreeSet<Clause>,
    strict_alpha_cut: &BTreeSet<Clause>,
) -> Result<bool, ErrorKind> {
    let mut problem = clauses.clone();
    problem.extend(clause.negated_literals().map(Clause::unit));
    problem.extend(strict_alpha_cut.iter().cloned());
    Ok(theory.solve_problem(problem)?.is_none())
}

/// The theory without clauses implied by the remainder of their level and the levels above.
///
/// Longer clauses are examined first, so of two equivalent clauses the shorter is kept.
pub fn remove_implied_rules(theory: &PossibilisticTheory) -> Result<PossibilisticTheory, ErrorKind> {
    let mut levels = Vec::default();
    let mut removed = 0;

    for alpha in theory.weights() {
        let strict_alpha_cut = theory.strict_alpha_cut(alpha);
        let mut alpha_level = theory.alpha_level(alpha).cloned().collect::<BTreeSet<_>>();

        let mut by_length = alpha_level.iter().cloned().collect::<Vec<_>>();
        by_length.sort_by_key(|clause| std::cmp::Reverse(clause.len()));

        let mut kept = BTreeSet::default();
        for clause in by_length {
            if is_implied(theory, &clause, &alpha_level, &strict_alpha_cut)? {
                alpha_level.remove(&clause);
                removed += 1;
            } else {
                kept.insert(clause);
            }
        }
        levels.push((alpha, kept));
    }

    log::debug!(target: targets::THEORY, "Removed {removed} implied rules");
    Ok(with_levels(theory, levels))
}

pub fn simplify_by_sat(theory: &PossibilisticTheory) -> Result<PossibilisticTheory, ErrorKind> {
    let mut levels = Vec::default();

    for alpha in theory.weights() {
        let strict_alpha_cut = theory.strict_alpha_cut(alpha);
        let mut alpha_level = theory.alpha_level(alpha).cloned().collect::<BTreeSet<_>>();

        for original in alpha_level.clone() {
            let mut clause = original;
            while clause.len() > 1 {
                let mut shortened = None;
                for literal in clause.literals() {
                    let shorter = clause.without(literal);
                    if follows_from(theory, &shorter, &alpha_level, &strict_alpha_cut)? {
                        shortened = Some(shorter);
                        break;
                    }
                }

                let Some(shorter) = shortened else {
                    break;
                };
                log::trace!(target: targets::THEORY, "{clause} shortened to {shorter}");
                alpha_level.remove(&clause);
                alpha_level.insert(shorter.clone());
                clause = shorter;
            }
        }
        levels.push((alpha, alpha_level));
    }

    Ok(with_levels(theory, levels))
}

/// Merges the two most certain levels of the theory until the theory has at most `max_size_in_literals` literals or a single level.
///
/// The merged level is simplified, and is placed at the lower necessity of the two levels.
pub fn collapse(
    theory: &PossibilisticTheory,
    max_size_in_literals: usize,
) -> Result<PossibilisticTheory, ErrorKind> {
    collapse_by(theory, max_size_in_literals, None)
}

/// As [collapse], with the necessity of the merged level recomputed from model counts of the two levels.
///
/// The probability of the merged level being violated is the average of the probabilities of the two levels being violated, weighted by the count of models unique to each level.
pub fn collapse_with_recomputed_weights(
    theory: &PossibilisticTheory,
    max_size_in_literals: usize,
    counter: &dyn ModelCounter,
) -> Result<PossibilisticTheory, ErrorKind> {
    collapse_by(theory, max_size_in_literals, Some(counter))
}

fn collapse_by(
    theory: &PossibilisticTheory,
    max_size_in_literals: usize,
    counter: Option<&dyn ModelCounter>,
) -> Result<PossibilisticTheory, ErrorKind> {
    let mut theory = theory.clone();
    let mut weights = theory.weights().collect::<Vec<_>>();

    while theory.size_in_literals() > max_size_in_literals && theory.level_count() > 1 {
        let mut levels = theory.to_level_list();
        let (Some(top), Some(second)) = (levels.pop(), levels.pop()) else {
            break;
        };

        let merged = top.union(&second).cloned().collect::<BTreeSet<_>>();
        let auxiliary = with_levels(&theory, [(Necessity::CERTAIN, merged)]);
        let auxiliary = simplify_by_sat(&remove_implied_rules(&simplify_by_resolution(
            &simplify_by_unit_propagation(&auxiliary),
        ))?)?;

        let top_weight = weights.pop();
        if let Some(counter) = counter {
            let second_weight = weights.pop();
            let (Some(top_weight), Some(second_weight)) = (top_weight, second_weight) else {
                break;
            };

            let pair = PossibilisticTheory::from_stratification([second.clone(), top.clone()]);
            let counts = log2_model_counts_of_cuts(&pair, counter)?;
            let atom_count = theory.propositional_atoms().len() as f64;

            let count_second = (counts[1] - counts[0]).exp2();
            let count_top = (atom_count - counts[1]).exp2();
            let p_second = 1.0 - second_weight.value();
            let p_top = 1.0 - top_weight.value();
            let p_merged =
                (count_second * p_second + count_top * p_top) / (count_second + count_top);

            weights.push(Necessity::new(1.0 - p_merged)?);
        }

        let merged = auxiliary.to_level_list().into_iter().next().unwrap_or_default();
        levels.push(merged);

        log::debug!(target: targets::THEORY, "Collapsed to {} levels", levels.len());
        theory = with_levels(&theory, weights.iter().copied().zip(levels));
    }

    Ok(theory)
}

/// The base two logarithm of `count`, or negative infinity if `count` is zero.
fn log2(count: &BigUint) -> f64 {
    let bits = count.bits();
    if bits == 0 {
        return f64::NEG_INFINITY;
    }
    let shift = bits.saturating_sub(f64::MANTISSA_DIGITS as u64);
    let top = (count >> shift).to_u64_digits().first().copied().unwrap_or(0);
    (top as f64).log2() + shift as f64
}

/// The base two logarithm of the model count of the alpha cut at each level of the theory, from the least certain level.
pub fn log2_model_counts_of_cuts(
    theory: &PossibilisticTheory,
    counter: &dyn ModelCounter,
) -> Result<Vec<f64>, ErrorKind> {
    theory
        .weights()
        .map(|alpha| {
            let cut = theory.alpha_cut(alpha).into_iter().collect::<Vec<_>>();
            let count = counter.model_count(&cut)?;
            log::trace!(target: targets::COUNTING, "{count} models of the cut at {alpha}");
            Ok(log2(&count))
        })
        .collect()
}

/// The probability of `rules` under the distribution induced by the theory.
///
/// Each valuation falsifying the theory first at some level has probability one minus the necessity of the level, and the probabilities of the valuations satisfying `rules` are summed.
pub fn probability(
    theory: &PossibilisticTheory,
    rules: &[Clause],
    counter: &dyn ModelCounter,
) -> Result<f64, ErrorKind> {
    let mut theory = theory.clone();
    theory.add_all_hard_rules(rules.iter().cloned());

    let weights = theory.weights().collect::<Vec<_>>();
    let mut counts = log2_model_counts_of_cuts(&theory, counter)?;

    let rule_atoms = rules
        .iter()
        .flat_map(Clause::literals)
        .map(Literal::positive)
        .collect::<BTreeSet<_>>();
    let free_atoms = theory.propositional_atoms().difference(&rule_atoms).count();
    counts.push(log2(&counter.model_count(rules)?) + free_atoms as f64);

    let probability = weights
        .iter()
        .enumerate()
        .map(|(index, weight)| {
            (1.0 - weight.value()) * (counts[index + 1].exp2() - counts[index].exp2())
        })
        .sum();
    Ok(probability)
}

/// The defaults with a single literal consequent which follow from `clause` and are implied by the theory.
///
/// For each literal of `clause` the antecedent is the negation of the remaining literals.
pub fn simple_defaults(
    clause: &Clause,
    theory: &PossibilisticTheory,
) -> Result<Vec<DefaultRule>, ErrorKind> {
    let mut defaults = Vec::default();
    for literal in clause.literals() {
        let evidence = clause.without(literal).negated_literals().collect::<Evidence>();
        if theory.implies_literal(&evidence, literal)? {
            defaults.push(DefaultRule::new(
                Clause::new(evidence),
                Clause::unit(literal.clone()),
            ));
        }
    }
    Ok(defaults)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(clauses: &[&str]) -> BTreeSet<Clause> {
        clauses.iter().map(|c| c.parse().unwrap()).collect()
    }

    #[test]
    fn drowning_is_idempotent() {
        let theory = PossibilisticTheory::from_stratification(vec![
            level(&["a"]),
            level(&["!a, b"]),
            level(&["!a"]),
        ]);

        let once = remove_drowned_levels(&theory).unwrap();
        assert_eq!(once.level_count(), 2);
        assert_eq!(once.min_necessity(), Some(Necessity::of_level(1, 3)));

        let twice = remove_drowned_levels(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn inconsistent_hard_rules_drown_everything() {
        let theory = PossibilisticTheory::from_stratification(vec![level(&["a"])])
            .with_hard_rules(level(&["b", "!b"]));

        let drowned = remove_drowned_levels(&theory).unwrap();
        assert_eq!(drowned, PossibilisticTheory::new());
        assert_eq!(remove_drowned_levels(&drowned).unwrap(), drowned);
    }

    #[test]
    fn self_subsuming_resolution() {
        let theory =
            PossibilisticTheory::from_stratification(vec![level(&["!a, b, c"]), level(&["a, b"])]);

        let simplified = simplify_by_resolution(&theory);
        assert_eq!(
            simplified.to_level_list(),
            vec![level(&["b, c"]), level(&["a, b"])]
        );
    }

    #[test]
    fn implied_rules() {
        let theory = PossibilisticTheory::from_stratification(vec![level(&["a, b", "a"])]);
        let filtered = remove_implied_rules(&theory).unwrap();
        assert_eq!(filtered.to_level_list(), vec![level(&["a"])]);

        let theory = PossibilisticTheory::from_stratification(vec![level(&["a, b"]), level(&["a"])]);
        let filtered = remove_implied_rules(&theory).unwrap();
        assert_eq!(filtered.to_level_list(), vec![level(&["a"])]);
        assert_eq!(filtered.min_necessity(), Some(Necessity::of_level(1, 2)));
    }

    #[test]
    fn shortened_by_sat() {
        let theory = PossibilisticTheory::from_stratification(vec![level(&["a, b", "a, !b"])]);
        let simplified = simplify_by_sat(&theory).unwrap();

        let clauses = simplified.to_level_list().into_iter().flatten().collect::<Vec<_>>();
        assert!(clauses.contains(&"a".parse().unwrap()));
        assert!(!clauses.contains(&"a, b".parse().unwrap()));
    }

    #[test]
    fn collapse_to_size() {
        let theory =
            PossibilisticTheory::from_stratification(vec![level(&["a"]), level(&["b"]), level(&["c"])]);

        let collapsed = collapse(&theory, 2).unwrap();
        assert_eq!(collapsed.level_count(), 1);
        assert_eq!(collapsed.min_necessity(), Some(Necessity::of_level(0, 3)));
        assert_eq!(collapsed.to_level_list(), vec![level(&["a", "b", "c"])]);

        let unchanged = collapse(&theory, 3).unwrap();
        assert_eq!(unchanged, theory);
    }

    #[test]
    fn simple_defaults_of_clause() {
        let theory = PossibilisticTheory::from_stratification(vec![level(&["!bird, flies"])]);
        let defaults = simple_defaults(&"!bird, flies".parse().unwrap(), &theory).unwrap();

        assert_eq!(defaults.len(), 2);
        assert!(defaults.contains(&"bird -> flies".parse().unwrap()));
        assert!(defaults.contains(&"!flies -> !bird".parse().unwrap()));
    }

    #[test]
    fn log2_of_counts() {
        assert_eq!(log2(&BigUint::from(8_u32)), 3.0);
        assert_eq!(log2(&BigUint::ZERO), f64::NEG_INFINITY);
        let large = BigUint::from(1_u32) << 200_u32;
        assert_eq!(log2(&large), 200.0);
    }
}
