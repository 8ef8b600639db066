/*!
The rational closure of a set of default rules, by Z-ranking.

# Z-ranking
A default is *tolerated* by a set of defaults Δ if the antecedent of the default is consistent with the material implications of Δ.
Ranks are built from the most general defaults to the most exceptional:
1. The defaults of Δ tolerated by Δ form the next rank.
2. The rank is removed from Δ, and the process repeats until Δ is empty.

If, at some round, Δ is not empty but no default is tolerated, the defaults have no rational closure and `None` is returned.
This is distinct from the closure of an empty set of defaults, which is an empty ranking.

Each round builds a single [GroundSolver] for the material implications of Δ, and tests each default by [solving under the assumption](GroundSolver::solve_assuming) of its antecedent.

# Rational closure
The rational closure is the [possibilistic theory](crate::theory::PossibilisticTheory) with a level for each rank, with the first (most general) rank the least certain.

```rust
# use tweety::closure::{rational_closure, z_ranking};
# use tweety::config::Config;
# use tweety::structures::{default_rule::DefaultRule, literal::Literal};
# use tweety::theory::Evidence;
let rule = |s: &str| s.parse::<DefaultRule>().unwrap();
let literal = |s: &str| s.parse::<Literal>().unwrap();

let defaults = [
    rule("bird(x) -> flies(x)"),
    rule("penguin(x) -> !flies(x)"),
    rule("penguin(x) -> bird(x)"),
];

let ranking = z_ranking(defaults.clone(), &Config::default()).unwrap().unwrap();
assert_eq!(ranking.len(), 2);
assert!(ranking[0].contains(&defaults[0]));

let theory = rational_closure(defaults, &Config::default()).unwrap().unwrap();
let penguin = Evidence::from([literal("penguin(x)")]);
assert!(theory.implies_literal(&penguin, &literal("bird(x)")).unwrap());
assert!(!theory.implies_literal(&penguin, &literal("flies(x)")).unwrap());

let conflicting = [rule("a -> b"), rule("a -> !b")];
assert!(z_ranking(conflicting, &Config::default()).unwrap().is_none());
```
*/

use std::collections::BTreeSet;

use crate::{
    config::Config,
    engine::GroundSolver,
    misc::log::targets,
    structures::{clause::Clause, default_rule::DefaultRule, literal::Literal},
    theory::PossibilisticTheory,
    types::err::ErrorKind,
};

/// A rank of a Z-ranking.
pub type Rank = BTreeSet<DefaultRule>;

/// The Z-ranking of `defaults`, from the most general rank to the most exceptional rank, or `None` if there is no ranking.
pub fn z_ranking(
    defaults: impl IntoIterator<Item = DefaultRule>,
    config: &Config,
) -> Result<Option<Vec<Rank>>, ErrorKind> {
    let mut delta = defaults.into_iter().collect::<BTreeSet<_>>();
    let mut ranking = Vec::default();

    while !delta.is_empty() {
        let implications = delta
            .iter()
            .map(DefaultRule::to_material_implication)
            .collect::<BTreeSet<Clause>>();
        let mut solver = GroundSolver::with_config(implications.iter(), config.clone())?;

        let mut tolerated = Rank::default();
        for rule in &delta {
            let antecedent = rule.antecedent_literals().cloned().collect::<Vec<Literal>>();
            if solver.solve_assuming(&antecedent)?.is_some() {
                tolerated.insert(rule.clone());
            }
        }

        if tolerated.is_empty() {
            log::info!(target: targets::CLOSURE, "No default tolerated at rank {}, with {} defaults unranked", ranking.len(), delta.len());
            return Ok(None);
        }

        log::debug!(target: targets::CLOSURE, "Rank {} with {} defaults", ranking.len(), tolerated.len());
        delta.retain(|rule| !tolerated.contains(rule));
        ranking.push(tolerated);
    }

    Ok(Some(ranking))
}

/// The rational closure of `defaults`, or `None` if there is no rational closure.
pub fn rational_closure(
    defaults: impl IntoIterator<Item = DefaultRule>,
    config: &Config,
) -> Result<Option<PossibilisticTheory>, ErrorKind> {
    let Some(ranking) = z_ranking(defaults, config)? else {
        return Ok(None);
    };

    let levels = ranking.iter().map(|rank| {
        rank.iter()
            .map(DefaultRule::to_material_implication)
            .collect::<BTreeSet<_>>()
    });
    Ok(Some(
        PossibilisticTheory::from_stratification(levels).with_config(config.clone()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(s: &str) -> DefaultRule {
        s.parse().unwrap()
    }

    #[test]
    fn empty_defaults() {
        let ranking = z_ranking(Vec::default(), &Config::default()).unwrap();
        assert_eq!(ranking, Some(Vec::default()));
        let theory = rational_closure(Vec::default(), &Config::default())
            .unwrap()
            .unwrap();
        assert_eq!(theory.level_count(), 0);
    }

    #[test]
    fn facts_are_tolerated_when_consistent() {
        let ranking = z_ranking([rule("-> a"), rule("a -> b")], &Config::default())
            .unwrap()
            .unwrap();
        assert_eq!(ranking.len(), 1);

        assert!(z_ranking([rule("-> a"), rule("-> !a")], &Config::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn conjunctive_antecedents() {
        // With antecedents asserted as a conjunction, a, b -> !c is an exception to a -> c.
        let ranking = z_ranking(
            [rule("a -> c"), rule("a, b -> !c")],
            &Config::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(ranking.len(), 2);
        assert!(ranking[1].contains(&rule("a, b -> !c")));
    }
}
