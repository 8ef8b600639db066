/*!
Coverage of default rules by a theory, as a parallel batch of queries.

A default rule is *covered* by a theory if the theory [implies](crate::theory::PossibilisticTheory::implies) the consequent of the rule given the antecedent of the rule.

# Parallelism
The rules are split into contiguous chunks, one chunk for each worker, with the count of workers taken from the [configuration](crate::config::Config::workers) of the theory.
Each worker queries a shared reference to the theory, and so builds a [GroundSolver](crate::engine::GroundSolver) for each query.
Covered rules are appended to a shared list under a lock, and as workers finish in no particular order the list is sorted by the text of each rule before being returned.

If some query fails, some error from a failed query is returned.
A panic in some worker is resumed once every worker has finished.

```rust
# use std::collections::BTreeSet;
# use tweety::{config::Config, theory::{coverage, PossibilisticTheory}};
# use tweety::structures::{clause::Clause, default_rule::DefaultRule};
let mut config = Config::default();
config.workers.set(2).unwrap();

let theory = PossibilisticTheory::from_stratification(vec![
    BTreeSet::from(["!bird, flies".parse::<Clause>().unwrap()]),
])
.with_config(config);

let examples = ["bird -> flies", "flies -> bird", "!flies -> !bird"]
    .map(|rule| rule.parse::<DefaultRule>().unwrap());

let covered = coverage::covered_defaults(&theory, &examples).unwrap();
assert_eq!(covered, [examples[2].clone(), examples[0].clone()]);
```
*/

use std::{collections::BTreeSet, sync::Mutex};

use crate::{
    misc::log::targets,
    structures::{default_rule::DefaultRule, literal::Literal},
    theory::{simplify::remove_drowned_levels, Evidence, PossibilisticTheory},
    types::err::ErrorKind,
};

/// The rules of `examples` covered by `theory`, sorted by the text of each rule.
pub fn covered_defaults(
    theory: &PossibilisticTheory,
    examples: &[DefaultRule],
) -> Result<Vec<DefaultRule>, ErrorKind> {
    let theory = remove_drowned_levels(theory)?;
    if examples.is_empty() {
        return Ok(Vec::default());
    }

    let workers = theory.config().workers.value.max(1);
    let chunk_size = examples.len().div_ceil(workers);
    log::info!(target: targets::COVERAGE, "Coverage of {} rules in chunks of {chunk_size}", examples.len());

    let literals = theory
        .rules()
        .map(|(_, clause)| clause)
        .chain(theory.hard_rules().iter())
        .flat_map(|clause| clause.literals())
        .cloned()
        .collect::<BTreeSet<_>>();

    let covered = Mutex::new(Vec::default());
    let failure = Mutex::new(None);

    let scope = crossbeam::scope(|scope| {
        for chunk in examples.chunks(chunk_size) {
            let (theory, literals, covered, failure) = (&theory, &literals, &covered, &failure);
            scope.spawn(move |_| match covered_chunk(theory, literals, chunk) {
                Ok(mut found) => covered
                    .lock()
                    .unwrap_or_else(|poison| poison.into_inner())
                    .append(&mut found),
                Err(error) => {
                    log::error!(target: targets::COVERAGE, "Coverage query failed: {error}");
                    failure
                        .lock()
                        .unwrap_or_else(|poison| poison.into_inner())
                        .get_or_insert(error);
                }
            });
        }
    });
    if let Err(panic) = scope {
        std::panic::resume_unwind(panic);
    }

    if let Some(error) = failure.into_inner().unwrap_or_else(|poison| poison.into_inner()) {
        return Err(error);
    }

    let mut covered = covered.into_inner().unwrap_or_else(|poison| poison.into_inner());
    covered.sort_by_cached_key(|rule| rule.to_string());
    log::info!(target: targets::COVERAGE, "{} of {} rules covered", covered.len(), examples.len());
    Ok(covered)
}

fn covered_chunk(
    theory: &PossibilisticTheory,
    literals: &BTreeSet<Literal>,
    chunk: &[DefaultRule],
) -> Result<Vec<DefaultRule>, ErrorKind> {
    let mut covered = Vec::default();
    for rule in chunk {
        if !may_be_implied(rule, literals) {
            continue;
        }
        let evidence = rule.antecedent_literals().cloned().collect::<Evidence>();
        if theory.implies(&evidence, rule.consequent())? {
            covered.push(rule.clone());
        }
    }
    Ok(covered)
}

/// False only if no literal of the consequent of `rule` occurs in the theory or the antecedent of `rule`.
///
/// In this case, from any model with some consequent literal true a model with every consequent literal false is found by flipping values, and so the consequent is not implied.
fn may_be_implied(rule: &DefaultRule, literals: &BTreeSet<Literal>) -> bool {
    let consequent = rule.consequent();
    consequent.is_tautology()
        || consequent.literals().any(|literal| {
            literals.contains(literal) || rule.antecedent().contains(literal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::clause::Clause;

    fn penguins() -> PossibilisticTheory {
        let level = |clauses: &[&str]| {
            clauses
                .iter()
                .map(|c| c.parse::<Clause>().unwrap())
                .collect::<BTreeSet<_>>()
        };
        PossibilisticTheory::from_stratification(vec![
            level(&["!bird, flies"]),
            level(&["!penguin, bird", "!penguin, !flies"]),
        ])
    }

    fn rules(rules: &[&str]) -> Vec<DefaultRule> {
        rules.iter().map(|rule| rule.parse().unwrap()).collect()
    }

    #[test]
    fn workers_agree() {
        let examples = rules(&[
            "bird -> flies",
            "penguin -> bird",
            "penguin -> !flies",
            "penguin -> flies",
            "bird -> penguin",
            "penguin, bird -> !flies",
            "-> !penguin",
        ]);

        let mut theory = penguins();
        let single = covered_defaults(&theory, &examples).unwrap();

        theory.config.workers.value = 3;
        let parallel = covered_defaults(&theory, &examples).unwrap();

        assert_eq!(single, parallel);
        assert_eq!(
            single,
            rules(&[
                "-> !penguin",
                "bird -> flies",
                "bird, penguin -> !flies",
                "penguin -> !flies",
                "penguin -> bird",
            ])
        );
    }

    #[test]
    fn absent_literals() {
        let rule = "bird -> swims".parse::<DefaultRule>().unwrap();
        let literals = BTreeSet::from(["bird".parse().unwrap(), "!swims".parse().unwrap()]);
        assert!(!may_be_implied(&rule, &literals));

        let rule = "swims -> swims".parse::<DefaultRule>().unwrap();
        assert!(may_be_implied(&rule, &literals));
    }

    #[test]
    fn empty_batch() {
        assert!(covered_defaults(&penguins(), &[]).unwrap().is_empty());
    }
}
