use std::{collections::BTreeSet, sync::Arc, time::Duration};

use tweety::{
    config::Config,
    engine::Witness,
    structures::{clause::Clause, literal::Literal, necessity::Necessity},
    theory::{cache::SatCache, Evidence, PossibilisticTheory},
    types::err::{EngineError, ErrorKind, TheoryError},
};

fn level(clauses: &[&str]) -> BTreeSet<Clause> {
    clauses.iter().map(|c| c.parse().unwrap()).collect()
}

fn literal(text: &str) -> Literal {
    text.parse().unwrap()
}

fn evidence(literals: &[&str]) -> Evidence {
    literals.iter().map(|l| literal(l)).collect()
}

fn satisfies(witness: &Witness, clause: &Clause) -> bool {
    clause.literals().any(|literal| match literal.polarity() {
        true => witness.contains(literal),
        false => !witness.contains(&literal.negate()),
    })
}

fn penguins() -> PossibilisticTheory {
    PossibilisticTheory::from_stratification(vec![
        level(&["!bird(x), flies(x)"]),
        level(&["!penguin(x), bird(x)", "!penguin(x), !flies(x)"]),
        level(&["!bird(x), animal(x)"]),
    ])
}

mod levels {

    use super::*;

    #[test]
    fn alpha_cuts_are_monotone() {
        let theory = penguins();
        let weights = theory.weights().collect::<Vec<_>>();

        for (index, lower) in weights.iter().enumerate() {
            for higher in &weights[index..] {
                let lower_cut = theory.alpha_cut(*lower);
                assert!(theory.alpha_cut(*higher).is_subset(&lower_cut));
            }
        }
    }

    #[test]
    fn level_list_round_trip() {
        let levels = vec![
            level(&["a, b", "!c"]),
            level(&["c, d"]),
            level(&["!a", "e"]),
        ];
        let theory = PossibilisticTheory::from_stratification(levels.clone());
        assert_eq!(theory.to_level_list(), levels);
        assert_eq!(
            theory.weights().collect::<Vec<_>>(),
            (0..3).map(|index| Necessity::of_level(index, 3)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn weighted_stratification() {
        let weights = [Necessity::new(0.3).unwrap(), Necessity::new(0.9).unwrap()];
        let theory =
            PossibilisticTheory::from_weighted_stratification(vec![level(&["a"]), level(&["b"])], &weights)
                .unwrap();
        assert_eq!(theory.min_necessity(), Some(weights[0]));

        let mismatch =
            PossibilisticTheory::from_weighted_stratification(vec![level(&["a"])], &weights);
        assert!(matches!(
            mismatch,
            Err(TheoryError::StratificationMismatch { .. })
        ));
    }
}

mod entailment {

    use super::*;

    #[test]
    fn preferred_level_is_sound() {
        let theory = penguins();

        let cases: [&[&str]; 4] = [&["penguin(x)"], &["bird(x)"], &["bird(x)", "!flies(x)"], &[]];
        for literals in cases {
            let evidence = evidence(literals);
            let (witness, preferred) = theory.solve(&evidence).unwrap().unwrap();

            for clause in theory.alpha_cut(preferred) {
                assert!(satisfies(&witness, &clause));
            }
            for literal in &evidence {
                assert!(satisfies(&witness, &Clause::unit(literal.clone())));
            }

            for weight in theory.weights() {
                let consistent = theory.solve_at(weight, &evidence).unwrap().is_some();
                assert_eq!(consistent, weight >= preferred);
            }
        }
    }

    #[test]
    fn tautologies_are_implied() {
        let theory = penguins().with_hard_rules(level(&["a", "!a"]));
        let tautology = "q, !q".parse().unwrap();

        assert!(theory.implies(&evidence(&[]), &tautology).unwrap());
        assert!(theory.implies(&evidence(&["penguin(x)"]), &tautology).unwrap());
        assert!(!theory.implies_literal(&evidence(&[]), &literal("a")).unwrap());
    }

    #[test]
    fn exceptions() {
        let theory = penguins();

        assert!(theory.implies_literal(&evidence(&["bird(x)"]), &literal("flies(x)")).unwrap());
        assert!(theory.implies_literal(&evidence(&["penguin(x)"]), &literal("!flies(x)")).unwrap());
        assert!(theory.implies_literal(&evidence(&["penguin(x)"]), &literal("animal(x)")).unwrap());
        assert!(!theory.implies_literal(&evidence(&["penguin(x)"]), &literal("flies(x)")).unwrap());
    }

    #[test]
    fn non_ground_theory() {
        let theory = PossibilisticTheory::from_stratification(vec![level(&["!bird(X), flies(X)"])]);
        let result = theory.implies_literal(&evidence(&["bird(x)"]), &literal("flies(x)"));
        assert!(matches!(result, Err(ErrorKind::Theory(TheoryError::NonGround))));
    }

    #[test]
    fn most_plausible() {
        let theory = PossibilisticTheory::from_stratification(vec![
            level(&["flies"]),
            level(&["!flies, !penguin"]),
        ]);

        let witness = theory.most_plausible_model(&evidence(&["penguin"])).unwrap().unwrap();
        assert!(witness.contains(&literal("penguin")));
        assert!(!witness.contains(&literal("flies")));

        let witness = theory.most_plausible_model(&evidence(&[])).unwrap().unwrap();
        assert!(witness.contains(&literal("flies")));
        assert!(!witness.contains(&literal("penguin")));
    }

    #[test]
    fn time_up_is_not_cached() {
        let mut config = Config::default();
        config.time_limit.set(Duration::from_nanos(1)).unwrap();
        let cache = Arc::new(SatCache::default());
        let theory = penguins().with_config(config).with_cache(cache.clone());

        let result = theory.implies_literal(&evidence(&[]), &literal("!penguin(x)"));
        assert!(matches!(result, Err(ErrorKind::Engine(EngineError::TimeUp))));
        assert!(cache.is_empty());
    }
}
