use std::collections::BTreeSet;

use tweety::{
    closure::rational_closure,
    extraction::{extract_system_p_defaults, extract_system_p_defaults_with_hard_rules},
    structures::{clause::Clause, default_rule::DefaultRule},
    theory::{Evidence, PossibilisticTheory},
};

fn level(clauses: &[&str]) -> BTreeSet<Clause> {
    clauses.iter().map(|c| c.parse().unwrap()).collect()
}

fn rule(text: &str) -> DefaultRule {
    text.parse().unwrap()
}

fn penguins() -> PossibilisticTheory {
    PossibilisticTheory::from_stratification(vec![
        level(&["!bird, flies"]),
        level(&["!penguin, bird", "!penguin, !flies"]),
    ])
}

mod system_p {

    use super::*;

    #[test]
    fn recovers_penguins() {
        let defaults = extract_system_p_defaults(&penguins(), 2).unwrap();

        for expected in ["bird -> flies", "penguin -> bird", "penguin -> !flies", "-> !penguin"] {
            assert!(defaults.contains(&rule(expected)), "missing {expected}");
        }
        assert!(!defaults.contains(&rule("penguin -> flies")));
    }

    #[test]
    fn defaults_are_implied() {
        let theory = penguins();
        for default in extract_system_p_defaults(&theory, 2).unwrap() {
            let evidence = default.antecedent_literals().cloned().collect::<Evidence>();
            assert!(theory.implies(&evidence, default.consequent()).unwrap());
        }
    }

    #[test]
    fn no_default_follows_from_shorter_defaults() {
        let defaults = extract_system_p_defaults(&penguins(), 2).unwrap();

        for default in &defaults {
            let length = default.antecedent().len();
            if length == 0 {
                continue;
            }

            let shorter = defaults
                .iter()
                .filter(|other| other.antecedent().len() < length)
                .cloned();
            let levels = rational_closure(shorter, &Default::default())
                .unwrap()
                .map(|closure| closure.to_level_list())
                .unwrap_or_default();

            let evidence = default.antecedent_literals().cloned().collect::<Evidence>();
            let mut closure = PossibilisticTheory::from_stratification(levels);
            closure.remove_rules_directly_falsified_by_evidence(&evidence);

            assert!(!closure.implies(&evidence, default.consequent()).unwrap(), "{default} is redundant");
        }
    }

    #[test]
    fn bounded_length() {
        let defaults = extract_system_p_defaults(&penguins(), 1).unwrap();
        assert!(defaults.iter().all(|default| default.antecedent().len() <= 1));

        let facts = extract_system_p_defaults(&penguins(), 0).unwrap();
        assert_eq!(facts, BTreeSet::from([rule("-> !penguin")]));
    }

    #[test]
    fn hard_rules_suppress_defaults() {
        let hard_rules = level(&["!penguin, bird"]);
        let with_hard_rules =
            extract_system_p_defaults_with_hard_rules(&penguins(), &hard_rules, 1).unwrap();

        assert!(!with_hard_rules.contains(&rule("penguin -> bird")));
        assert!(with_hard_rules.contains(&rule("penguin -> !flies")));
    }
}
