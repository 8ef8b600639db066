use std::collections::BTreeSet;

use tweety::{
    counting::{EnumerationCounter, ModelCounter},
    structures::{clause::Clause, necessity::Necessity},
    theory::{simplify, PossibilisticTheory},
};

fn level(clauses: &[&str]) -> BTreeSet<Clause> {
    clauses.iter().map(|c| c.parse().unwrap()).collect()
}

mod enumeration {

    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn cuts() {
        let theory = PossibilisticTheory::from_stratification(vec![level(&["a, b"]), level(&["a"])]);
        let counts = simplify::log2_model_counts_of_cuts(&theory, &EnumerationCounter::default()).unwrap();
        assert_eq!(counts, vec![1.0, 0.0]);
    }

    #[test]
    fn pigeons() {
        let mut clauses = Vec::default();
        for pigeon in 0..3 {
            clauses.push(format!("p{pigeon}h0, p{pigeon}h1").parse::<Clause>().unwrap());
        }
        for hole in 0..2 {
            for a in 0..3 {
                for b in (a + 1)..3 {
                    clauses.push(format!("!p{a}h{hole}, !p{b}h{hole}").parse::<Clause>().unwrap());
                }
            }
        }
        assert_eq!(EnumerationCounter::default().model_count(&clauses).unwrap(), BigUint::ZERO);
    }
}

mod probability {

    use super::*;

    #[test]
    fn violated_level() {
        let theory = PossibilisticTheory::from_weighted_stratification(
            vec![level(&["!a"])],
            &[Necessity::new(0.5).unwrap()],
        )
        .unwrap();

        let rules = ["a".parse::<Clause>().unwrap()];
        let probability =
            simplify::probability(&theory, &rules, &EnumerationCounter::default()).unwrap();
        assert!((probability - 0.5).abs() < 1e-9);
    }

    #[test]
    fn recomputed_weights() {
        let theory =
            PossibilisticTheory::from_stratification(vec![level(&["a"]), level(&["b"]), level(&["c"])]);

        let collapsed = simplify::collapse(&theory, 2).unwrap();
        let recomputed =
            simplify::collapse_with_recomputed_weights(&theory, 2, &EnumerationCounter::default())
                .unwrap();

        assert_eq!(collapsed.to_level_list(), recomputed.to_level_list());
        assert_eq!(collapsed.min_necessity(), Some(Necessity::of_level(0, 3)));

        let weight = recomputed.min_necessity().unwrap();
        assert!(weight > Necessity::of_level(0, 3));
        assert!(weight < Necessity::of_level(2, 3));
    }
}
