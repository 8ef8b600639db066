//! Model counting by enumeration.
//!
//! Models are found one at a time by a [GroundSolver], with each model blocked by a clause before the next solve.
//! The count is exponential in the count of atoms, and so the counter is intended for small formulas and for testing.
//!
//! ```rust
//! # use num_bigint::BigUint;
//! # use tweety::counting::{EnumerationCounter, ModelCounter};
//! # use tweety::structures::clause::Clause;
//! let clauses = ["!bird(x), flies(x)", "bird(x), pig(x)"].map(|c| c.parse::<Clause>().unwrap());
//! assert_eq!(EnumerationCounter::default().model_count(&clauses).unwrap(), BigUint::from(4_u32));
//! ```

use num_bigint::BigUint;

use crate::{
    config::Config,
    counting::ModelCounter,
    engine::GroundSolver,
    misc::log::targets,
    structures::{atom::Atom, clause::Clause},
    types::err::ErrorKind,
};

#[derive(Clone, Debug, Default)]
pub struct EnumerationCounter {
    config: Config,
}

impl EnumerationCounter {
    pub fn with_config(config: Config) -> Self {
        EnumerationCounter { config }
    }
}

impl ModelCounter for EnumerationCounter {
    fn model_count(&self, clauses: &[Clause]) -> Result<BigUint, ErrorKind> {
        let mut solver = GroundSolver::with_config(clauses.iter(), self.config.clone())?;
        let atoms = (1..=solver.index().len() as Atom)
            .filter_map(|atom| solver.index().literal_of(atom).cloned())
            .collect::<Vec<_>>();

        let mut count = BigUint::ZERO;
        while let Some(witness) = solver.solve()? {
            count += 1_u32;
            let blocking = atoms
                .iter()
                .map(|atom| match witness.contains(atom) {
                    true => atom.negate(),
                    false => atom.clone(),
                })
                .collect::<Clause>();
            solver.add_clause(&blocking)?;
        }

        log::trace!(target: targets::COUNTING, "{count} models over {} atoms", atoms.len());
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(clauses: &[&str]) -> BigUint {
        let clauses = clauses
            .iter()
            .map(|c| c.parse().unwrap())
            .collect::<Vec<Clause>>();
        EnumerationCounter::default().model_count(&clauses).unwrap()
    }

    #[test]
    fn counts() {
        assert_eq!(count(&[]), BigUint::from(1_u32));
        assert_eq!(count(&["a, !a"]), BigUint::from(2_u32));
        assert_eq!(count(&["a, b, c"]), BigUint::from(7_u32));
        assert_eq!(count(&["a", "!a"]), BigUint::ZERO);
    }
}
