/*!
Model counting.

A [ModelCounter] counts the valuations of the atoms of a set of clauses on which every clause is true.
Counts are used to estimate the probability of an alpha cut, see [simplify](crate::theory::simplify).

- [dimacs] writes clauses in the DIMACS CNF format read by external counters.
- [relsat] runs an external counter on a written formula.
- [enumeration] counts models by enumeration, with a [GroundSolver](crate::engine::GroundSolver).

Only the atoms of the given clauses are counted over, so the count of an empty set of clauses is one.
*/

pub mod dimacs;
pub mod enumeration;
pub mod relsat;

pub use enumeration::EnumerationCounter;
pub use relsat::RelsatCounter;

use num_bigint::BigUint;

use crate::{structures::clause::Clause, types::err::ErrorKind};

/// A capability to count the models of a set of ground clauses.
pub trait ModelCounter {
    fn model_count(&self, clauses: &[Clause]) -> Result<BigUint, ErrorKind>;
}
